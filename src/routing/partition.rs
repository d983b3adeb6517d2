//! Locale partitioning of the route table.
//!
//! # Responsibilities
//! - Classify every route as neutral or localized (see [`classify`])
//! - Record `(base, locale) → full name` aliases
//! - Build one merged collection per discovered locale
//!
//! # Design Decisions
//! - `partition` rebuilds all state; nothing accumulates between calls
//! - Localized routes enter a locale collection first; neutral routes never
//!   overwrite an existing key
//! - Locales are reported in discovery order

use std::collections::{BTreeSet, HashMap};

use crate::routing::collection::{RouteCollection, RouteDefinition};
use crate::routing::name::{RouteClass, classify};

#[derive(Debug, Clone, Default)]
pub struct RoutePartitioner {
    allowed_locales: Option<BTreeSet<String>>,
    locales: Vec<String>,
    neutral: RouteCollection,
    /// base name → locale → full route name
    aliases: HashMap<String, HashMap<String, String>>,
    collections: HashMap<String, RouteCollection>,
}

impl RoutePartitioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict which suffixes count as locales. Applies to the next `partition`.
    pub fn set_allowed_locales<I, S>(&mut self, locales: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_locales = Some(locales.into_iter().map(Into::into).collect());
    }

    pub fn allowed_locales(&self) -> Option<&BTreeSet<String>> {
        self.allowed_locales.as_ref()
    }

    pub fn partition<'a, I>(&mut self, routes: I)
    where
        I: IntoIterator<Item = &'a RouteDefinition>,
    {
        self.locales.clear();
        self.neutral = RouteCollection::new();
        self.aliases.clear();
        self.collections.clear();

        let mut localized: Vec<(&str, &RouteDefinition)> = Vec::new();

        for route in routes {
            match classify(route.name(), self.allowed_locales.as_ref()) {
                RouteClass::Neutral => self.neutral.add(route.clone()),
                RouteClass::Localized { base, locale } => {
                    self.aliases
                        .entry(base.to_string())
                        .or_default()
                        .insert(locale.to_string(), route.name().to_string());
                    if !self.locales.iter().any(|l| l == locale) {
                        self.locales.push(locale.to_string());
                    }
                    localized.push((locale, route));
                }
            }
        }

        for locale in &self.locales {
            let mut collection = RouteCollection::new();
            for (_, route) in localized.iter().filter(|(l, _)| *l == locale.as_str()) {
                collection.add((*route).clone());
            }
            for route in &self.neutral {
                if !collection.add_if_absent(route.clone()) {
                    tracing::warn!(
                        route = route.name(),
                        locale = %locale,
                        "Neutral route shadowed by localized route of the same name"
                    );
                }
            }
            self.collections.insert(locale.clone(), collection);
        }

        tracing::debug!(
            locales = ?self.locales,
            neutral = self.neutral.len(),
            localized = localized.len(),
            "Routes partitioned"
        );
    }

    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    pub fn alias(&self, base: &str, locale: &str) -> Option<&str> {
        self.aliases
            .get(base)
            .and_then(|by_locale| by_locale.get(locale))
            .map(String::as_str)
    }

    /// Every `(base, locale, full name)` triple, sorted.
    pub fn aliases(&self) -> Vec<(&str, &str, &str)> {
        let mut all: Vec<_> = self
            .aliases
            .iter()
            .flat_map(|(base, by_locale)| {
                by_locale
                    .iter()
                    .map(move |(locale, full)| (base.as_str(), locale.as_str(), full.as_str()))
            })
            .collect();
        all.sort_unstable();
        all
    }

    pub fn neutral_collection(&self) -> &RouteCollection {
        &self.neutral
    }

    pub fn locale_collection(&self, locale: &str) -> Option<&RouteCollection> {
        self.collections.get(locale)
    }
}
