//! Site-aware URL generation and request matching.
//!
//! # Responsibilities
//! - Resolve `(route, _locale)` to the concrete localized route via aliases
//! - Default the locale from the current site when `_locale` is absent
//! - Match an incoming path against its own locale's collection only
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - One compiled matcher per locale, built with the partition
//! - No cross-locale fallback and no redirects: a path that only exists in
//!   another locale's table is an explicit no-match
//! - First route in collection order wins a conflicting pattern

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use crate::config::SiteRouterConfig;
use crate::routing::collection::{RouteCollection, RouteDefinition};
use crate::routing::error::{GenerateError, PatternError};
use crate::routing::name::{RouteClass, classify};
use crate::routing::partition::RoutePartitioner;
use crate::routing::pattern::percent_decode;
use crate::routing::site::{SiteMap, SiteResolver};

/// Parameter map for URL generation.
pub type Parameters = BTreeMap<String, String>;

/// Reserved parameter selecting the target locale.
pub const LOCALE_PARAM: &str = "_locale";

/// Shape of a generated reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceType {
    /// `/en/2025/shop-event/shop`
    #[default]
    AbsolutePath,
    /// `https://example.org/en/2025/shop-event/shop`
    AbsoluteUrl,
}

/// A successful match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    /// Full route name, e.g. `entropy_event_shop.fi`.
    pub route: String,
    /// Base name for localized routes.
    pub base: Option<String>,
    /// Locale whose collection produced the match.
    pub locale: String,
    /// Route defaults overlaid with the extracted path parameters.
    pub params: BTreeMap<String, String>,
    /// Only the values taken from the path, decoded.
    #[serde(skip)]
    pub path_params: BTreeMap<String, String>,
}

/// Compiled matcher over one route collection.
#[derive(Debug, Clone, Default)]
struct MatchTable {
    tree: matchit::Router<String>,
    routes: usize,
}

impl MatchTable {
    fn compile(label: &str, collection: &RouteCollection) -> Self {
        let mut table = Self::default();
        for route in collection {
            match table.tree.insert(route.pattern().encoded(), route.name().to_string()) {
                Ok(()) => table.routes += 1,
                Err(e) => {
                    tracing::warn!(
                        locale = label,
                        route = route.name(),
                        path = route.path(),
                        error = %e,
                        "Route pattern conflicts with an earlier route, skipping"
                    );
                }
            }
        }
        table
    }
}

/// Router wrapper combining the partition with site resolution.
#[derive(Debug, Clone)]
pub struct SiteAwareRouter {
    routes: RouteCollection,
    partitioner: RoutePartitioner,
    sites: SiteMap,
    tables: HashMap<String, MatchTable>,
    neutral_table: MatchTable,
}

impl SiteAwareRouter {
    /// Partition `routes` and compile the per-locale matchers.
    pub fn new(routes: RouteCollection, allowed_locales: Option<BTreeSet<String>>, sites: SiteMap) -> Self {
        let mut partitioner = RoutePartitioner::new();
        if let Some(allowed) = allowed_locales {
            partitioner.set_allowed_locales(allowed);
        }
        partitioner.partition(&routes);

        let tables = partitioner
            .locales()
            .iter()
            .filter_map(|locale| {
                partitioner
                    .locale_collection(locale)
                    .map(|c| (locale.clone(), MatchTable::compile(locale, c)))
            })
            .collect();
        let neutral_table = MatchTable::compile("neutral", partitioner.neutral_collection());

        tracing::info!(
            routes = routes.len(),
            locales = ?partitioner.locales(),
            default_locale = sites.default_locale(),
            "Site router built"
        );

        Self {
            routes,
            partitioner,
            sites,
            tables,
            neutral_table,
        }
    }

    pub fn from_config(config: &SiteRouterConfig) -> Result<Self, PatternError> {
        let routes = config
            .routes
            .iter()
            .map(RouteDefinition::from_config)
            .collect::<Result<RouteCollection, _>>()?;
        let allowed = config
            .i18n
            .allowed_locales
            .as_ref()
            .map(|l| l.iter().cloned().collect());
        Ok(Self::new(routes, allowed, SiteMap::from_config(&config.i18n, &config.sites)))
    }

    pub fn partitioner(&self) -> &RoutePartitioner {
        &self.partitioner
    }

    pub fn sites(&self) -> &SiteMap {
        &self.sites
    }

    pub fn routes(&self) -> &RouteCollection {
        &self.routes
    }

    /// Number of routes compiled into the matcher for `locale`.
    pub fn compiled_routes(&self, locale: &str) -> usize {
        self.tables.get(locale).unwrap_or(&self.neutral_table).routes
    }

    /// Generate a path, defaulting the locale to the default site.
    pub fn generate(&self, name: &str, params: &Parameters) -> Result<String, GenerateError> {
        self.generate_for(&self.sites, name, params, ReferenceType::AbsolutePath)
    }

    /// Generate a reference with `site` supplying the implicit locale.
    pub fn generate_for(
        &self,
        site: &dyn SiteResolver,
        name: &str,
        params: &Parameters,
        reference: ReferenceType,
    ) -> Result<String, GenerateError> {
        let locale = params
            .get(LOCALE_PARAM)
            .map(String::as_str)
            .unwrap_or_else(|| site.current_locale());
        let target = self.partitioner.alias(name, locale).unwrap_or(name);

        tracing::trace!(route = name, locale, target, "Generating URL");

        let route = self
            .routes
            .get(target)
            .ok_or_else(|| GenerateError::RouteNotFound(name.to_string()))?;
        let target_locale = classify(target, self.partitioner.allowed_locales())
            .locale()
            .unwrap_or(locale);
        self.build(route, params, reference, target_locale)
    }

    /// Match `path` against the collection of the locale it belongs to,
    /// as decided by the configured sites.
    pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
        self.match_for(&self.sites, path)
    }

    /// Match `path` (wire form, percent-encoded) with `site` deciding its locale.
    pub fn match_for(&self, site: &dyn SiteResolver, path: &str) -> Option<RouteMatch> {
        let locale = site.locale_for_path(path);
        let (table, collection) = match (self.tables.get(locale), self.partitioner.locale_collection(locale)) {
            (Some(table), Some(collection)) => (table, collection),
            _ => (&self.neutral_table, self.partitioner.neutral_collection()),
        };

        let matched = table.tree.at(path).ok()?;
        let name = matched.value.as_str();
        let route = collection.get(name)?;

        let path_params: BTreeMap<String, String> = matched
            .params
            .iter()
            .map(|(key, value)| (key.to_string(), percent_decode(value)))
            .collect();
        let mut params = route.defaults().clone();
        params.extend(path_params.clone());

        let base = match classify(name, self.partitioner.allowed_locales()) {
            RouteClass::Localized { base, .. } => Some(base.to_string()),
            RouteClass::Neutral => None,
        };

        Some(RouteMatch {
            route: name.to_string(),
            base,
            locale: locale.to_string(),
            params,
            path_params,
        })
    }

    /// Paths of the matched route in every other locale that has a variant.
    ///
    /// Built from the path values only; each variant applies its own defaults.
    pub fn alternates(&self, matched: &RouteMatch) -> BTreeMap<String, String> {
        let Some(base) = matched.base.as_deref() else {
            return BTreeMap::new();
        };

        self.partitioner
            .locales()
            .iter()
            .filter(|l| **l != matched.locale)
            .filter_map(|locale| {
                let target = self.partitioner.alias(base, locale)?;
                let route = self.routes.get(target)?;
                match self.build(route, &matched.path_params, ReferenceType::AbsolutePath, locale) {
                    Ok(path) => Some((locale.clone(), path)),
                    Err(e) => {
                        tracing::debug!(route = target, error = %e, "No alternate for locale");
                        None
                    }
                }
            })
            .collect()
    }

    fn build(
        &self,
        route: &RouteDefinition,
        params: &Parameters,
        reference: ReferenceType,
        locale: &str,
    ) -> Result<String, GenerateError> {
        let mut url = route
            .pattern()
            .build_path(route.name(), params, route.defaults())?;

        let extra: Vec<(&str, &str)> = params
            .iter()
            .filter(|(k, v)| {
                k.as_str() != LOCALE_PARAM
                    && !route.pattern().has_variable(k)
                    && route.defaults().get(k.as_str()) != Some(*v)
            })
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        if !extra.is_empty() {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(extra)
                .finish();
            url.push('?');
            url.push_str(&query);
        }

        match reference {
            ReferenceType::AbsolutePath => Ok(url),
            ReferenceType::AbsoluteUrl => {
                let base = self
                    .sites
                    .site(locale)
                    .and_then(|s| s.base_url.as_ref())
                    .ok_or_else(|| GenerateError::NoBaseUrl(locale.to_string()))?;
                Ok(format!("{}{}", base.as_str().trim_end_matches('/'), url))
            }
        }
    }
}
