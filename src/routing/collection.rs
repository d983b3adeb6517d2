//! Route definitions and ordered, name-keyed route collections.

use std::collections::{BTreeMap, HashMap};

use crate::config::RouteConfig;
use crate::routing::error::PatternError;
use crate::routing::pattern::PathPattern;

/// A named route with its parsed path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition {
    name: String,
    pattern: PathPattern,
    defaults: BTreeMap<String, String>,
}

impl RouteDefinition {
    pub fn new(name: impl Into<String>, path: &str) -> Result<Self, PatternError> {
        Ok(Self {
            name: name.into(),
            pattern: PathPattern::parse(path)?,
            defaults: BTreeMap::new(),
        })
    }

    pub fn from_config(config: &RouteConfig) -> Result<Self, PatternError> {
        Ok(Self::new(config.name.clone(), &config.path)?.with_defaults(config.defaults.clone()))
    }

    pub fn with_defaults(mut self, defaults: BTreeMap<String, String>) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn path(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn defaults(&self) -> &BTreeMap<String, String> {
        &self.defaults
    }
}

/// Ordered set of routes keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteCollection {
    routes: Vec<RouteDefinition>,
    index: HashMap<String, usize>,
}

impl RouteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a route. An existing route of the same name is removed first,
    /// so the new one lands at the end.
    pub fn add(&mut self, route: RouteDefinition) {
        if let Some(pos) = self.index.remove(route.name()) {
            self.routes.remove(pos);
            self.reindex();
        }
        self.index.insert(route.name().to_string(), self.routes.len());
        self.routes.push(route);
    }

    /// Insert only when no route with this name exists. Returns whether it was added.
    pub fn add_if_absent(&mut self, route: RouteDefinition) -> bool {
        if self.index.contains_key(route.name()) {
            return false;
        }
        self.index.insert(route.name().to_string(), self.routes.len());
        self.routes.push(route);
        true
    }

    pub fn get(&self, name: &str) -> Option<&RouteDefinition> {
        self.index.get(name).map(|&i| &self.routes[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RouteDefinition> {
        self.routes.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(RouteDefinition::name)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn reindex(&mut self) {
        self.index = self
            .routes
            .iter()
            .enumerate()
            .map(|(i, r)| (r.name().to_string(), i))
            .collect();
    }
}

impl FromIterator<RouteDefinition> for RouteCollection {
    fn from_iter<I: IntoIterator<Item = RouteDefinition>>(iter: I) -> Self {
        let mut collection = Self::new();
        for route in iter {
            collection.add(route);
        }
        collection
    }
}

impl<'a> IntoIterator for &'a RouteCollection {
    type Item = &'a RouteDefinition;
    type IntoIter = std::slice::Iter<'a, RouteDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}
