//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (default locale has a site)
//! - Validate values (bind address, prefixes, route patterns)
//! - Detect duplicate sites and routes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SiteRouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::SiteRouterConfig;
use crate::routing::{PathPattern, PatternError};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("observability.metrics_address `{0}` is not a socket address")]
    MetricsAddress(String),

    #[error("i18n.default_locale `{0}` has no matching [[sites]] entry")]
    DefaultLocaleWithoutSite(String),

    #[error("site locale `{0}` is not in i18n.allowed_locales")]
    SiteLocaleNotAllowed(String),

    #[error("site locale `{0}` is configured more than once")]
    DuplicateSiteLocale(String),

    #[error("path prefix `{0}` is used by more than one site")]
    DuplicatePathPrefix(String),

    #[error("path prefix `{0}` must be empty or start with '/' and not end with '/'")]
    InvalidPathPrefix(String),

    #[error("site `{locale}` base_url `{url}` is not a valid URL")]
    InvalidBaseUrl { locale: String, url: String },

    #[error("route name must not be empty")]
    EmptyRouteName,

    #[error("route `{0}` is defined more than once")]
    DuplicateRoute(String),

    #[error("route `{route}`: {source}")]
    InvalidPattern { route: String, source: PatternError },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("admin.api_key must be set when the admin API is enabled")]
    MissingAdminKey,
}

pub fn validate_config(config: &SiteRouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(config.observability.metrics_address.clone()));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.admin.enabled && config.admin.api_key.is_empty() {
        errors.push(ValidationError::MissingAdminKey);
    }

    validate_sites(config, &mut errors);
    validate_routes(config, &mut errors);

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn validate_sites(config: &SiteRouterConfig, errors: &mut Vec<ValidationError>) {
    let default_locale = &config.i18n.default_locale;
    if !config.sites.iter().any(|s| &s.locale == default_locale) {
        errors.push(ValidationError::DefaultLocaleWithoutSite(default_locale.clone()));
    }

    let mut locales = HashSet::new();
    let mut prefixes = HashSet::new();
    for site in &config.sites {
        if !locales.insert(site.locale.as_str()) {
            errors.push(ValidationError::DuplicateSiteLocale(site.locale.clone()));
        }
        if !prefixes.insert(site.path_prefix.as_str()) {
            errors.push(ValidationError::DuplicatePathPrefix(site.path_prefix.clone()));
        }

        let prefix = &site.path_prefix;
        if !prefix.is_empty() && (!prefix.starts_with('/') || prefix.ends_with('/')) {
            errors.push(ValidationError::InvalidPathPrefix(prefix.clone()));
        }

        if let Some(allowed) = &config.i18n.allowed_locales {
            if !allowed.contains(&site.locale) {
                errors.push(ValidationError::SiteLocaleNotAllowed(site.locale.clone()));
            }
        }

        if let Some(url) = &site.base_url {
            if url::Url::parse(url).is_err() {
                errors.push(ValidationError::InvalidBaseUrl {
                    locale: site.locale.clone(),
                    url: url.clone(),
                });
            }
        }
    }
}

fn validate_routes(config: &SiteRouterConfig, errors: &mut Vec<ValidationError>) {
    let mut names = HashSet::new();
    for route in &config.routes {
        if route.name.is_empty() {
            errors.push(ValidationError::EmptyRouteName);
        } else if !names.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRoute(route.name.clone()));
        }

        if let Err(source) = PathPattern::parse(&route.path) {
            errors.push(ValidationError::InvalidPattern {
                route: route.name.clone(),
                source,
            });
        }
    }
}
