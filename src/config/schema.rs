//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the site router.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SiteRouterConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Locale settings shared by all sites.
    pub i18n: I18nConfig,

    /// One entry per locale-specific site.
    pub sites: Vec<SiteConfig>,

    /// Route definitions. Localized routes end in `.{locale}`.
    pub routes: Vec<RouteConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub admin: AdminConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Locale configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Locale of the unprefixed site, used when nothing else decides.
    pub default_locale: String,

    /// Route name suffixes accepted as locales. Unset = any suffix.
    pub allowed_locales: Option<Vec<String>>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: "fi".to_string(),
            allowed_locales: None,
        }
    }
}

/// A locale-specific site.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Locale served by this site (e.g., "en").
    pub locale: String,

    /// Path prefix owned by this site: "" for the default site, "/en" otherwise.
    #[serde(default)]
    pub path_prefix: String,

    /// Scheme and host for absolute URLs (e.g., "https://example.org").
    #[serde(default)]
    pub base_url: Option<String>,
}

/// A named route.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route name, e.g. "entropy_event_shop.fi".
    pub name: String,

    /// Path pattern, e.g. "/{year}/{slug}/kauppa".
    pub path: String,

    /// Values for parameters not supplied at generation time.
    #[serde(default)]
    pub defaults: BTreeMap<String, String>,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Pretty for development, JSON for production.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Admin API configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AdminConfig {
    /// Enable the admin API.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,
}
