//! Site (locale) resolution.
//!
//! # Responsibilities
//! - Name the locale of the site currently being served
//! - Map an incoming path to the locale whose route table serves it
//!
//! # Design Decisions
//! - Longest path prefix wins; an unprefixed path belongs to the default site
//! - Prefix match is segment-aware (`/en` matches `/en` and `/en/x`, not `/enter`)

use url::Url;

use crate::config::{I18nConfig, SiteConfig};

/// Source of locale decisions for the router.
pub trait SiteResolver: Send + Sync + std::fmt::Debug {
    /// Locale used when generation is not given an explicit `_locale`.
    fn current_locale(&self) -> &str;

    /// Locale whose route collection must serve `path`.
    fn locale_for_path(&self, path: &str) -> &str;
}

/// One configured site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub locale: String,
    /// Empty for the unprefixed site, otherwise `/xx`.
    pub path_prefix: String,
    pub base_url: Option<Url>,
}

impl Site {
    fn owns(&self, path: &str) -> bool {
        if self.path_prefix.is_empty() {
            return true;
        }
        match path.strip_prefix(&self.path_prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

/// All configured sites plus the default locale.
#[derive(Debug, Clone)]
pub struct SiteMap {
    sites: Vec<Site>,
    default_locale: String,
}

impl SiteMap {
    /// Sites are kept longest prefix first.
    pub fn new(mut sites: Vec<Site>, default_locale: impl Into<String>) -> Self {
        sites.sort_by(|a, b| b.path_prefix.len().cmp(&a.path_prefix.len()));
        Self {
            sites,
            default_locale: default_locale.into(),
        }
    }

    /// Build from validated configuration. Unparseable base URLs are dropped.
    pub fn from_config(i18n: &I18nConfig, sites: &[SiteConfig]) -> Self {
        let sites = sites
            .iter()
            .map(|s| Site {
                locale: s.locale.clone(),
                path_prefix: s.path_prefix.clone(),
                base_url: s.base_url.as_deref().and_then(|u| match Url::parse(u) {
                    Ok(url) => Some(url),
                    Err(e) => {
                        tracing::warn!(locale = %s.locale, base_url = %u, error = %e, "Ignoring invalid site base URL");
                        None
                    }
                }),
            })
            .collect();
        Self::new(sites, i18n.default_locale.clone())
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn site(&self, locale: &str) -> Option<&Site> {
        self.sites.iter().find(|s| s.locale == locale)
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Resolver for one incoming request.
    pub fn for_request<'a>(&'a self, path: &str) -> RequestSite<'a> {
        RequestSite {
            sites: self,
            locale: self.locale_for_path(path).to_string(),
        }
    }
}

impl SiteResolver for SiteMap {
    fn current_locale(&self) -> &str {
        &self.default_locale
    }

    fn locale_for_path(&self, path: &str) -> &str {
        self.sites
            .iter()
            .find(|s| !s.path_prefix.is_empty() && s.owns(path))
            .map(|s| s.locale.as_str())
            .unwrap_or(&self.default_locale)
    }
}

/// The site context of a request being served: generation defaults to the
/// locale the request path belongs to.
#[derive(Debug, Clone)]
pub struct RequestSite<'a> {
    sites: &'a SiteMap,
    locale: String,
}

impl SiteResolver for RequestSite<'_> {
    fn current_locale(&self) -> &str {
        &self.locale
    }

    fn locale_for_path(&self, path: &str) -> &str {
        self.sites.locale_for_path(path)
    }
}

/// Always the same locale. Handy for tools and tests.
#[derive(Debug, Clone)]
pub struct FixedSite(pub String);

impl SiteResolver for FixedSite {
    fn current_locale(&self) -> &str {
        &self.0
    }

    fn locale_for_path(&self, _path: &str) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sites() -> SiteMap {
        SiteMap::new(
            vec![
                Site {
                    locale: "fi".into(),
                    path_prefix: String::new(),
                    base_url: None,
                },
                Site {
                    locale: "en".into(),
                    path_prefix: "/en".into(),
                    base_url: None,
                },
            ],
            "fi",
        )
    }

    #[test]
    fn test_prefix_selects_locale() {
        let s = sites();
        assert_eq!(s.locale_for_path("/en/2025/shop-event/shop"), "en");
        assert_eq!(s.locale_for_path("/en"), "en");
        assert_eq!(s.locale_for_path("/2025/shop-event/kauppa"), "fi");
        assert_eq!(s.locale_for_path("/"), "fi");
    }

    #[test]
    fn test_prefix_is_segment_aware() {
        assert_eq!(sites().locale_for_path("/entropy"), "fi");
    }

    #[test]
    fn test_request_site_defaults_to_request_locale() {
        let s = sites();
        assert_eq!(s.current_locale(), "fi");
        assert_eq!(s.for_request("/en/events").current_locale(), "en");
        assert_eq!(s.for_request("/tapahtumat").current_locale(), "fi");
    }

    #[test]
    fn test_fixed_site() {
        let s = FixedSite("en".into());
        assert_eq!(s.current_locale(), "en");
        assert_eq!(s.locale_for_path("/anything"), "en");
    }
}
