//! Route name classification.
//!
//! Localized routes are authored as `{base}.{locale}` (`entropy_event_shop.fi`).
//! The last `.`-delimited segment decides the class; everything else about the
//! name is opaque.

use std::collections::BTreeSet;

/// Classification of a single route name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass<'a> {
    /// Locale-independent; the whole name is the key.
    Neutral,
    /// Belongs to exactly one locale.
    Localized { base: &'a str, locale: &'a str },
}

impl<'a> RouteClass<'a> {
    pub fn is_neutral(&self) -> bool {
        matches!(self, RouteClass::Neutral)
    }

    pub fn locale(&self) -> Option<&'a str> {
        match self {
            RouteClass::Neutral => None,
            RouteClass::Localized { locale, .. } => Some(locale),
        }
    }
}

/// Classify `name` by its last dot segment.
///
/// `allowed` is the locale whitelist; `None` accepts any non-empty suffix.
pub fn classify<'a>(name: &'a str, allowed: Option<&BTreeSet<String>>) -> RouteClass<'a> {
    let Some((base, suffix)) = name.rsplit_once('.') else {
        return RouteClass::Neutral;
    };

    if suffix.is_empty() {
        return RouteClass::Neutral;
    }

    if let Some(allowed) = allowed {
        if !allowed.contains(suffix) {
            return RouteClass::Neutral;
        }
    }

    RouteClass::Localized {
        base,
        locale: suffix,
    }
}
