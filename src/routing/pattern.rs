//! Route path patterns.
//!
//! Syntax: `/en/{year}/{slug}/shop`, with an optional trailing catch-all
//! `/files/{*path}`. A placeholder always spans a whole segment, which keeps
//! the syntax identical to what the per-locale matchers compile.
//!
//! Static text is written decoded (`/ä/{slug}`) and kept in its percent-encoded
//! wire form for both generation and matching, so a generated URL always
//! resolves back to the route that produced it.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::routing::error::{GenerateError, PatternError};

/// Bytes escaped in a path segment: everything outside RFC 3986 pchar.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b':')
    .remove(b'@');

/// Catch-all values span segments and keep their separators.
const CATCH_ALL: &AsciiSet = &SEGMENT.remove(b'/');

/// One `/`-separated piece of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
    CatchAll(String),
}

/// A parsed, immutable path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    /// `raw` with static text percent-encoded; what the matchers compile.
    encoded: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let Some(rest) = raw.strip_prefix('/') else {
            return Err(PatternError::NotAbsolute(raw.to_string()));
        };

        let pieces: Vec<&str> = rest.split('/').collect();
        let mut segments = Vec::with_capacity(pieces.len());
        let mut seen = BTreeSet::new();

        for (i, piece) in pieces.iter().enumerate() {
            let segment = parse_segment(raw, piece)?;
            match &segment {
                Segment::Static(_) => {}
                Segment::Param(name) | Segment::CatchAll(name) => {
                    if !seen.insert(name.clone()) {
                        return Err(PatternError::DuplicateParameter {
                            pattern: raw.to_string(),
                            name: name.clone(),
                        });
                    }
                }
            }
            if matches!(segment, Segment::CatchAll(_)) && i + 1 != pieces.len() {
                return Err(PatternError::CatchAllNotLast(raw.to_string()));
            }
            segments.push(segment);
        }

        let encoded = segments
            .iter()
            .map(|s| match s {
                Segment::Static(text) => format!("/{text}"),
                Segment::Param(name) => format!("/{{{name}}}"),
                Segment::CatchAll(name) => format!("/{{*{name}}}"),
            })
            .collect();

        Ok(Self {
            raw: raw.to_string(),
            encoded,
            segments,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The pattern as it appears on the wire, e.g. `/%C3%A4/{slug}`.
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// Placeholder names in path order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Static(_) => None,
            Segment::Param(name) | Segment::CatchAll(name) => Some(name.as_str()),
        })
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables().any(|v| v == name)
    }

    /// Substitute placeholders, falling back to `defaults`.
    ///
    /// `route` only labels errors.
    pub fn build_path(
        &self,
        route: &str,
        params: &BTreeMap<String, String>,
        defaults: &BTreeMap<String, String>,
    ) -> Result<String, GenerateError> {
        let missing: Vec<String> = self
            .variables()
            .filter(|v| !params.contains_key(*v) && !defaults.contains_key(*v))
            .map(String::from)
            .collect();
        if !missing.is_empty() {
            return Err(GenerateError::MissingParameters {
                route: route.to_string(),
                params: missing,
            });
        }

        let invalid = |name: &str, value: &str| GenerateError::InvalidParameter {
            route: route.to_string(),
            param: name.to_string(),
            value: value.to_string(),
        };

        let mut path = String::with_capacity(self.encoded.len());
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Static(text) => path.push_str(text),
                Segment::Param(name) => {
                    let value = lookup(name, params, defaults);
                    if value.contains('/') || is_unusable_segment(value) {
                        return Err(invalid(name, value));
                    }
                    path.extend(utf8_percent_encode(value, SEGMENT));
                }
                Segment::CatchAll(name) => {
                    let value = lookup(name, params, defaults);
                    if value.is_empty() || value.split('/').any(is_unusable_segment) {
                        return Err(invalid(name, value));
                    }
                    path.extend(utf8_percent_encode(value, CATCH_ALL));
                }
            }
        }
        Ok(path)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn lookup<'a>(
    name: &str,
    params: &'a BTreeMap<String, String>,
    defaults: &'a BTreeMap<String, String>,
) -> &'a str {
    params
        .get(name)
        .or_else(|| defaults.get(name))
        .map(String::as_str)
        .unwrap_or_default()
}

fn parse_segment(raw: &str, piece: &str) -> Result<Segment, PatternError> {
    let opens = piece.matches('{').count();
    let closes = piece.matches('}').count();

    if opens == 0 && closes == 0 {
        let decoded = percent_decode_str(piece).decode_utf8_lossy();
        return Ok(Segment::Static(utf8_percent_encode(&decoded, SEGMENT).to_string()));
    }
    if opens != 1 || closes != 1 {
        return Err(PatternError::UnbalancedBrace(raw.to_string()));
    }

    let Some(inner) = piece.strip_prefix('{').and_then(|p| p.strip_suffix('}')) else {
        return Err(PatternError::PartialSegment {
            pattern: raw.to_string(),
            segment: piece.to_string(),
        });
    };

    let (catch_all, name) = match inner.strip_prefix('*') {
        Some(name) => (true, name),
        None => (false, inner),
    };
    if name.is_empty() {
        return Err(PatternError::EmptyParameterName(raw.to_string()));
    }

    Ok(if catch_all {
        Segment::CatchAll(name.to_string())
    } else {
        Segment::Param(name.to_string())
    })
}

/// Empty, `.` and `..` segments vanish or move under URL normalization.
fn is_unusable_segment(value: &str) -> bool {
    matches!(value, "" | "." | "..")
}

/// Decode `%XX` escapes in a matched path parameter.
///
/// Malformed escapes are kept literally; invalid UTF-8 is replaced.
pub fn percent_decode(value: &str) -> String {
    percent_decode_str(value).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_build_shop_paths() {
        let en = PathPattern::parse("/en/{year}/{slug}/shop").unwrap();
        let fi = PathPattern::parse("/{year}/{slug}/kauppa").unwrap();
        let p = params(&[("year", "2025"), ("slug", "shop-event")]);
        let none = BTreeMap::new();

        assert_eq!(en.build_path("shop.en", &p, &none).unwrap(), "/en/2025/shop-event/shop");
        assert_eq!(fi.build_path("shop.fi", &p, &none).unwrap(), "/2025/shop-event/kauppa");
    }

    #[test]
    fn test_root_and_trailing_slash_preserved() {
        let none = BTreeMap::new();
        let root = PathPattern::parse("/").unwrap();
        assert_eq!(root.build_path("home", &none, &none).unwrap(), "/");

        let dir = PathPattern::parse("/events/").unwrap();
        assert_eq!(dir.build_path("events", &none, &none).unwrap(), "/events/");
    }

    #[test]
    fn test_variables_in_order() {
        let p = PathPattern::parse("/en/{year}/{slug}/shop").unwrap();
        assert_eq!(p.variables().collect::<Vec<_>>(), vec!["year", "slug"]);
        assert!(p.has_variable("slug"));
        assert!(!p.has_variable("_locale"));
    }

    #[test]
    fn test_missing_parameters_reported_together() {
        let p = PathPattern::parse("/{year}/{slug}").unwrap();
        let err = p.build_path("r", &BTreeMap::new(), &BTreeMap::new()).unwrap_err();
        assert_eq!(
            err,
            GenerateError::MissingParameters {
                route: "r".into(),
                params: vec!["year".into(), "slug".into()],
            }
        );
    }

    #[test]
    fn test_defaults_fill_gaps() {
        let p = PathPattern::parse("/events/{page}").unwrap();
        let defaults = params(&[("page", "1")]);
        assert_eq!(p.build_path("r", &BTreeMap::new(), &defaults).unwrap(), "/events/1");
        assert_eq!(p.build_path("r", &params(&[("page", "3")]), &defaults).unwrap(), "/events/3");
    }

    #[test]
    fn test_segment_values_are_encoded() {
        let p = PathPattern::parse("/tag/{name}").unwrap();
        let none = BTreeMap::new();
        assert_eq!(
            p.build_path("r", &params(&[("name", "rock & roll")]), &none).unwrap(),
            "/tag/rock%20&%20roll"
        );
        assert_eq!(
            p.build_path("r", &params(&[("name", "ä")]), &none).unwrap(),
            "/tag/%C3%A4"
        );
    }

    #[test]
    fn test_slash_rejected_outside_catch_all() {
        let none = BTreeMap::new();
        let p = PathPattern::parse("/tag/{name}").unwrap();
        assert!(matches!(
            p.build_path("r", &params(&[("name", "a/b")]), &none),
            Err(GenerateError::InvalidParameter { .. })
        ));
        assert!(matches!(
            p.build_path("r", &params(&[("name", "")]), &none),
            Err(GenerateError::InvalidParameter { .. })
        ));

        let files = PathPattern::parse("/files/{*path}").unwrap();
        assert_eq!(
            files.build_path("r", &params(&[("path", "a/b c")]), &none).unwrap(),
            "/files/a/b%20c"
        );
    }

    #[test]
    fn test_static_text_uses_wire_form() {
        let p = PathPattern::parse("/ä/{slug}").unwrap();
        assert_eq!(p.as_str(), "/ä/{slug}");
        assert_eq!(p.encoded(), "/%C3%A4/{slug}");
        assert_eq!(
            p.build_path("r", &params(&[("slug", "ö")]), &BTreeMap::new()).unwrap(),
            "/%C3%A4/%C3%B6"
        );

        let pre_encoded = PathPattern::parse("/%C3%A4/{slug}").unwrap();
        assert_eq!(pre_encoded.encoded(), p.encoded());
        assert_eq!(PathPattern::parse("/files/{*path}").unwrap().encoded(), "/files/{*path}");
    }

    #[test]
    fn test_dot_segments_rejected() {
        let none = BTreeMap::new();
        let p = PathPattern::parse("/tag/{name}").unwrap();
        for value in [".", ".."] {
            assert!(matches!(
                p.build_path("r", &params(&[("name", value)]), &none),
                Err(GenerateError::InvalidParameter { .. })
            ));
        }
        assert_eq!(p.build_path("r", &params(&[("name", "...")]), &none).unwrap(), "/tag/...");
    }

    #[test]
    fn test_catch_all_needs_real_segments() {
        let none = BTreeMap::new();
        let files = PathPattern::parse("/media/{*file}").unwrap();
        for value in ["", "a/../b", "./a", "a/"] {
            assert!(
                matches!(
                    files.build_path("media", &params(&[("file", value)]), &none),
                    Err(GenerateError::InvalidParameter { .. })
                ),
                "accepted {value:?}"
            );
        }
        assert_eq!(
            files.build_path("media", &params(&[("file", "2025/poster.png")]), &none).unwrap(),
            "/media/2025/poster.png"
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(PathPattern::parse("en/x"), Err(PatternError::NotAbsolute(_))));
        assert!(matches!(PathPattern::parse("/{year"), Err(PatternError::UnbalancedBrace(_))));
        assert!(matches!(PathPattern::parse("/{}"), Err(PatternError::EmptyParameterName(_))));
        assert!(matches!(
            PathPattern::parse("/v{id}"),
            Err(PatternError::PartialSegment { .. })
        ));
        assert!(matches!(
            PathPattern::parse("/{id}/{id}"),
            Err(PatternError::DuplicateParameter { .. })
        ));
        assert!(matches!(
            PathPattern::parse("/{*rest}/tail"),
            Err(PatternError::CatchAllNotLast(_))
        ));
    }

    #[test]
    fn test_percent_decode() {
        assert_eq!(percent_decode("rock%20%26%20roll"), "rock & roll");
        assert_eq!(percent_decode("%C3%A4"), "ä");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
    }
}
