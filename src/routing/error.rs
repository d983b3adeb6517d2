//! Routing error types.

use thiserror::Error;

/// A route path pattern could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Patterns are absolute paths.
    #[error("pattern `{0}` must start with '/'")]
    NotAbsolute(String),

    /// A `{` without its closing `}` (or the reverse).
    #[error("pattern `{0}` has an unbalanced brace")]
    UnbalancedBrace(String),

    /// `{}` or `{*}`.
    #[error("pattern `{0}` has an empty parameter name")]
    EmptyParameterName(String),

    /// Placeholders must cover a whole path segment.
    #[error("pattern `{pattern}`: placeholder must span the whole segment `{segment}`")]
    PartialSegment { pattern: String, segment: String },

    /// The same placeholder name appears twice.
    #[error("pattern `{pattern}` repeats parameter `{name}`")]
    DuplicateParameter { pattern: String, name: String },

    /// A catch-all placeholder anywhere but the final segment.
    #[error("pattern `{0}`: catch-all parameter must be the last segment")]
    CatchAllNotLast(String),
}

/// URL generation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// Neither an alias nor a literal route with this name exists.
    #[error("unable to generate a URL for the named route \"{0}\" as such route does not exist")]
    RouteNotFound(String),

    /// Required placeholders without a parameter or default.
    #[error("missing mandatory parameters (\"{}\") to generate a URL for route \"{route}\"", .params.join("\", \""))]
    MissingParameters { route: String, params: Vec<String> },

    /// A value that cannot be placed in its segment.
    #[error("parameter \"{param}\" for route \"{route}\" must be a non-empty single path segment, got \"{value}\"")]
    InvalidParameter {
        route: String,
        param: String,
        value: String,
    },

    /// An absolute URL was requested for a locale whose site has no base URL.
    #[error("no base URL configured for locale \"{0}\"")]
    NoBaseUrl(String),
}

impl GenerateError {
    /// True when the error means "no such route" rather than bad input.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GenerateError::RouteNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameters_message() {
        let err = GenerateError::MissingParameters {
            route: "entropy_event_shop.fi".into(),
            params: vec!["year".into(), "slug".into()],
        };
        assert_eq!(
            err.to_string(),
            "missing mandatory parameters (\"year\", \"slug\") to generate a URL for route \"entropy_event_shop.fi\""
        );
        assert!(!err.is_not_found());
        assert!(GenerateError::RouteNotFound("x".into()).is_not_found());
    }
}
