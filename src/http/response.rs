//! Response bodies.
//!
//! # Design Decisions
//! - Every body is JSON
//! - A missing route is a plain 404, never a redirect to another locale
//! - Generation errors map to 404 (unknown route) or 400 (bad parameters)

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::routing::{GenerateError, RouteMatch};

/// Body for a matched request.
#[derive(Debug, Serialize)]
pub struct MatchResponse {
    #[serde(flatten)]
    pub matched: RouteMatch,
    /// Same page in the other locales, keyed by locale.
    pub alternates: BTreeMap<String, String>,
}

/// Body for a path no route of its locale serves.
#[derive(Debug, Serialize)]
pub struct NotFoundResponse {
    pub error: &'static str,
    pub locale: String,
    pub path: String,
}

impl NotFoundResponse {
    pub fn new(locale: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            error: "not_found",
            locale: locale.into(),
            path: path.into(),
        }
    }
}

impl IntoResponse for NotFoundResponse {
    fn into_response(self) -> Response {
        (StatusCode::NOT_FOUND, Json(self)).into_response()
    }
}

/// Generic error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
}

impl IntoResponse for GenerateError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            GenerateError::RouteNotFound(_) => (StatusCode::NOT_FOUND, "route_not_found"),
            GenerateError::MissingParameters { .. } => (StatusCode::BAD_REQUEST, "missing_parameters"),
            GenerateError::InvalidParameter { .. } => (StatusCode::BAD_REQUEST, "invalid_parameter"),
            GenerateError::NoBaseUrl(_) => (StatusCode::BAD_REQUEST, "no_base_url"),
        };
        let body = ErrorResponse {
            error,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
