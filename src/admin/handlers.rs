use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::http::response::ErrorResponse;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::{Parameters, ReferenceType};

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub routes: usize,
    pub default_locale: String,
}

#[derive(Serialize)]
pub struct AliasEntry {
    pub base: String,
    pub locale: String,
    pub route: String,
}

#[derive(Serialize)]
pub struct PartitionSummary {
    pub locales: Vec<String>,
    pub neutral: Vec<String>,
    /// Locale → route names of its merged collection, in collection order.
    pub collections: BTreeMap<String, Vec<String>>,
    pub aliases: Vec<AliasEntry>,
}

#[derive(Serialize)]
pub struct GeneratedUrl {
    pub route: String,
    pub url: String,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let inner = state.inner.load();
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        routes: inner.router.routes().len(),
        default_locale: inner.router.sites().default_locale().to_string(),
    })
}

pub async fn get_routes(State(state): State<AppState>) -> Json<PartitionSummary> {
    let inner = state.inner.load();
    let partitioner = inner.router.partitioner();

    let collections = partitioner
        .locales()
        .iter()
        .filter_map(|locale| {
            partitioner
                .locale_collection(locale)
                .map(|c| (locale.clone(), c.names().map(String::from).collect()))
        })
        .collect();

    let aliases = partitioner
        .aliases()
        .into_iter()
        .map(|(base, locale, route)| AliasEntry {
            base: base.to_string(),
            locale: locale.to_string(),
            route: route.to_string(),
        })
        .collect();

    Json(PartitionSummary {
        locales: partitioner.locales().to_vec(),
        neutral: partitioner.neutral_collection().names().map(String::from).collect(),
        collections,
        aliases,
    })
}

/// `GET /_admin/generate?route=entropy_event_shop&_locale=en&year=2025&slug=x`
///
/// `route` selects the route and `absolute=true` asks for a full URL. `from`
/// names a request path whose site supplies the locale when `_locale` is
/// absent. Every other query pair is a generation parameter.
pub async fn get_generate(
    State(state): State<AppState>,
    Query(mut query): Query<BTreeMap<String, String>>,
) -> Response {
    let Some(route) = query.remove("route") else {
        let body = ErrorResponse {
            error: "missing_route",
            message: "query parameter `route` is required".to_string(),
        };
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    };
    let reference = match query.remove("absolute").as_deref() {
        Some("true") | Some("1") => ReferenceType::AbsoluteUrl,
        _ => ReferenceType::AbsolutePath,
    };
    let from = query.remove("from");
    let params: Parameters = query;

    let inner = state.inner.load();
    let router = &inner.router;
    let generated = match from.as_deref() {
        Some(path) => router.generate_for(&router.sites().for_request(path), &route, &params, reference),
        None => router.generate_for(router.sites(), &route, &params, reference),
    };
    match generated {
        Ok(url) => {
            metrics::record_generate(true);
            Json(GeneratedUrl { route, url }).into_response()
        }
        Err(e) => {
            metrics::record_generate(false);
            tracing::debug!(route = %route, error = %e, "Generation failed");
            e.into_response()
        }
    }
}
