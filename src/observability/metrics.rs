//! Metrics collection and exposition.
//!
//! # Metrics
//! - `site_router_requests_total` (counter): requests by locale and outcome
//! - `site_router_request_duration_seconds` (histogram): resolution latency
//! - `site_router_generate_total` (counter): URL generations by outcome
//! - `site_router_routes` (gauge): routes compiled per locale
//! - `site_router_reloads_total` (counter): config reloads by outcome
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Labels stay low-cardinality (locale, outcome); never the path

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::routing::SiteAwareRouter;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one resolved request.
pub fn record_request(locale: &str, matched: bool, start: Instant) {
    let outcome = if matched { "matched" } else { "not_found" };
    metrics::counter!(
        "site_router_requests_total",
        "locale" => locale.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("site_router_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_generate(ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    metrics::counter!("site_router_generate_total", "outcome" => outcome).increment(1);
}

pub fn record_reload(ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    metrics::counter!("site_router_reloads_total", "outcome" => outcome).increment(1);
}

/// Publish the per-locale route counts of a freshly built router.
pub fn record_routes(router: &SiteAwareRouter) {
    for locale in router.partitioner().locales() {
        metrics::gauge!("site_router_routes", "locale" => locale.clone())
            .set(router.compiled_routes(locale) as f64);
    }
    metrics::gauge!("site_router_routes", "locale" => "neutral")
        .set(router.partitioner().neutral_collection().len() as f64);
}
