//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! partition / match / generate / reload
//!     → logging.rs (tracing events, pretty or JSON on stdout)
//!     → metrics.rs (per-locale request counters, route gauges)
//!
//! HTTP requests
//!     → tower-http TraceLayer span, tagged with x-request-id
//! ```
//!
//! Locale and outcome are the only metric labels; paths and route
//! parameters never are.

pub mod logging;
pub mod metrics;
