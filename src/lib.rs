//! Locale-aware route partitioning and site-aware URL matching/generation.

pub mod config;
pub mod http;
pub mod routing;
pub mod lifecycle;
pub mod observability;
pub mod admin;

pub use config::schema::SiteRouterConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{RoutePartitioner, SiteAwareRouter};
