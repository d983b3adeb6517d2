//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → SiteRouterConfig (validated, immutable)
//!     → SiteAwareRouter built from it, shared via ArcSwap
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → new router generation built and swapped in atomically
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All sections have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{ConfigError, load_config, parse_config};
pub use schema::SiteRouterConfig;
pub use schema::{AdminConfig, I18nConfig, ListenerConfig, LogFormat, ObservabilityConfig};
pub use schema::{RouteConfig, SiteConfig, TimeoutConfig};
pub use validation::ValidationError;
