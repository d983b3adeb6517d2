//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup / reload):
//!     RouteConfig[]
//!     → collection.rs (parse patterns into RouteDefinitions)
//!     → partition.rs (neutral vs localized, aliases, per-locale collections)
//!     → router.rs (compile one matcher per locale)
//!     → Freeze as immutable SiteAwareRouter
//!
//! Incoming Request (path)
//!     → site.rs (which locale owns this path)
//!     → router.rs (match in that locale's table only)
//!     → Return: RouteMatch or NoMatch (404, never a redirect)
//!
//! URL Generation (route, params)
//!     → site.rs (current locale unless `_locale` given)
//!     → partition.rs (alias lookup)
//!     → pattern.rs (substitute placeholders)
//! ```
//!
//! # Design Decisions
//! - Locale is encoded in route names as a trailing `.{locale}` suffix
//! - Deterministic: same input always partitions and matches the same way
//! - No cross-locale fallback

pub mod collection;
pub mod error;
pub mod name;
pub mod partition;
pub mod pattern;
pub mod router;
pub mod site;

pub use collection::{RouteCollection, RouteDefinition};
pub use error::{GenerateError, PatternError};
pub use name::{RouteClass, classify};
pub use partition::RoutePartitioner;
pub use pattern::PathPattern;
pub use router::{LOCALE_PARAM, Parameters, ReferenceType, RouteMatch, SiteAwareRouter};
pub use site::{FixedSite, RequestSite, Site, SiteMap, SiteResolver};
