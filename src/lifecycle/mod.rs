//! Process lifecycle.
//!
//! # Data Flow
//! ```text
//! main.rs serve:
//!     load config → build router → bind → watch config → serve
//!
//! signals.rs:
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! shutdown.rs:
//!     trigger → server stops accepting → in-flight requests finish → exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
