//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (authority / Host header)
//!     → host.rs (extract first DNS label)
//!     → registry.rs (slug lookup, default fallback)
//!     → Return: Function or DispatchError
//!
//! Registry Compilation (at startup):
//!     FunctionConfig[] + default_function
//!     → lowercase slugs
//!     → Freeze as immutable FunctionRegistry
//! ```
//!
//! # Design Decisions
//! - Registry built at startup, immutable at runtime
//! - Deterministic: same host always resolves to the same function
//! - Explicit miss rather than silent default when no default is configured

pub mod host;
pub mod registry;

pub use host::{host_slug, request_host};
pub use registry::{DispatchError, FunctionRegistry};
