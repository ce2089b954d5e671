//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Server and functions produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (text or JSON lines)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID attached to every request span
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
