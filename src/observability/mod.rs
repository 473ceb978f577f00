//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers, callers and middleware produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID (`x-request-id`) attached to every request span
//! - Metrics are cheap and optional

pub mod logging;
pub mod metrics;
