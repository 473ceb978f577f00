//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Downstream call:
//!     → timeouts.rs (enforce the per-route deadline)
//!     → On failure: classify, surface immediately (no retries)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - Nothing is retried; the client decides whether to try again

pub mod timeouts;

pub use timeouts::call_with_deadline;
