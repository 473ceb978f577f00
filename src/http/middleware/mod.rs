//! Per-route middleware.

pub mod cors;
pub mod metrics;

pub use cors::{cors_middleware, CorsPolicy};
pub use metrics::track_metrics;
