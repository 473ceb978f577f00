//! Course gateway library.
//!
//! HTTP/JSON front door for the planner and RAG gRPC services.

pub mod config;
pub mod downstream;
pub mod http;
pub mod lifecycle;
pub mod mapping;
pub mod model;
pub mod observability;
pub mod preference;
pub mod proto;
pub mod resilience;

pub use config::GatewayConfig;
pub use downstream::Downstreams;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
