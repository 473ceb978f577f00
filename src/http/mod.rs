//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request id, trace, limits, timeout)
//!     → middleware/cors.rs (CORS headers, preflight short-circuit)
//!     → method check (axum method router, 405)
//!     → handlers.rs (decode → map → call downstream → map)
//!     → response.rs (status code + JSON body, error translation)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use response::{ApiError, ErrorPayload, Reply};
pub use server::{AppState, HttpServer};
