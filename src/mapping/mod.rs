//! Converters between the public JSON contract and the RPC schema.
//!
//! # Data Flow
//! ```text
//! model::* (JSON, i64)
//!     → planner.rs / rag.rs request mappers (narrowing, defaulting)
//!     → proto::* (protobuf, i32)
//!     → downstream call
//!     → planner.rs / rag.rs response mappers (widening)
//!     → model::*
//! ```
//!
//! # Design Decisions
//! - Mappers are pure: no I/O, no shared state
//! - Narrowing never truncates; an out-of-range value is a [`MappingError`]
//! - Empty RPC strings for optional fields map to absent JSON fields

pub mod planner;
pub mod rag;

use thiserror::Error;

/// A public value that cannot be represented in the RPC schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} value {value} does not fit in a 32-bit integer")]
pub struct MappingError {
    pub field: String,
    pub value: i64,
}

pub(crate) fn narrow(field: impl Into<String>, value: i64) -> Result<i32, MappingError> {
    i32::try_from(value).map_err(|_| MappingError {
        field: field.into(),
        value,
    })
}

pub(crate) fn non_empty(message: String) -> Option<String> {
    if message.is_empty() {
        None
    } else {
        Some(message)
    }
}
