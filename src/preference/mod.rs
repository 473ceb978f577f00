//! Preference storage between `POST /api/userpreference/` and `POST /api/solve/`.
//!
//! # Design Decisions
//! - In-memory only; nothing survives a restart
//! - One slot per session key, last write wins within a slot
//! - Requests without `X-Session-Id` share a single slot

pub mod store;

pub use store::{PreferenceStore, SessionKey, SESSION_HEADER};
