//! Downstream callers for the planner and RAG services.
//!
//! # Data Flow
//! ```text
//! handler
//!     → PlannerCaller / RagCaller (fixed per-call deadline)
//!     → resilience::timeouts::call_with_deadline
//!     → PlannerRpc / RagRpc (tonic client in production, stubs in tests)
//!     → raw RPC response or DownstreamError
//! ```
//!
//! # Design Decisions
//! - One long-lived channel per service, cloned per call, never mutated
//! - Every call is deadline-bound; expiry drops (cancels) the in-flight RPC
//! - No retries: a single failure is surfaced immediately

pub mod planner;
pub mod rag;

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tonic::Status;

use crate::config::TimeoutConfig;

pub use planner::{PlannerCaller, PlannerRpc};
pub use rag::{RagCaller, RagRpc};

pub const PLANNER: &str = "planner";
pub const RAG: &str = "rag";

/// Why a downstream call did not produce a usable response.
#[derive(Debug, Error)]
pub enum DownstreamError {
    #[error("{service}.{method} exceeded its {}ms deadline", .deadline.as_millis())]
    DeadlineExceeded {
        service: &'static str,
        method: &'static str,
        deadline: Duration,
    },

    #[error("{service}.{method} failed: {status}")]
    Rpc {
        service: &'static str,
        method: &'static str,
        #[source]
        status: Status,
    },

    #[error("{service}.{method} reported an error: {message}")]
    Reported {
        service: &'static str,
        method: &'static str,
        message: String,
    },
}

impl DownstreamError {
    pub fn service(&self) -> &'static str {
        match self {
            Self::DeadlineExceeded { service, .. }
            | Self::Rpc { service, .. }
            | Self::Reported { service, .. } => service,
        }
    }

    /// Metric label for the failure class.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::DeadlineExceeded { .. } => "deadline_exceeded",
            Self::Rpc { .. } => "rpc_error",
            Self::Reported { .. } => "reported_error",
        }
    }

    /// Message safe to show a client; never contains transport details.
    pub fn client_message(&self) -> String {
        format!("{} service unavailable", self.service())
    }
}

/// Callers for every downstream service, shared by all request tasks.
#[derive(Clone)]
pub struct Downstreams {
    pub planner: PlannerCaller,
    pub rag: RagCaller,
}

impl Downstreams {
    pub fn new(planner: Arc<dyn PlannerRpc>, rag: Arc<dyn RagRpc>, timeouts: &TimeoutConfig) -> Self {
        Self {
            planner: PlannerCaller::new(planner, timeouts.solve(), timeouts.health()),
            rag: RagCaller::new(rag, timeouts),
        }
    }
}
