//! Downstream readiness report served by `GET /health/ready`.

use serde::{Deserialize, Serialize};

pub const STATUS_OK: &str = "ok";
pub const STATUS_UNAVAILABLE: &str = "unavailable";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessReport {
    /// `ok` when every downstream answered its health probe.
    pub status: String,
    pub planner: String,
    pub rag: String,
}

impl ReadinessReport {
    pub fn new(planner_ok: bool, rag_ok: bool) -> Self {
        let label = |ok: bool| if ok { STATUS_OK } else { STATUS_UNAVAILABLE }.to_string();
        Self {
            status: label(planner_ok && rag_ok),
            planner: label(planner_ok),
            rag: label(rag_ok),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == STATUS_OK
    }
}
