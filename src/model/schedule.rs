//! Solve results returned to the browser client.

use serde::{Deserialize, Serialize};

/// Planner outcome. `status` is `"success"` or `"error"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResult {
    pub status: String,
    #[serde(default)]
    pub scheduled_courses: Vec<ScheduledCourse>,
    #[serde(default)]
    pub total_credits: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// One meeting slot of a scheduled course section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledCourse {
    pub course_id: String,
    pub course_name: String,
    pub credits: i64,
    pub day: String,
    pub period: i64,
    /// `major`, `minor` or `elective`.
    pub course_type: String,
}
