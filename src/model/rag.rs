//! Course-knowledge queries and answers.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/rag/query/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RagQuery {
    pub question: String,
    pub max_results: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RagAnswer {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<SourceDoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// A retrieved passage backing an answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceDoc {
    pub course_code: String,
    pub course_name: String,
    /// Excerpt of the matched document.
    pub content: String,
    /// In `[0, 1]`.
    pub relevance_score: f32,
}

/// Body of `POST /api/rag/course/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseInfoQuery {
    pub course_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseInfoResult {
    pub found: bool,
    pub course_code: String,
    pub course_name: String,
    pub description: String,
    pub prerequisites: String,
    pub credits: i64,
    pub department: String,
    pub instructors: Vec<String>,
    pub meeting_times: Vec<MeetingTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeetingTime {
    pub days: Vec<String>,
    pub time_begin: String,
    pub time_end: String,
    pub building: String,
    pub room: String,
}

/// Body of `POST /api/rag/recommend/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendQuery {
    pub completed_courses: Vec<String>,
    pub interests: Vec<String>,
    pub max_credits: Option<i64>,
    pub term: Option<String>,
    pub level: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendResult {
    pub courses: Vec<RecommendedCourse>,
    pub total_credits: i64,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendedCourse {
    pub course_code: String,
    pub course_name: String,
    pub credits: i64,
    pub description: String,
    pub score: f32,
    pub prerequisites: String,
}
