//! RAG query, course-info and recommendation mappers.
//!
//! Defaults applied before a request leaves the gateway:
//!
//! | Field                     | Applies when          | Value        |
//! |---------------------------|-----------------------|--------------|
//! | `QueryRequest.max_results`  | absent or `<= 0`      | `5`          |
//! | `RecommendRequest.max_credits` | absent or `<= 0`   | `15`         |
//! | `RecommendRequest.level`    | absent or blank       | `"undergrad"` |
//! | `RecommendRequest.term`     | absent                | `""`         |

use crate::mapping::{narrow, non_empty, MappingError};
use crate::model::{
    CourseInfoQuery, CourseInfoResult, MeetingTime, RagAnswer, RagQuery, RecommendQuery,
    RecommendResult, RecommendedCourse, SourceDoc,
};
use crate::proto::rag as pb;

pub const DEFAULT_MAX_RESULTS: i32 = 5;
pub const DEFAULT_MAX_CREDITS: i32 = 15;
pub const DEFAULT_LEVEL: &str = "undergrad";

/// Positive values pass through; anything else falls back to `default`.
fn positive_or(field: &str, value: Option<i64>, default: i32) -> Result<i32, MappingError> {
    match value {
        Some(v) if v > 0 => narrow(field, v),
        _ => Ok(default),
    }
}

pub fn normalize_max_results(max_results: Option<i64>) -> Result<i32, MappingError> {
    positive_or("max_results", max_results, DEFAULT_MAX_RESULTS)
}

pub fn to_query_request(query: &RagQuery) -> Result<pb::QueryRequest, MappingError> {
    Ok(pb::QueryRequest {
        question: query.question.clone(),
        max_results: normalize_max_results(query.max_results)?,
    })
}

pub fn from_query_response(resp: pb::QueryResponse) -> RagAnswer {
    RagAnswer {
        answer: resp.answer,
        sources: resp
            .sources
            .into_iter()
            .map(|s| SourceDoc {
                course_code: s.course_code,
                course_name: s.course_name,
                content: s.content,
                relevance_score: s.relevance_score,
            })
            .collect(),
        error_message: non_empty(resp.error_message),
    }
}

pub fn to_course_info_request(query: &CourseInfoQuery) -> pb::CourseInfoRequest {
    pb::CourseInfoRequest {
        course_code: query.course_code.clone(),
    }
}

pub fn from_course_info_response(resp: pb::CourseInfoResponse) -> CourseInfoResult {
    CourseInfoResult {
        found: resp.found,
        course_code: resp.course_code,
        course_name: resp.course_name,
        description: resp.description,
        prerequisites: resp.prerequisites,
        credits: resp.credits.into(),
        department: resp.department,
        instructors: resp.instructors,
        meeting_times: resp
            .meeting_times
            .into_iter()
            .map(|mt| MeetingTime {
                days: mt.days,
                time_begin: mt.time_begin,
                time_end: mt.time_end,
                building: mt.building,
                room: mt.room,
            })
            .collect(),
        error_message: non_empty(resp.error_message),
    }
}

pub fn to_recommend_request(query: &RecommendQuery) -> Result<pb::RecommendRequest, MappingError> {
    let level = query
        .level
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(DEFAULT_LEVEL);

    Ok(pb::RecommendRequest {
        completed_courses: query.completed_courses.clone(),
        interests: query.interests.clone(),
        max_credits: positive_or("max_credits", query.max_credits, DEFAULT_MAX_CREDITS)?,
        term: query.term.clone().unwrap_or_default(),
        level: level.to_string(),
    })
}

pub fn from_recommend_response(resp: pb::RecommendResponse) -> RecommendResult {
    RecommendResult {
        courses: resp
            .courses
            .into_iter()
            .map(|c| RecommendedCourse {
                course_code: c.course_code,
                course_name: c.course_name,
                credits: c.credits.into(),
                description: c.description,
                score: c.score,
                prerequisites: c.prerequisites,
            })
            .collect(),
        total_credits: resp.total_credits.into(),
        explanation: resp.explanation,
        error_message: non_empty(resp.error_message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(question: &str, max_results: Option<i64>) -> RagQuery {
        RagQuery {
            question: question.to_string(),
            max_results,
        }
    }

    #[test]
    fn test_positive_max_results_pass_through() {
        for m in [1, 3, 5, 20, i64::from(i32::MAX)] {
            let request = to_query_request(&query("What is COP3502?", Some(m))).unwrap();
            assert_eq!(i64::from(request.max_results), m);
            assert_eq!(request.question, "What is COP3502?");
        }
    }

    #[test]
    fn test_absent_or_non_positive_max_results_default_to_five() {
        for m in [None, Some(0), Some(-1), Some(i64::MIN)] {
            let request = to_query_request(&query("q", m)).unwrap();
            assert_eq!(request.max_results, DEFAULT_MAX_RESULTS);
        }
    }

    #[test]
    fn test_oversized_max_results_is_a_mapping_error() {
        let err = to_query_request(&query("q", Some(i64::from(i32::MAX) + 1))).unwrap_err();
        assert_eq!(err.field, "max_results");
    }

    #[test]
    fn test_query_response_keeps_source_order() {
        let answer = from_query_response(pb::QueryResponse {
            answer: "Take COP3502 first.".into(),
            sources: vec![
                pb::SourceDocument {
                    course_code: "COP3502".into(),
                    course_name: "Programming Fundamentals 1".into(),
                    content: "Introduction to programming".into(),
                    relevance_score: 0.9,
                },
                pb::SourceDocument {
                    course_code: "COP3503".into(),
                    relevance_score: 0.4,
                    ..Default::default()
                },
            ],
            error_message: String::new(),
        });

        let codes: Vec<_> = answer.sources.iter().map(|s| s.course_code.as_str()).collect();
        assert_eq!(codes, vec!["COP3502", "COP3503"]);
        assert_eq!(answer.error_message, None);
    }

    #[test]
    fn test_course_info_mapping() {
        let result = from_course_info_response(pb::CourseInfoResponse {
            found: true,
            course_code: "COP3502".into(),
            course_name: "Programming Fundamentals 1".into(),
            credits: 3,
            instructors: vec!["A. Gator".into()],
            meeting_times: vec![pb::MeetingTime {
                days: vec!["M".into(), "W".into(), "F".into()],
                time_begin: "10:40 AM".into(),
                time_end: "11:30 AM".into(),
                building: "CSE".into(),
                room: "E119".into(),
            }],
            ..Default::default()
        });

        assert!(result.found);
        assert_eq!(result.credits, 3);
        assert_eq!(result.meeting_times[0].days, vec!["M", "W", "F"]);
        assert_eq!(result.meeting_times[0].room, "E119");
    }

    #[test]
    fn test_course_not_found_keeps_message() {
        let result = from_course_info_response(pb::CourseInfoResponse {
            found: false,
            error_message: "Course not found".into(),
            ..Default::default()
        });
        assert!(!result.found);
        assert!(result.meeting_times.is_empty());
        assert_eq!(result.error_message.as_deref(), Some("Course not found"));
    }

    #[test]
    fn test_recommend_defaults() {
        let request = to_recommend_request(&RecommendQuery {
            completed_courses: vec!["COP3502".into()],
            interests: vec!["machine learning".into()],
            max_credits: Some(0),
            term: None,
            level: Some("  ".into()),
        })
        .unwrap();

        assert_eq!(request.max_credits, DEFAULT_MAX_CREDITS);
        assert_eq!(request.level, DEFAULT_LEVEL);
        assert_eq!(request.term, "");
        assert_eq!(request.completed_courses, vec!["COP3502"]);
    }

    #[test]
    fn test_recommend_explicit_values_win() {
        let request = to_recommend_request(&RecommendQuery {
            max_credits: Some(9),
            term: Some("Fall 2025".into()),
            level: Some("grad".into()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(request.max_credits, 9);
        assert_eq!(request.term, "Fall 2025");
        assert_eq!(request.level, "grad");
    }
}
