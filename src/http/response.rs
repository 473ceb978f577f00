//! Translation of handler outcomes into HTTP responses.
//!
//! # Responsibilities
//! - Map client, downstream and mapping errors to status codes
//! - Render errors in the shape of each route's success body
//! - Log raw causes; return only client-safe messages
//!
//! # Design Decisions
//! - The only place an error becomes a status code
//! - Downstream failures are 500 with a generic message

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::downstream::DownstreamError;
use crate::mapping::MappingError;
use crate::model::{CourseInfoResult, RagAnswer, RecommendResult, SaveAck, SolveResult};

/// Everything that can stop a route from producing its success body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed body or missing required field.
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Downstream(#[from] DownstreamError),

    /// The request could not be expressed in the RPC schema.
    #[error(transparent)]
    Mapping(#[from] MappingError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Downstream(_) | ApiError::Mapping(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn client_message(&self) -> String {
        match self {
            ApiError::InvalidInput(message) => message.clone(),
            ApiError::Downstream(e) => e.client_message(),
            ApiError::Mapping(e) => format!("failed to translate request: {e}"),
        }
    }
}

/// A success body that can also carry an error message.
pub trait ErrorPayload: Serialize {
    fn from_error(message: String) -> Self;
}

impl ErrorPayload for SaveAck {
    fn from_error(message: String) -> Self {
        SaveAck {
            status: "error".to_string(),
            error_message: Some(message),
        }
    }
}

impl ErrorPayload for SolveResult {
    fn from_error(message: String) -> Self {
        SolveResult {
            status: "error".to_string(),
            scheduled_courses: Vec::new(),
            total_credits: 0,
            error_message: Some(message),
        }
    }
}

impl ErrorPayload for RagAnswer {
    fn from_error(message: String) -> Self {
        RagAnswer {
            error_message: Some(message),
            ..Default::default()
        }
    }
}

impl ErrorPayload for CourseInfoResult {
    fn from_error(message: String) -> Self {
        CourseInfoResult {
            found: false,
            error_message: Some(message),
            ..Default::default()
        }
    }
}

impl ErrorPayload for RecommendResult {
    fn from_error(message: String) -> Self {
        RecommendResult {
            error_message: Some(message),
            ..Default::default()
        }
    }
}

/// Handler outcome rendered as `200` + body or error status + error body.
pub struct Reply<T>(pub Result<T, ApiError>);

impl<T> From<Result<T, ApiError>> for Reply<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        Reply(result)
    }
}

impl<T: ErrorPayload> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        match self.0 {
            Ok(body) => (StatusCode::OK, Json(body)).into_response(),
            Err(err) => {
                match &err {
                    ApiError::InvalidInput(message) => {
                        tracing::debug!(error = %message, "Rejected request")
                    }
                    ApiError::Downstream(e) => {
                        tracing::error!(service = e.service(), error = %e, "Downstream unavailable")
                    }
                    ApiError::Mapping(e) => tracing::error!(error = %e, "Request mapping failed"),
                }
                (err.status(), Json(T::from_error(err.client_message()))).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use std::time::Duration;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_downstream_error_renders_generic_solve_failure() {
        let err = DownstreamError::DeadlineExceeded {
            service: "planner",
            method: "Solve",
            deadline: Duration::from_secs(30),
        };
        let response = Reply::<SolveResult>(Err(err.into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["error_message"], "planner service unavailable");
        assert_eq!(body["scheduled_courses"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_invalid_input_renders_course_not_found() {
        let response = Reply::<CourseInfoResult>(Err(ApiError::InvalidInput(
            "course_code is required".into(),
        )))
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["found"], false);
        assert_eq!(body["error_message"], "course_code is required");
    }

    #[tokio::test]
    async fn test_mapping_error_is_internal() {
        let err = MappingError {
            field: "x".into(),
            value: i64::MAX,
        };
        let response = Reply::<SolveResult>(Err(err.into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
