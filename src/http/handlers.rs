//! Route handlers.
//!
//! Each handler decodes its body, runs the request mapper, calls the
//! downstream and maps the response back. Method checks and CORS happen
//! before a handler runs.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::http::response::{ApiError, Reply};
use crate::http::server::AppState;
use crate::mapping;
use crate::model::{
    CourseInfoQuery, CourseInfoResult, RagAnswer, RagQuery, ReadinessReport, RecommendQuery,
    RecommendResult, SaveAck, SolveResult, UserPreference,
};
use crate::preference::SessionKey;

pub const GREETING: &str = "hello from course-gateway";

pub async fn root() -> &'static str {
    GREETING
}

pub async fn health() -> &'static str {
    "ok"
}

/// `GET /health/ready`: probe both downstreams concurrently.
pub async fn ready(State(state): State<AppState>) -> Response {
    let (planner, rag) = tokio::join!(
        state.downstreams.planner.health(),
        state.downstreams.rag.health()
    );
    let report = ReadinessReport::new(planner.is_ok(), rag.is_ok());
    let status = if report.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report)).into_response()
}

/// `POST /api/userpreference/`
pub async fn save_preference(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Reply<SaveAck> {
    let result = decode_json::<UserPreference>(&body).map(|pref| {
        let key = SessionKey::from_headers(&headers);
        tracing::info!(session = ?key, preference = ?pref, "Received user preference");
        state.preferences.save(key, pref);
        SaveAck::saved()
    });
    Reply(result)
}

/// `POST /api/solve/`: solve the stored preference. The body is ignored.
pub async fn solve(State(state): State<AppState>, headers: HeaderMap) -> Reply<SolveResult> {
    Reply(run_solve(&state, SessionKey::from_headers(&headers)).await)
}

async fn run_solve(state: &AppState, key: SessionKey) -> Result<SolveResult, ApiError> {
    let pref = state.preferences.load(&key);
    let request = mapping::planner::to_solve_request(&pref)?;
    let response = state.downstreams.planner.solve(request).await?;
    let result = mapping::planner::from_solve_response(response);
    tracing::info!(
        status = %result.status,
        courses = result.scheduled_courses.len(),
        total_credits = result.total_credits,
        "Planner responded"
    );
    Ok(result)
}

/// `POST /api/rag/query/`
pub async fn rag_query(State(state): State<AppState>, body: Bytes) -> Reply<RagAnswer> {
    Reply(run_rag_query(&state, &body).await)
}

async fn run_rag_query(state: &AppState, body: &Bytes) -> Result<RagAnswer, ApiError> {
    let query: RagQuery = decode_json(body)?;
    require_present(&query.question, "question is required")?;
    let request = mapping::rag::to_query_request(&query)?;
    let response = state.downstreams.rag.query(request).await?;
    Ok(mapping::rag::from_query_response(response))
}

/// `POST /api/rag/course/`
pub async fn course_info(State(state): State<AppState>, body: Bytes) -> Reply<CourseInfoResult> {
    Reply(run_course_info(&state, &body).await)
}

async fn run_course_info(state: &AppState, body: &Bytes) -> Result<CourseInfoResult, ApiError> {
    let query: CourseInfoQuery = decode_json(body)?;
    require_present(&query.course_code, "course_code is required")?;
    let request = mapping::rag::to_course_info_request(&query);
    let response = state.downstreams.rag.get_course_info(request).await?;
    Ok(mapping::rag::from_course_info_response(response))
}

/// `POST /api/rag/recommend/`
pub async fn recommend(State(state): State<AppState>, body: Bytes) -> Reply<RecommendResult> {
    Reply(run_recommend(&state, &body).await)
}

async fn run_recommend(state: &AppState, body: &Bytes) -> Result<RecommendResult, ApiError> {
    let query: RecommendQuery = decode_json(body)?;
    let request = mapping::rag::to_recommend_request(&query)?;
    let response = state.downstreams.rag.recommend(request).await?;
    Ok(mapping::rag::from_recommend_response(response))
}

fn decode_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::InvalidInput(format!("invalid request body: {e}")))
}

fn require_present(value: &str, message: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        Err(ApiError::InvalidInput(message.to_string()))
    } else {
        Ok(())
    }
}
