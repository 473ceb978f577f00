//! RAG caller.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tonic::Status;

use crate::config::TimeoutConfig;
use crate::downstream::{DownstreamError, RAG};
use crate::proto::rag::{self as pb, RagServiceClient};
use crate::resilience::call_with_deadline;

/// Client-facing message for a course lookup that came back with an error.
pub const COURSE_NOT_FOUND: &str = "course not found";

/// The RAG RPC surface the gateway depends on.
#[async_trait]
pub trait RagRpc: Send + Sync {
    async fn query(&self, request: pb::QueryRequest) -> Result<pb::QueryResponse, Status>;

    async fn get_course_info(
        &self,
        request: pb::CourseInfoRequest,
    ) -> Result<pb::CourseInfoResponse, Status>;

    async fn recommend(&self, request: pb::RecommendRequest) -> Result<pb::RecommendResponse, Status>;

    async fn health(&self) -> Result<pb::HealthResponse, Status>;
}

#[async_trait]
impl RagRpc for RagServiceClient {
    async fn query(&self, request: pb::QueryRequest) -> Result<pb::QueryResponse, Status> {
        RagServiceClient::query(&mut self.clone(), request).await
    }

    async fn get_course_info(
        &self,
        request: pb::CourseInfoRequest,
    ) -> Result<pb::CourseInfoResponse, Status> {
        RagServiceClient::get_course_info(&mut self.clone(), request).await
    }

    async fn recommend(&self, request: pb::RecommendRequest) -> Result<pb::RecommendResponse, Status> {
        RagServiceClient::recommend(&mut self.clone(), request).await
    }

    async fn health(&self) -> Result<pb::HealthResponse, Status> {
        RagServiceClient::health(&mut self.clone()).await
    }
}

/// Calls the RAG service with fixed per-method deadlines.
#[derive(Clone)]
pub struct RagCaller {
    rpc: Arc<dyn RagRpc>,
    query_deadline: Duration,
    course_deadline: Duration,
    recommend_deadline: Duration,
    health_deadline: Duration,
}

impl RagCaller {
    pub fn new(rpc: Arc<dyn RagRpc>, timeouts: &TimeoutConfig) -> Self {
        Self {
            rpc,
            query_deadline: timeouts.rag_query(),
            course_deadline: timeouts.rag_course(),
            recommend_deadline: timeouts.rag_recommend(),
            health_deadline: timeouts.health(),
        }
    }

    /// `Query`. A non-empty `error_message` in the response is a failure.
    pub async fn query(&self, request: pb::QueryRequest) -> Result<pb::QueryResponse, DownstreamError> {
        let response =
            call_with_deadline(RAG, "Query", self.query_deadline, self.rpc.query(request)).await?;
        reported(&response.error_message, "Query")?;
        Ok(response)
    }

    /// `GetCourseInfo`. `found: false` is an answer, not a failure. The
    /// service's own `error_message` is logged and replaced with
    /// [`COURSE_NOT_FOUND`].
    pub async fn get_course_info(
        &self,
        request: pb::CourseInfoRequest,
    ) -> Result<pb::CourseInfoResponse, DownstreamError> {
        let course_code = request.course_code.clone();
        let mut response = call_with_deadline(
            RAG,
            "GetCourseInfo",
            self.course_deadline,
            self.rpc.get_course_info(request),
        )
        .await?;

        if !response.error_message.is_empty() {
            tracing::warn!(
                course_code = %course_code,
                found = response.found,
                error = %response.error_message,
                "RAG reported a course lookup error"
            );
            response.error_message = COURSE_NOT_FOUND.to_string();
        }
        Ok(response)
    }

    /// `Recommend`. A non-empty `error_message` in the response is a failure.
    pub async fn recommend(
        &self,
        request: pb::RecommendRequest,
    ) -> Result<pb::RecommendResponse, DownstreamError> {
        let response = call_with_deadline(
            RAG,
            "Recommend",
            self.recommend_deadline,
            self.rpc.recommend(request),
        )
        .await?;
        reported(&response.error_message, "Recommend")?;
        Ok(response)
    }

    pub async fn health(&self) -> Result<(), DownstreamError> {
        call_with_deadline(RAG, "Health", self.health_deadline, self.rpc.health())
            .await
            .map(|_| ())
    }
}

fn reported(error_message: &str, method: &'static str) -> Result<(), DownstreamError> {
    if error_message.is_empty() {
        Ok(())
    } else {
        Err(DownstreamError::Reported {
            service: RAG,
            method,
            message: error_message.to_string(),
        })
    }
}
