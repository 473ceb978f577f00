//! Messages and client for `rag.RAGService`.

use tonic::transport::Channel;
use tonic::Status;

use super::unary;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QueryRequest {
    #[prost(string, tag = "1")]
    pub question: String,
    #[prost(int32, tag = "2")]
    pub max_results: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SourceDocument {
    #[prost(string, tag = "1")]
    pub course_code: String,
    #[prost(string, tag = "2")]
    pub course_name: String,
    #[prost(string, tag = "3")]
    pub content: String,
    #[prost(float, tag = "4")]
    pub relevance_score: f32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QueryResponse {
    #[prost(string, tag = "1")]
    pub answer: String,
    #[prost(message, repeated, tag = "2")]
    pub sources: Vec<SourceDocument>,
    #[prost(string, tag = "3")]
    pub error_message: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CourseInfoRequest {
    #[prost(string, tag = "1")]
    pub course_code: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MeetingTime {
    #[prost(string, repeated, tag = "1")]
    pub days: Vec<String>,
    #[prost(string, tag = "2")]
    pub time_begin: String,
    #[prost(string, tag = "3")]
    pub time_end: String,
    #[prost(string, tag = "4")]
    pub building: String,
    #[prost(string, tag = "5")]
    pub room: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CourseInfoResponse {
    #[prost(bool, tag = "1")]
    pub found: bool,
    #[prost(string, tag = "2")]
    pub course_code: String,
    #[prost(string, tag = "3")]
    pub course_name: String,
    #[prost(string, tag = "4")]
    pub description: String,
    #[prost(string, tag = "5")]
    pub prerequisites: String,
    #[prost(int32, tag = "6")]
    pub credits: i32,
    #[prost(string, tag = "7")]
    pub department: String,
    #[prost(string, repeated, tag = "8")]
    pub instructors: Vec<String>,
    #[prost(message, repeated, tag = "9")]
    pub meeting_times: Vec<MeetingTime>,
    #[prost(string, tag = "10")]
    pub error_message: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RecommendRequest {
    #[prost(string, repeated, tag = "1")]
    pub completed_courses: Vec<String>,
    #[prost(string, repeated, tag = "2")]
    pub interests: Vec<String>,
    #[prost(int32, tag = "3")]
    pub max_credits: i32,
    #[prost(string, tag = "4")]
    pub term: String,
    #[prost(string, tag = "5")]
    pub level: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RecommendedCourse {
    #[prost(string, tag = "1")]
    pub course_code: String,
    #[prost(string, tag = "2")]
    pub course_name: String,
    #[prost(int32, tag = "3")]
    pub credits: i32,
    #[prost(string, tag = "4")]
    pub description: String,
    #[prost(float, tag = "5")]
    pub score: f32,
    #[prost(string, tag = "6")]
    pub prerequisites: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RecommendResponse {
    #[prost(message, repeated, tag = "1")]
    pub courses: Vec<RecommendedCourse>,
    #[prost(int32, tag = "2")]
    pub total_credits: i32,
    #[prost(string, tag = "3")]
    pub explanation: String,
    #[prost(string, tag = "4")]
    pub error_message: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HealthRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HealthResponse {
    #[prost(string, tag = "1")]
    pub status: String,
}

const SERVICE: &str = "rag.RAGService";

/// Unary client for the RAG service over a shared tonic channel.
#[derive(Debug, Clone)]
pub struct RagServiceClient {
    inner: tonic::client::Grpc<Channel>,
}

impl RagServiceClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    pub async fn query(&mut self, request: QueryRequest) -> Result<QueryResponse, Status> {
        unary(&mut self.inner, SERVICE, "Query", "/rag.RAGService/Query", request).await
    }

    pub async fn get_course_info(
        &mut self,
        request: CourseInfoRequest,
    ) -> Result<CourseInfoResponse, Status> {
        unary(
            &mut self.inner,
            SERVICE,
            "GetCourseInfo",
            "/rag.RAGService/GetCourseInfo",
            request,
        )
        .await
    }

    pub async fn recommend(
        &mut self,
        request: RecommendRequest,
    ) -> Result<RecommendResponse, Status> {
        unary(
            &mut self.inner,
            SERVICE,
            "Recommend",
            "/rag.RAGService/Recommend",
            request,
        )
        .await
    }

    pub async fn health(&mut self) -> Result<HealthResponse, Status> {
        unary(
            &mut self.inner,
            SERVICE,
            "Health",
            "/rag.RAGService/Health",
            HealthRequest {},
        )
        .await
    }
}
