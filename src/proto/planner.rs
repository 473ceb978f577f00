//! Messages and client for `planner.PlannerService`.

use std::collections::HashMap;

use tonic::transport::Channel;
use tonic::Status;

use super::unary;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PeriodList {
    #[prost(int32, repeated, tag = "1")]
    pub periods: Vec<i32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UserPreference {
    #[prost(int32, tag = "1")]
    pub x: i32,
    #[prost(int32, tag = "2")]
    pub y: i32,
    #[prost(int32, tag = "3")]
    pub z: i32,
    #[prost(int32, tag = "4")]
    pub min_credits: i32,
    #[prost(int32, tag = "5")]
    pub max_credits: i32,
    #[prost(map = "string, message", tag = "6")]
    pub blacklisted_periods: HashMap<String, PeriodList>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SolveRequest {
    #[prost(message, optional, tag = "1")]
    pub preference: Option<UserPreference>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ScheduledCourse {
    #[prost(string, tag = "1")]
    pub course_id: String,
    #[prost(string, tag = "2")]
    pub course_name: String,
    #[prost(int32, tag = "3")]
    pub credits: i32,
    #[prost(string, tag = "4")]
    pub day: String,
    #[prost(int32, tag = "5")]
    pub period: i32,
    #[prost(string, tag = "6")]
    pub course_type: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SolveResponse {
    #[prost(string, tag = "1")]
    pub status: String,
    #[prost(message, repeated, tag = "2")]
    pub scheduled_courses: Vec<ScheduledCourse>,
    #[prost(int32, tag = "3")]
    pub total_credits: i32,
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

const SERVICE: &str = "planner.PlannerService";

/// Unary client for the planner service over a shared tonic channel.
///
/// Cloning is cheap; every clone multiplexes over the same connection.
#[derive(Debug, Clone)]
pub struct PlannerServiceClient {
    inner: tonic::client::Grpc<Channel>,
}

impl PlannerServiceClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    pub async fn solve(&mut self, request: SolveRequest) -> Result<SolveResponse, Status> {
        unary(&mut self.inner, SERVICE, "Solve", "/planner.PlannerService/Solve", request).await
    }

    pub async fn health(&mut self) -> Result<HealthResponse, Status> {
        unary(
            &mut self.inner,
            SERVICE,
            "Health",
            "/planner.PlannerService/Health",
            HealthRequest {},
        )
        .await
    }
}
