//! Planner caller.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tonic::Status;

use crate::downstream::{DownstreamError, PLANNER};
use crate::proto::planner::{self as pb, PlannerServiceClient};
use crate::resilience::call_with_deadline;

/// The planner RPC surface the gateway depends on.
#[async_trait]
pub trait PlannerRpc: Send + Sync {
    async fn solve(&self, request: pb::SolveRequest) -> Result<pb::SolveResponse, Status>;

    async fn health(&self) -> Result<pb::HealthResponse, Status>;
}

#[async_trait]
impl PlannerRpc for PlannerServiceClient {
    async fn solve(&self, request: pb::SolveRequest) -> Result<pb::SolveResponse, Status> {
        PlannerServiceClient::solve(&mut self.clone(), request).await
    }

    async fn health(&self) -> Result<pb::HealthResponse, Status> {
        PlannerServiceClient::health(&mut self.clone()).await
    }
}

/// Calls the planner with fixed deadlines.
#[derive(Clone)]
pub struct PlannerCaller {
    rpc: Arc<dyn PlannerRpc>,
    solve_deadline: Duration,
    health_deadline: Duration,
}

impl PlannerCaller {
    pub fn new(rpc: Arc<dyn PlannerRpc>, solve_deadline: Duration, health_deadline: Duration) -> Self {
        Self {
            rpc,
            solve_deadline,
            health_deadline,
        }
    }

    pub fn solve_deadline(&self) -> Duration {
        self.solve_deadline
    }

    /// `Solve`. A response with `status: "error"` is a planner verdict
    /// (e.g. infeasible constraints) and is returned as `Ok`.
    pub async fn solve(&self, request: pb::SolveRequest) -> Result<pb::SolveResponse, DownstreamError> {
        call_with_deadline(PLANNER, "Solve", self.solve_deadline, self.rpc.solve(request)).await
    }

    pub async fn health(&self) -> Result<(), DownstreamError> {
        call_with_deadline(PLANNER, "Health", self.health_deadline, self.rpc.health())
            .await
            .map(|_| ())
    }
}
