//! Startup orchestration.
//!
//! # Responsibilities
//! - Establish the planner and RAG channels before traffic is accepted
//! - Build the downstream callers with their configured deadlines
//!
//! # Design Decisions
//! - Fail fast: an unreachable downstream at startup is fatal
//! - Channels are created once and shared for the process lifetime

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tonic::transport::{Channel, Endpoint};

use crate::config::GatewayConfig;
use crate::downstream::{Downstreams, PLANNER, RAG};
use crate::proto::planner::PlannerServiceClient;
use crate::proto::rag::RagServiceClient;

/// Unrecoverable startup failure.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid {service} address '{address}': {source}")]
    InvalidAddress {
        service: &'static str,
        address: String,
        #[source]
        source: tonic::transport::Error,
    },

    #[error("failed to connect to {service} at {address}: {source}")]
    Connect {
        service: &'static str,
        address: String,
        #[source]
        source: tonic::transport::Error,
    },
}

/// Connect to both downstream services and build their callers.
pub async fn connect_downstreams(config: &GatewayConfig) -> Result<Downstreams, StartupError> {
    let connect_timeout = Duration::from_secs(config.downstream.connect_timeout_secs);

    let planner = connect(PLANNER, &config.downstream.planner_address, connect_timeout).await?;
    let rag = connect(RAG, &config.downstream.rag_address, connect_timeout).await?;

    Ok(Downstreams::new(
        Arc::new(PlannerServiceClient::new(planner)),
        Arc::new(RagServiceClient::new(rag)),
        &config.timeouts,
    ))
}

async fn connect(
    service: &'static str,
    address: &str,
    connect_timeout: Duration,
) -> Result<Channel, StartupError> {
    let endpoint = Endpoint::from_shared(address.to_string())
        .map_err(|source| StartupError::InvalidAddress {
            service,
            address: address.to_string(),
            source,
        })?
        .connect_timeout(connect_timeout);

    let channel = endpoint
        .connect()
        .await
        .map_err(|source| StartupError::Connect {
            service,
            address: address.to_string(),
            source,
        })?;

    tracing::info!(service, address, "Downstream connected");
    Ok(channel)
}
