//! Deadline enforcement for downstream calls.
//!
//! # Responsibilities
//! - Wrap each RPC future with its route's deadline
//! - Cancel the RPC cleanly on expiry (the future is dropped)
//! - Classify the outcome and record it
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - A local deadline and a downstream `DEADLINE_EXCEEDED` status are the same error

use std::future::Future;
use std::time::{Duration, Instant};

use tokio::time;
use tonic::{Code, Status};

use crate::downstream::DownstreamError;
use crate::observability::metrics;

/// Run `call` with `deadline`, mapping every failure to a [`DownstreamError`].
pub async fn call_with_deadline<T, F>(
    service: &'static str,
    method: &'static str,
    deadline: Duration,
    call: F,
) -> Result<T, DownstreamError>
where
    F: Future<Output = Result<T, Status>>,
{
    let start = Instant::now();

    let result = match time::timeout(deadline, call).await {
        Ok(Ok(response)) => Ok(response),
        Ok(Err(status)) if status.code() == Code::DeadlineExceeded => {
            Err(DownstreamError::DeadlineExceeded {
                service,
                method,
                deadline,
            })
        }
        Ok(Err(status)) => Err(DownstreamError::Rpc {
            service,
            method,
            status,
        }),
        Err(_) => Err(DownstreamError::DeadlineExceeded {
            service,
            method,
            deadline,
        }),
    };

    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) => e.outcome(),
    };
    metrics::record_downstream_call(service, method, outcome, start);

    match &result {
        Ok(_) => tracing::debug!(
            service,
            method,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Downstream call succeeded"
        ),
        Err(e) => tracing::warn!(
            service,
            method,
            elapsed_ms = start.elapsed().as_millis() as u64,
            error = %e,
            "Downstream call failed"
        ),
    }

    result
}
