//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check the outer request timeout leaves room for every route deadline
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    for (field, address) in [
        ("downstream.planner_address", &config.downstream.planner_address),
        ("downstream.rag_address", &config.downstream.rag_address),
    ] {
        if !is_grpc_uri(address) {
            errors.push(ValidationError::new(
                field,
                format!("'{address}' must be an http:// or https:// URI"),
            ));
        }
    }

    let timeouts = &config.timeouts;
    for (field, secs) in [
        ("timeouts.solve_secs", timeouts.solve_secs),
        ("timeouts.rag_query_secs", timeouts.rag_query_secs),
        ("timeouts.rag_course_secs", timeouts.rag_course_secs),
        ("timeouts.rag_recommend_secs", timeouts.rag_recommend_secs),
        ("timeouts.health_secs", timeouts.health_secs),
        ("downstream.connect_timeout_secs", config.downstream.connect_timeout_secs),
    ] {
        if secs == 0 {
            errors.push(ValidationError::new(field, "must be greater than zero"));
        }
    }

    let longest = timeouts.longest_route_deadline_secs();
    if timeouts.request_secs <= longest {
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            format!("must exceed the longest route deadline ({longest}s)"),
        ));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new(
            "security.max_body_size",
            "must be greater than zero",
        ));
    }

    if config.sessions.max_sessions == 0 {
        errors.push(ValidationError::new(
            "sessions.max_sessions",
            "must be greater than zero",
        ));
    }
    if config.sessions.idle_ttl_secs == 0 {
        errors.push(ValidationError::new(
            "sessions.idle_ttl_secs",
            "must be greater than zero",
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "'{}' is not a socket address",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_grpc_uri(address: &str) -> bool {
    let Some((scheme, rest)) = address.split_once("://") else {
        return false;
    };
    matches!(scheme, "http" | "https") && !rest.is_empty()
}
