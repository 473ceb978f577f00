//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Downstream gRPC service addresses.
    pub downstream: DownstreamConfig,

    /// Per-route deadlines and the outer request timeout.
    pub timeouts: TimeoutConfig,

    /// Cross-origin settings.
    pub cors: CorsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Request limits.
    pub security: SecurityConfig,

    /// Bounds on per-session preference slots.
    pub sessions: SessionConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Addresses of the planner and RAG services.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DownstreamConfig {
    /// Planner gRPC endpoint (e.g., "http://planner:50051").
    pub planner_address: String,

    /// RAG gRPC endpoint (e.g., "http://rag:50052").
    pub rag_address: String,

    /// Timeout for establishing the initial connection, in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for DownstreamConfig {
    fn default() -> Self {
        Self {
            planner_address: "http://localhost:50051".to_string(),
            rag_address: "http://localhost:50052".to_string(),
            connect_timeout_secs: 5,
        }
    }
}

/// Timeout configuration. Every downstream call has a deadline.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Planner `Solve` deadline in seconds.
    pub solve_secs: u64,

    /// RAG `Query` deadline in seconds.
    pub rag_query_secs: u64,

    /// RAG `GetCourseInfo` deadline in seconds.
    pub rag_course_secs: u64,

    /// RAG `Recommend` deadline in seconds.
    pub rag_recommend_secs: u64,

    /// Deadline for downstream `Health` probes in seconds.
    pub health_secs: u64,

    /// Outer timeout for a whole HTTP request in seconds.
    pub request_secs: u64,
}

impl TimeoutConfig {
    pub fn solve(&self) -> Duration {
        Duration::from_secs(self.solve_secs)
    }

    pub fn rag_query(&self) -> Duration {
        Duration::from_secs(self.rag_query_secs)
    }

    pub fn rag_course(&self) -> Duration {
        Duration::from_secs(self.rag_course_secs)
    }

    pub fn rag_recommend(&self) -> Duration {
        Duration::from_secs(self.rag_recommend_secs)
    }

    pub fn health(&self) -> Duration {
        Duration::from_secs(self.health_secs)
    }

    /// Longest per-route deadline; the outer request timeout must exceed it.
    pub fn longest_route_deadline_secs(&self) -> u64 {
        [
            self.solve_secs,
            self.rag_query_secs,
            self.rag_course_secs,
            self.rag_recommend_secs,
            self.health_secs,
        ]
        .into_iter()
        .max()
        .unwrap_or_default()
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            solve_secs: 30,
            rag_query_secs: 60,
            rag_course_secs: 10,
            rag_recommend_secs: 60,
            health_secs: 5,
            request_secs: 90,
        }
    }
}

/// Cross-origin configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Preflight cache duration advertised via `Access-Control-Max-Age`.
    pub max_age_secs: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            max_age_secs: 86_400,
        }
    }
}

/// Limits on the preference slots created by `X-Session-Id`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Most session slots held at once; the least recently written is evicted first.
    pub max_sessions: usize,

    /// A session slot not written for this long is dropped.
    pub idle_ttl_secs: u64,
}

impl SessionConfig {
    pub fn idle_ttl(&self) -> Duration {
        Duration::from_secs(self.idle_ttl_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sessions: 1024,
            idle_ttl_secs: 86_400,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}
