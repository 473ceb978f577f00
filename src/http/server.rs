//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (CORS, metrics, tracing, limits, request ID)
//! - Bind server to listener
//! - Stop accepting on shutdown and drain in-flight requests

use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::downstream::Downstreams;
use crate::http::handlers;
use crate::http::middleware::{cors_middleware, track_metrics, CorsPolicy};
use crate::http::request::{make_request_span, UuidRequestId};
use crate::preference::PreferenceStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub preferences: PreferenceStore,
    pub downstreams: Downstreams,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and downstream callers.
    pub fn new(config: GatewayConfig, downstreams: Downstreams) -> Self {
        let preferences = PreferenceStore::from_config(&config.sessions);
        Self::with_store(config, downstreams, preferences)
    }

    /// Like [`HttpServer::new`], sharing an existing preference store.
    pub fn with_store(
        config: GatewayConfig,
        downstreams: Downstreams,
        preferences: PreferenceStore,
    ) -> Self {
        let state = AppState {
            preferences,
            downstreams,
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let cors = CorsPolicy::new(&config.cors);

        Router::new()
            .route("/", get(handlers::root))
            .route("/health", get(handlers::health))
            .route("/health/ready", get(handlers::ready))
            .route("/api/userpreference/", post(handlers::save_preference))
            .route("/api/solve/", post(handlers::solve))
            .route("/api/rag/query/", post(handlers::rag_query))
            .route("/api/rag/course/", post(handlers::course_info))
            .route("/api/rag/recommend/", post(handlers::recommend))
            .layer(middleware::from_fn(track_metrics))
            .layer(middleware::from_fn_with_state(cors, cors_middleware))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                    .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// The fully layered router, for driving requests without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}
