//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request ID, timeout, CORS)
//! - Bind server to listener and stop on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ProxyConfig;
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::observability::tracing::make_request_span;
use crate::upstream::{Forwarder, ForwarderError};

/// Headroom above the slowest upstream deadline before the server gives up.
const SERVER_TIMEOUT_SLACK_SECS: u64 = 5;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<Forwarder>,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ForwarderError> {
        let state = AppState {
            forwarder: Arc::new(Forwarder::new(&config)?),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let router = Router::new()
            .route("/", get(handlers::root))
            .route("/health", get(handlers::service_status))
            .route("/api/tx", get(handlers::hu))
            .route("/api/cutools/hu/with-key", get(handlers::hu_with_key))
            .route("/api/md5", get(handlers::md5))
            .route("/api/cutools/md5/with-key", get(handlers::md5_with_key))
            .route("/api/all", get(handlers::flexible))
            .route("/api/test-all", get(handlers::test_all))
            .with_state(state)
            .layer(TimeoutLayer::new(server_timeout(config)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
            .layer(set_request_id_layer());

        if config.security.cors_enabled {
            router.layer(CorsLayer::permissive())
        } else {
            router
        }
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.origin,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Longest legitimate handler time plus slack: the forward deadline, or the
/// whole sequential probe run, whichever is larger.
fn server_timeout(config: &ProxyConfig) -> Duration {
    let probes = config.upstream.probe_queries.len() as u64;
    let slowest = config
        .timeouts
        .request_secs
        .max(config.timeouts.probe_secs.saturating_mul(probes));
    Duration::from_secs(slowest.saturating_add(SERVER_TIMEOUT_SLACK_SECS))
}
