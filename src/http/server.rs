//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with every resource route
//! - Wire up middleware (CORS, request ID, tracing)
//! - Bind server to listener
//! - Stop on the shutdown broadcast, letting in-flight requests finish

use std::sync::Arc;

use axum::{http::HeaderName, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use url::Url;

use crate::config::ProxyConfig;
use crate::http::handlers::{by_path, by_query};
use crate::proxy::{HttpUpstream, ProxyError, ResourceKind, Upstream};

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Application state injected into handlers. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub base_url: Arc<Url>,
    pub upstream: Arc<dyn Upstream>,
}

impl AppState {
    pub fn new(config: ProxyConfig, upstream: Arc<dyn Upstream>) -> Result<Self, ProxyError> {
        let base_url = Url::parse(&config.upstream.base_url)
            .map_err(|e| ProxyError::InvalidUpstreamUrl(format!("{}: {}", config.upstream.base_url, e)))?;
        Ok(Self {
            config: Arc::new(config),
            base_url: Arc::new(base_url),
            upstream,
        })
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/search", by_query(ResourceKind::Search))
        .route("/photos", by_query(ResourceKind::Photos))
        .route("/photos/{location_id}", by_path(ResourceKind::Photos))
        .route("/{location_id}/photos", by_path(ResourceKind::Photos))
        .route("/details", by_query(ResourceKind::Details))
        .route("/details/{location_id}", by_path(ResourceKind::Details))
        .route("/{location_id}/details", by_path(ResourceKind::Details))
        .route("/reviews", by_query(ResourceKind::Reviews))
        .route("/reviews/{location_id}", by_path(ResourceKind::Reviews))
        .route("/{location_id}/reviews", by_path(ResourceKind::Reviews))
        .with_state(state)
        .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
        .layer(cors)
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    config: Arc<ProxyConfig>,
}

impl HttpServer {
    /// Create a server that talks to the configured upstream over HTTP.
    pub fn new(config: ProxyConfig) -> Result<Self, ProxyError> {
        let upstream = Arc::new(HttpUpstream::new(&config.upstream)?);
        Self::with_upstream(config, upstream)
    }

    /// Create a server around any [`Upstream`] implementation.
    pub fn with_upstream(config: ProxyConfig, upstream: Arc<dyn Upstream>) -> Result<Self, ProxyError> {
        let state = AppState::new(config, upstream)?;
        let config = state.config.clone();
        Ok(Self {
            router: build_router(state),
            config,
        })
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(self, listener: TcpListener, mut shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
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
