//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the dispatch handler
//! - Wire up middleware (request ID, tracing, timeout)
//! - Resolve each request's host to a function and invoke it
//! - Serve until shutdown, then drain in-flight requests

use axum::{
    extract::{Request, State},
    response::{IntoResponse, Response},
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::EdgeConfig;
use crate::functions::{FunctionContext, InvalidIdentity};
use crate::http::request::{request_id, MakeRequestUuid};
use crate::lifecycle::shutdown::triggered;
use crate::observability::metrics;
use crate::routing::{request_host, FunctionRegistry};
use crate::upstream::{GithubKeys, KeyProvider, UpstreamError};

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub registry: Arc<FunctionRegistry>,
    pub context: Arc<FunctionContext>,
}

/// Failure to assemble the server from its config.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to build upstream client: {0}")]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Identity(#[from] InvalidIdentity),
}

/// HTTP server for the edge runtime.
pub struct HttpServer {
    router: Router,
    config: Arc<EdgeConfig>,
}

impl HttpServer {
    /// Create a server that fetches keys from the configured upstream.
    pub fn new(config: EdgeConfig) -> Result<Self, ServerError> {
        let provider = Arc::new(GithubKeys::new(&config.upstream)?);
        Self::with_provider(config, provider)
    }

    /// Create a server with an explicit key provider.
    pub fn with_provider(
        config: EdgeConfig,
        provider: Arc<dyn KeyProvider>,
    ) -> Result<Self, ServerError> {
        let state = AppState {
            registry: Arc::new(FunctionRegistry::from_config(&config)),
            context: Arc::new(FunctionContext::from_config(&config, provider)?),
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config: Arc::new(config),
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &EdgeConfig, state: AppState) -> Router {
        let request_timeout = Duration::from_secs(config.timeouts.request_secs);

        Router::new().fallback(dispatch).with_state(state).layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(|req: &Request| {
                    tracing::info_span!(
                        "request",
                        method = %req.method(),
                        uri = %req.uri(),
                        request_id = %request_id(req.headers()),
                    )
                }))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(request_timeout)),
        )
    }

    /// The fully layered router, for serving or in-process calls.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            region = %self.config.region,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(triggered(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &EdgeConfig {
        &self.config
    }
}

/// Resolve the host to a function and invoke it for this request.
async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
    let start_time = Instant::now();

    let function = match state.registry.resolve(request_host(&request)) {
        Ok(function) => function,
        Err(e) => {
            tracing::warn!(error = %e, "No function for request");
            return e.into_response();
        }
    };

    let path = request.uri().path().to_owned();
    tracing::debug!(function = function.name(), path = %path, "Invoking function");

    let response = function.invoke(&state.context, &path).await;
    metrics::record_request(function.name(), response.status().as_u16(), start_time);
    response
}
