//! HTTP server setup and lifecycle.
//!
//! # Responsibilities
//! - Create the Axum router with all routes and fallbacks
//! - Wire up the interceptor pipeline and ambient layers
//! - Serve until a termination signal, then drain gracefully
//!
//! # Lifecycle
//! ```text
//! Starting → Serving → ShuttingDown → Stopped
//! ```
//! `Serving → ShuttingDown` happens only on signal receipt. The serve loop
//! and the grace-period watchdog race into a first-writer-wins outcome
//! slot, so the caller observes exactly one result: clean stop, serve
//! error, or grace period exceeded. The last one is fatal upstream.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use sqlx::PgPool;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::http::handlers;
use crate::http::pipeline::{self, Interceptor, Pipeline};
use crate::http::request::RequestIdInterceptor;
use crate::lifecycle::{outcome_slot, signals};
use crate::security::{CorsInterceptor, RateLimitInterceptor};
use crate::status::BayRepo;

/// How long in-flight requests may take to drain after a signal.
pub const GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Whole-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that end the serve lifecycle.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("listener error: {0}")]
    Listener(#[from] std::io::Error),

    #[error("serve loop failed: {0}")]
    Serve(std::io::Error),

    #[error("graceful shutdown exceeded the {0:?} grace period")]
    GraceExceeded(Duration),

    #[error("shutdown outcome was lost before being read")]
    OutcomeLost,
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub bays: BayRepo,
}

/// HTTP server for the bay status API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Assemble the router, pipeline, and state for the given deployment.
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        let config = Arc::new(config);
        let state = AppState {
            config: config.clone(),
            bays: BayRepo::new(pool),
        };

        let mut interceptors: Vec<Arc<dyn Interceptor>> = vec![
            Arc::new(RequestIdInterceptor),
            Arc::new(CorsInterceptor::new(config.cors.clone())),
        ];
        if config.rate_limit.enabled {
            interceptors.push(Arc::new(RateLimitInterceptor::new(config.rate_limit.clone())));
        }
        let pipeline = Arc::new(Pipeline::new(interceptors));

        tracing::debug!(stages = ?pipeline.stage_names(), "request pipeline assembled");

        Self {
            router: build_router(state, pipeline),
        }
    }

    /// Serve until a termination signal arrives, then drain gracefully.
    ///
    /// Blocks until terminated. A grace-period overrun is reported as an
    /// error; the caller decides that it is fatal.
    pub async fn run(self, listener: TcpListener) -> Result<(), RuntimeError> {
        self.run_until(listener, signals::terminated()).await
    }

    /// Like [`run`](Self::run), with an explicit termination future.
    pub async fn run_until<S>(self, listener: TcpListener, signal: S) -> Result<(), RuntimeError>
    where
        S: Future<Output = String> + Send + 'static,
    {
        let addr = listener.local_addr().map_err(RuntimeError::Listener)?;
        let (outcome, reader) = outcome_slot::<Result<(), RuntimeError>>();
        let (drain_tx, drain_rx) = tokio::sync::oneshot::channel::<()>();

        // Signal listener: trigger the drain, then watch the grace period.
        let signal_outcome = outcome.clone();
        tokio::spawn(async move {
            let sig = signal.await;
            tracing::info!(signal = %sig, "shutting down");

            tracing::info!(addr = %addr, "stopping server");
            let _ = drain_tx.send(());

            tokio::time::sleep(GRACE_PERIOD).await;
            // The serve loop would have won the slot by now if it drained.
            signal_outcome.complete(Err(RuntimeError::GraceExceeded(GRACE_PERIOD)));
        });

        tracing::info!(addr = %addr, "starting server");
        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = drain_rx.await;
                })
                .await
                .map_err(RuntimeError::Serve);
            outcome.complete(result);
        });

        let result = reader.recv().await.unwrap_or(Err(RuntimeError::OutcomeLost));
        if result.is_ok() {
            tracing::info!("shutdown complete");
        }
        result
    }
}

fn build_router(state: AppState, pipeline: Arc<Pipeline>) -> Router {
    Router::new()
        .route("/v1/healthcheck", get(handlers::healthcheck))
        .route("/v1/bays/status", get(handlers::bays_status))
        .route("/v1/bays/analytics", get(handlers::bays_analytics))
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .with_state(state)
        .layer(axum::middleware::from_fn_with_state(
            pipeline,
            pipeline::dispatch,
        ))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
}
