//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, serve loop, graceful drain)
//!     → pipeline.rs (panic recovery, then the interceptor list:
//!                    request-id → cors → rate-limit)
//!     → handlers.rs (healthcheck, bay status, analytics stub)
//!     → response.rs (JSON envelopes, error mapping)
//! ```

pub mod handlers;
pub mod pipeline;
pub mod request;
pub mod response;
pub mod server;

pub use pipeline::{Flow, Interceptor, Pipeline, RequestContext};
pub use request::{RequestIdInterceptor, X_REQUEST_ID};
pub use server::{AppState, HttpServer, RuntimeError, GRACE_PERIOD};
