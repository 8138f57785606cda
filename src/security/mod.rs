//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (via the http pipeline):
//!     → cors.rs (trusted-origin check, preflight short-circuit)
//!     → rate_limit.rs (per-IP token bucket)
//!     → Pass to handler
//! ```
//!
//! # Design Decisions
//! - Fail closed: reject on any check failure
//! - No trust in client input

pub mod cors;
pub mod rate_limit;

pub use cors::CorsInterceptor;
pub use rate_limit::RateLimitInterceptor;
