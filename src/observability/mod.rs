//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging (JSON in production) for machine parsing
//! - Request ID flows through all log events via the pipeline
//! - Internal error detail is logged here, never sent to clients

pub mod logging;
