//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Serving:
//!     serve loop runs until drained or failed
//!
//! Shutdown (shutdown.rs):
//!     SIGINT/SIGTERM → stop accepting → drain in-flight (5s grace) → exit
//!
//! Reconciliation:
//!     serve-loop result and grace-period expiry race into a single
//!     first-writer-wins slot, read exactly once by the runtime
//! ```
//!
//! # Design Decisions
//! - A shutdown that outlives the grace period is fatal (non-zero exit)
//! - Signal primitives stay isolated in signals.rs

pub mod shutdown;
pub mod signals;

pub use shutdown::{outcome_slot, OutcomeReader, OutcomeWriter};
