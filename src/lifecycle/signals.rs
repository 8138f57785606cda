//! OS signal handling.
//!
//! # Responsibilities
//! - Register handlers for SIGINT and SIGTERM
//! - Translate the first signal into a plain value for the runtime
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Nothing outside this module touches signal primitives; the runtime
//!   only sees a future resolving to the signal's name

use tokio::signal::unix::{signal, SignalKind};

/// Resolves with the name of the first termination signal received.
pub async fn terminated() -> String {
    let mut interrupt =
        signal(SignalKind::interrupt()).expect("failed to install SIGINT handler");
    let mut terminate =
        signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");

    tokio::select! {
        _ = interrupt.recv() => "SIGINT".to_string(),
        _ = terminate.recv() => "SIGTERM".to_string(),
    }
}
