//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at boot
//! - Pick the output format for the deployment mode
//!
//! # Design Decisions
//! - JSON format for production, human-readable format for development
//! - Log level configurable via RUST_LOG, with sensible defaults

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global subscriber. Call once, before any log line.
pub fn init(dev: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if dev {
            "washbay_status=debug,tower_http=debug".into()
        } else {
            "info".into()
        }
    });

    if dev {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    }
}
