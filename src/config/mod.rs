//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (+ optional .env file)
//!     → loader.rs (read & coerce variables)
//!     → loader.rs::validate (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields except the database URL have defaults
//! - Validation separates syntactic (parsing) from semantic checks

pub mod loader;
pub mod schema;

pub use loader::{load_from_env, ConfigError};
pub use schema::{AppConfig, CorsConfig, RateLimitConfig};
