//! Configuration schema definitions.
//!
//! All types derive Serde traits and carry defaults so a minimal
//! environment can boot a development instance.

use serde::{Deserialize, Serialize};

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// PostgreSQL connection string.
    pub database_url: String,

    /// Listen port for the HTTP API.
    pub port: u16,

    /// Development mode: human-readable logs, freshness gate bypassed.
    pub dev: bool,

    /// Rate limiting configuration.
    pub rate_limit: RateLimitConfig,

    /// CORS configuration.
    pub cors: CorsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            port: 8080,
            dev: false,
            rate_limit: RateLimitConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Enable rate limiting.
    pub enabled: bool,

    /// Sustained requests per second per client IP.
    pub requests_per_second: u32,

    /// Burst capacity per client IP.
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            requests_per_second: 2,
            burst_size: 4,
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Origins allowed to read the API from a browser. Exact match.
    pub trusted_origins: Vec<String>,
}
