//! Configuration loading from the environment.
//!
//! # Responsibilities
//! - Read the deployment's environment-variable surface
//! - Coerce values into the typed schema
//! - Semantic validation before the config is accepted
//!
//! # Design Decisions
//! - Missing optional variables fall back to schema defaults
//! - DATABASE_URL is the only required variable
//! - Validation reports all problems, not just the first

use std::env;

use thiserror::Error;

use crate::config::schema::AppConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },

    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
}

/// Load and validate configuration from environment variables.
///
/// Surface: `DATABASE_URL`, `API_PORT`, `API_DEV`, `API_RL_ENABLED`,
/// `API_RL_RPS`, `API_RL_BURST`, `API_CORS` (comma-separated origins).
pub fn load_from_env() -> Result<AppConfig, ConfigError> {
    let mut config = AppConfig::default();

    config.database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

    if let Some(port) = parse_var("API_PORT")? {
        config.port = port;
    }
    if let Some(dev) = parse_bool("API_DEV")? {
        config.dev = dev;
    }
    if let Some(enabled) = parse_bool("API_RL_ENABLED")? {
        config.rate_limit.enabled = enabled;
    }
    if let Some(rps) = parse_var("API_RL_RPS")? {
        config.rate_limit.requests_per_second = rps;
    }
    if let Some(burst) = parse_var("API_RL_BURST")? {
        config.rate_limit.burst_size = burst;
    }
    if let Ok(origins) = env::var("API_CORS") {
        config.cors.trusted_origins = origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
    }

    validate(&config)?;

    Ok(config)
}

/// Semantic checks on an assembled config.
pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let mut problems = Vec::new();

    if config.port == 0 {
        problems.push("port must be nonzero".to_string());
    }
    if config.rate_limit.enabled {
        if config.rate_limit.requests_per_second == 0 {
            problems.push("rate limit rps must be at least 1".to_string());
        }
        if config.rate_limit.burst_size < config.rate_limit.requests_per_second {
            problems.push("rate limit burst must be at least the rps".to_string());
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(problems))
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(_) => Ok(None),
    }
}

fn parse_bool(var: &'static str) -> Result<Option<bool>, ConfigError> {
    match env::var(var) {
        Ok(value) => match value.to_ascii_lowercase().as_str() {
            "1" | "t" | "true" => Ok(Some(true)),
            "0" | "f" | "false" => Ok(Some(false)),
            _ => Err(ConfigError::Invalid { var, value }),
        },
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_pass_validation() {
        let config = AppConfig::default();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_zero_port_is_rejected() {
        let mut config = AppConfig::default();
        config.port = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_burst_below_rps_is_rejected() {
        let mut config = AppConfig::default();
        config.rate_limit.requests_per_second = 10;
        config.rate_limit.burst_size = 5;

        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("burst"));
    }

    #[test]
    fn test_disabled_rate_limit_skips_checks() {
        let mut config = AppConfig::default();
        config.rate_limit.enabled = false;
        config.rate_limit.requests_per_second = 0;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validation_reports_all_problems() {
        let mut config = AppConfig::default();
        config.port = 0;
        config.rate_limit.requests_per_second = 0;

        match validate(&config).unwrap_err() {
            ConfigError::Validation(problems) => assert_eq!(problems.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
