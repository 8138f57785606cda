//! Per-client rate limiting.
//!
//! # Design Decisions
//! - Token bucket keyed by client IP; sustained rate and burst from config
//! - Buckets are created on first sight and refilled lazily on access
//! - Rejections are logged with the client key, never with request bodies

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Mutex;
use std::time::Instant;

use axum::body::Body;
use axum::extract::Request;
use axum::http::StatusCode;

use crate::config::RateLimitConfig;
use crate::http::pipeline::{Flow, Interceptor, RequestContext};
use crate::http::response;

pub const RATE_LIMIT_EXCEEDED_MESSAGE: &str = "rate limit exceeded";

/// A simple token bucket.
struct TokenBucket {
    tokens: f64,
    last_update: Instant,
}

impl TokenBucket {
    fn new(capacity: f64) -> Self {
        Self {
            tokens: capacity,
            last_update: Instant::now(),
        }
    }

    fn try_acquire(&mut self, capacity: f64, refill_rate: f64) -> bool {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update).as_secs_f64();

        self.tokens = (self.tokens + elapsed * refill_rate).min(capacity);
        self.last_update = now;

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

/// Pipeline stage rejecting clients that exceed the configured rate.
pub struct RateLimitInterceptor {
    buckets: Mutex<HashMap<IpAddr, TokenBucket>>,
    refill_rate: f64,
    capacity: f64,
}

impl RateLimitInterceptor {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            refill_rate: config.requests_per_second as f64,
            capacity: config.burst_size as f64,
        }
    }

    fn check(&self, key: IpAddr) -> bool {
        let mut buckets = self.buckets.lock().expect("rate limiter mutex poisoned");
        let bucket = buckets
            .entry(key)
            .or_insert_with(|| TokenBucket::new(self.capacity));

        bucket.try_acquire(self.capacity, self.refill_rate)
    }
}

impl Interceptor for RateLimitInterceptor {
    fn name(&self) -> &'static str {
        "rate-limit"
    }

    fn before(&self, ctx: &mut RequestContext, req: Request<Body>) -> Flow {
        if self.check(ctx.client_ip) {
            Flow::Continue(req)
        } else {
            tracing::warn!(client = %ctx.client_ip, "rate limit exceeded");
            Flow::Halt(response::error_message(
                StatusCode::TOO_MANY_REQUESTS,
                RATE_LIMIT_EXCEEDED_MESSAGE,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(rps: u32, burst: u32) -> RateLimitInterceptor {
        RateLimitInterceptor::new(RateLimitConfig {
            enabled: true,
            requests_per_second: rps,
            burst_size: burst,
        })
    }

    #[test]
    fn test_burst_is_honored_then_exhausted() {
        let limiter = limiter(1, 3);
        let ip: IpAddr = "10.0.0.1".parse().unwrap();

        assert!(limiter.check(ip));
        assert!(limiter.check(ip));
        assert!(limiter.check(ip));
        assert!(!limiter.check(ip));
    }

    #[test]
    fn test_clients_are_limited_independently() {
        let limiter = limiter(1, 1);
        let first: IpAddr = "10.0.0.1".parse().unwrap();
        let second: IpAddr = "10.0.0.2".parse().unwrap();

        assert!(limiter.check(first));
        assert!(!limiter.check(first));
        assert!(limiter.check(second));
    }

    #[test]
    fn test_tokens_refill_over_time() {
        let mut bucket = TokenBucket::new(1.0);
        assert!(bucket.try_acquire(1.0, 1000.0));
        assert!(!bucket.try_acquire(1.0, 0.0));

        // Backdate the last refill instead of sleeping.
        bucket.last_update = Instant::now() - std::time::Duration::from_secs(1);
        assert!(bucket.try_acquire(1.0, 1.0));
    }
}
