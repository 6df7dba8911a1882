//! # Middleware Module
//!
//! Rate limiting for the Kumihimo HTTP API.
//!
//! `POST /design` fans out to the solver, whose search grows quickly with
//! the pattern size, so the whole API sits behind one global limiter.
//!
//! ## Configuration
//!
//! - `KUMIHIMO_RATE_LIMIT`: Requests per second (default: 20, 0 disables)

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Default requests per second.
pub const DEFAULT_RATE_LIMIT: u32 = 20;

/// Global rate limiter type alias.
pub type GlobalRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Create a global limiter. Zero falls back to `DEFAULT_RATE_LIMIT`.
pub fn create_rate_limiter(requests_per_second: u32) -> GlobalRateLimiter {
    let rps = NonZeroU32::new(requests_per_second)
        .or(NonZeroU32::new(DEFAULT_RATE_LIMIT))
        .unwrap_or(NonZeroU32::MIN);
    Arc::new(RateLimiter::direct(Quota::per_second(rps)))
}

/// Read `KUMIHIMO_RATE_LIMIT`, defaulting to `DEFAULT_RATE_LIMIT`.
pub fn get_rate_limit_from_env() -> u32 {
    std::env::var("KUMIHIMO_RATE_LIMIT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_RATE_LIMIT)
}

/// Reject requests over the limit with 429.
pub async fn rate_limit_middleware(
    State(limiter): State<GlobalRateLimiter>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, &'static str)> {
    if limiter.check().is_ok() {
        Ok(next.run(request).await)
    } else {
        tracing::warn!("Rate limit exceeded on {}", request.uri().path());
        Err((StatusCode::TOO_MANY_REQUESTS, "Too Many Requests"))
    }
}
