//! Rate limiting middleware.
//!
//! Applies a per-user request quota on protected routes using a keyed
//! GCRA limiter.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    clock::{Clock, DefaultClock},
    DefaultKeyedRateLimiter, Quota, RateLimiter,
};
use std::num::NonZeroU32;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::user_auth::AuthenticatedUser;

/// Rate limiter state shared across all requests, keyed by user ID.
pub struct RateLimiterState {
    limiter: DefaultKeyedRateLimiter<Uuid>,
    clock: DefaultClock,
    rate_limit_per_minute: u32,
}

impl RateLimiterState {
    /// Creates a limiter allowing `rate_limit_per_minute` requests per user.
    ///
    /// Returns `None` when the limit is 0 (rate limiting disabled).
    pub fn new(rate_limit_per_minute: u32) -> Option<Self> {
        let per_minute = NonZeroU32::new(rate_limit_per_minute)?;
        Some(Self {
            limiter: RateLimiter::keyed(Quota::per_minute(per_minute)),
            clock: DefaultClock::default(),
            rate_limit_per_minute,
        })
    }

    /// Check if a request from the given user should be allowed.
    /// Returns Ok(()) if allowed, or Err with retry_after seconds if rate limited.
    pub fn check(&self, user_id: Uuid) -> Result<(), u64> {
        self.limiter.check_key(&user_id).map_err(|not_until| {
            not_until
                .wait_time_from(self.clock.now())
                .as_secs()
                .max(1)
        })
    }
}

impl std::fmt::Debug for RateLimiterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiterState")
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .field("tracked_users", &self.limiter.len())
            .finish()
    }
}

/// Middleware that applies rate limiting per authenticated user.
///
/// Must run after [`require_user_auth`](super::user_auth::require_user_auth)
/// so the user is available in request extensions.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let (Some(limiter), Some(auth)) = (
        state.rate_limiter.as_ref(),
        req.extensions().get::<AuthenticatedUser>(),
    ) else {
        return next.run(req).await;
    };

    if let Err(retry_after) = limiter.check(auth.id()) {
        tracing::warn!(user_id = %auth.id(), retry_after, "Rate limit exceeded");
        return ApiError::RateLimited(retry_after).into_response();
    }

    next.run(req).await
}
