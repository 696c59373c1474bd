//! Bearer-token authentication middleware.
//!
//! Verifies the session token and resolves its subject to a live user via
//! [`AuthService::verify_token`](crate::services::AuthService::verify_token).
//! The resolved user is stored in request extensions for the
//! [`CurrentUser`](crate::extractors::CurrentUser) extractor.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use domain::models::PublicUser;

use crate::app::AppState;
use crate::error::ApiError;

/// Authenticated user information resolved from a session token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: PublicUser,
}

impl AuthenticatedUser {
    pub fn id(&self) -> Uuid {
        self.user.id
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header_value: Option<&str>) -> Option<&str> {
    let value = header_value?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Middleware that requires a valid session token.
pub async fn require_user_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let Some(token) = bearer_token(header_value) else {
        return ApiError::Unauthorized("No token provided".to_string()).into_response();
    };

    match state.auth_service().verify_token(token).await {
        Ok(user) => {
            req.extensions_mut().insert(AuthenticatedUser { user });
            next.run(req).await
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
