//! Authentication endpoint handlers.

use axum::{extract::State, http::StatusCode, Json};

use domain::models::{AuthResponse, LoginRequest, MeResponse, PublicUser, SignupRequest};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{CurrentUser, JsonBody};
use crate::services::AuthSession;

fn auth_response(message: &str, session: AuthSession) -> AuthResponse {
    AuthResponse {
        message: message.to_string(),
        token: session.token,
        user: session.user,
    }
}

/// Register a new account.
///
/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let session = state.auth_service().signup(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(auth_response("User registered successfully", session)),
    ))
}

/// Sign in with email and password.
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let session = state.auth_service().login(request).await?;
    Ok(Json(auth_response("Login successful", session)))
}

/// The caller's public profile.
///
/// GET /api/auth/me
pub async fn me(CurrentUser(user): CurrentUser) -> Json<MeResponse> {
    Json(MeResponse { user })
}

/// Every registered user, ordered by username.
///
/// GET /api/auth/all-users
pub async fn all_users(State(state): State<AppState>) -> Result<Json<Vec<PublicUser>>, ApiError> {
    let users = state.auth_service().list_users().await?;
    Ok(Json(users))
}
