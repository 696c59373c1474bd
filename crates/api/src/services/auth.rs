//! Authentication service: signup, login, token verification and the user
//! directory.

use std::sync::Arc;

use domain::models::user::MAX_USERNAME_LENGTH;
use domain::models::{LoginRequest, PublicUser, SignupRequest, User};
use persistence::repositories::{UserRepository, USERS_EMAIL_INDEX, USERS_USERNAME_INDEX};
use shared::jwt::{JwtConfig, JwtError, TokenSubject};
use shared::password::{check_password_policy, hash_password, verify_password, PasswordError};
use shared::validation::normalize_email;
use thiserror::Error;
use validator::ValidateEmail;

use crate::error::ApiError;
use crate::services::unique_violation;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Please provide username, email, and password.")]
    MissingSignupFields,

    #[error("Please provide email and password.")]
    MissingLoginFields,

    #[error("{0}")]
    WeakPassword(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Username must be at most 50 characters")]
    UsernameTooLong,

    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    InvalidToken(&'static str),

    #[error("Token error: {0}")]
    TokenError(JwtError),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingSignupFields
            | AuthError::MissingLoginFields
            | AuthError::WeakPassword(_)
            | AuthError::InvalidEmail
            | AuthError::UsernameTooLong => ApiError::Validation(err.to_string()),
            AuthError::EmailAlreadyExists | AuthError::UsernameTaken => {
                ApiError::Conflict(err.to_string())
            }
            AuthError::InvalidCredentials | AuthError::InvalidToken(_) => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::DatabaseError(db_err) => ApiError::from(db_err),
            AuthError::TokenError(_) | AuthError::PasswordError(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

/// A signed-in user and their session token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: PublicUser,
}

/// Authentication service.
#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    jwt: Arc<JwtConfig>,
}

impl AuthService {
    pub fn new(users: UserRepository, jwt: Arc<JwtConfig>) -> Self {
        Self { users, jwt }
    }

    /// Registers a new account and signs it in.
    pub async fn signup(&self, request: SignupRequest) -> Result<AuthSession, AuthError> {
        if request.has_missing_fields() {
            return Err(AuthError::MissingSignupFields);
        }
        check_password_policy(&request.password).map_err(AuthError::WeakPassword)?;

        let username = request.username.trim();
        let email = normalize_email(&request.email);

        if !email.validate_email() {
            return Err(AuthError::InvalidEmail);
        }
        if username.chars().count() > MAX_USERNAME_LENGTH {
            return Err(AuthError::UsernameTooLong);
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }
        if self.users.username_exists(username).await? {
            return Err(AuthError::UsernameTaken);
        }

        let password_hash = hash_password(&request.password)?;

        // The pre-checks above give friendly errors; the unique indexes decide races.
        let entity = self
            .users
            .create_user(username, &email, &password_hash)
            .await
            .map_err(|e| {
                if unique_violation(&e, USERS_EMAIL_INDEX) {
                    AuthError::EmailAlreadyExists
                } else if unique_violation(&e, USERS_USERNAME_INDEX) {
                    AuthError::UsernameTaken
                } else {
                    AuthError::DatabaseError(e)
                }
            })?;

        let user: User = entity.into();
        tracing::info!(user_id = %user.id, username = %user.username, "User signed up");

        self.issue_session(user)
    }

    /// Signs in with email and password.
    ///
    /// An unknown email and a wrong password fail identically.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthSession, AuthError> {
        if request.has_missing_fields() {
            return Err(AuthError::MissingLoginFields);
        }

        let email = normalize_email(&request.email);
        let Some(entity) = self.users.find_by_email(&email).await? else {
            tracing::debug!("Login attempt for unknown email");
            return Err(AuthError::InvalidCredentials);
        };
        let user: User = entity.into();

        if !verify_password(&request.password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "User logged in");
        self.issue_session(user)
    }

    /// Verifies a session token and resolves its subject to a live user.
    pub async fn verify_token(&self, token: &str) -> Result<PublicUser, AuthError> {
        let claims = self.jwt.validate(token).map_err(|e| {
            tracing::debug!(error = %e, "Session token rejected");
            match e {
                JwtError::TokenExpired => AuthError::InvalidToken("Token expired"),
                _ => AuthError::InvalidToken("Invalid token"),
            }
        })?;

        let user_id = claims
            .user_id()
            .map_err(|_| AuthError::InvalidToken("Invalid token"))?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::InvalidToken("User not found"))?;

        Ok(User::from(user).into())
    }

    /// Every user's public projection, ordered by username.
    pub async fn list_users(&self) -> Result<Vec<PublicUser>, AuthError> {
        let users = self.users.list_public().await?;
        Ok(users.into_iter().map(PublicUser::from).collect())
    }

    fn issue_session(&self, user: User) -> Result<AuthSession, AuthError> {
        let issued = self
            .jwt
            .issue(TokenSubject {
                user_id: user.id,
                username: &user.username,
                email: &user.email,
            })
            .map_err(AuthError::TokenError)?;

        Ok(AuthSession {
            token: issued.token,
            user: user.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    fn status_of(err: AuthError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(status_of(AuthError::MissingSignupFields), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(AuthError::WeakPassword("short".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(AuthError::InvalidEmail), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(AuthError::EmailAlreadyExists), StatusCode::CONFLICT);
        assert_eq!(status_of(AuthError::UsernameTaken), StatusCode::CONFLICT);
        assert_eq!(status_of(AuthError::InvalidCredentials), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(AuthError::InvalidToken("Invalid token")),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AuthError::TokenError(JwtError::InvalidToken)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AuthError::MissingSignupFields.to_string(),
            "Please provide username, email, and password."
        );
        assert_eq!(AuthError::EmailAlreadyExists.to_string(), "Email already in use");
        assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid credentials");
        assert_eq!(
            AuthError::UsernameTooLong.to_string(),
            "Username must be at most 50 characters"
        );
    }

    #[test]
    fn test_weak_password_message_passes_through() {
        match ApiError::from(AuthError::WeakPassword(
            "Password must be at least 6 characters.".into(),
        )) {
            ApiError::Validation(msg) => {
                assert_eq!(msg, "Password must be at least 6 characters.")
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }
}
