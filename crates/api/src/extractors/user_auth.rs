//! Authenticated user extractor.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use domain::models::PublicUser;

use crate::error::ApiError;
use crate::middleware::user_auth::AuthenticatedUser;

/// The user resolved by the auth middleware for this request.
///
/// Only usable on routes behind
/// [`require_user_auth`](crate::middleware::require_user_auth); anywhere
/// else it rejects with 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub PublicUser);

impl CurrentUser {
    pub fn id(&self) -> Uuid {
        self.0.id
    }

    pub fn username(&self) -> &str {
        &self.0.username
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .map(|auth| CurrentUser(auth.user.clone()))
            .ok_or_else(|| ApiError::Unauthorized("No token provided".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn alice() -> PublicUser {
        PublicUser {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_extracts_user_from_extensions() {
        let user = alice();
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();
        parts
            .extensions
            .insert(AuthenticatedUser { user: user.clone() });

        let current = CurrentUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(current.id(), user.id);
        assert_eq!(current.username(), "alice");
    }

    #[tokio::test]
    async fn test_rejects_without_auth() {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();
        let result = CurrentUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }
}
