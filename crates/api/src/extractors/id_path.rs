//! Path extractor for a single UUID segment.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use crate::error::ApiError;

/// Like `Path<Uuid>`, but a malformed id rejects with a 400 in the standard
/// error shape instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<Uuid>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection.body_text(), "Rejected path id");
                ApiError::Validation("Invalid id".to_string())
            })?;
        Ok(IdPath(id))
    }
}
