//! Partner request endpoint handlers.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use domain::models::partner_request::{
    CreatePartnerRequest, ListPartnerRequestsResponse, PartnerRequestEnvelope, RespondRequest,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{CurrentUser, IdPath, ValidatedJson};

/// Ask another user to partner on one of the caller's bookings.
///
/// POST /api/partners/request
pub async fn send_request(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(request): ValidatedJson<CreatePartnerRequest>,
) -> Result<(StatusCode, Json<PartnerRequestEnvelope>), ApiError> {
    let created = state.partner_service().send(user.id(), request).await?;
    Ok((
        StatusCode::CREATED,
        Json(PartnerRequestEnvelope {
            message: "Partner request sent".to_string(),
            request: created.into(),
        }),
    ))
}

/// Requests addressed to the caller.
///
/// GET /api/partners/incoming
pub async fn list_incoming(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ListPartnerRequestsResponse>, ApiError> {
    let requests = state.partner_service().list_incoming(user.id()).await?;
    Ok(Json(ListPartnerRequestsResponse { requests }))
}

/// Requests sent by the caller.
///
/// GET /api/partners/outgoing
pub async fn list_outgoing(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ListPartnerRequestsResponse>, ApiError> {
    let requests = state.partner_service().list_outgoing(user.id()).await?;
    Ok(Json(ListPartnerRequestsResponse { requests }))
}

/// Accept or reject a request addressed to the caller.
///
/// PUT /api/partners/:id/respond
pub async fn respond(
    State(state): State<AppState>,
    user: CurrentUser,
    IdPath(request_id): IdPath,
    ValidatedJson(body): ValidatedJson<RespondRequest>,
) -> Result<Json<PartnerRequestEnvelope>, ApiError> {
    let resolved = state
        .partner_service()
        .respond(user.id(), request_id, body)
        .await?;
    Ok(Json(PartnerRequestEnvelope {
        message: format!("Request {}", resolved.status),
        request: resolved.into(),
    }))
}
