//! Booking endpoint handlers.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Serialize;

use domain::models::booking::{
    BookingEnvelope, BookingResponse, CreateBookingRequest, ListBookingsResponse,
    UpdateBookingRequest,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{CurrentUser, IdPath, ValidatedJson};

/// Body of a successful delete.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Book a court slot.
///
/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingEnvelope>), ApiError> {
    let booking = state.booking_service().create(user.id(), request).await?;
    Ok((
        StatusCode::CREATED,
        Json(BookingEnvelope {
            message: "Booking created".to_string(),
            booking: booking.into(),
        }),
    ))
}

/// The caller's bookings.
///
/// GET /api/bookings
pub async fn list_bookings(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ListBookingsResponse>, ApiError> {
    let bookings = state.booking_service().list_for_user(user.id()).await?;
    Ok(Json(ListBookingsResponse {
        bookings: bookings.into_iter().map(BookingResponse::from).collect(),
    }))
}

/// Partially update one of the caller's bookings.
///
/// PUT /api/bookings/:id
pub async fn update_booking(
    State(state): State<AppState>,
    user: CurrentUser,
    IdPath(booking_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateBookingRequest>,
) -> Result<Json<BookingEnvelope>, ApiError> {
    let booking = state
        .booking_service()
        .update(user.id(), booking_id, request)
        .await?;
    Ok(Json(BookingEnvelope {
        message: "Booking updated".to_string(),
        booking: booking.into(),
    }))
}

/// Delete one of the caller's bookings.
///
/// DELETE /api/bookings/:id
pub async fn delete_booking(
    State(state): State<AppState>,
    user: CurrentUser,
    IdPath(booking_id): IdPath,
) -> Result<Json<MessageResponse>, ApiError> {
    state.booking_service().delete(user.id(), booking_id).await?;
    Ok(Json(MessageResponse {
        message: "Booking deleted".to_string(),
    }))
}
