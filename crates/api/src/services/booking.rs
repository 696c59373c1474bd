//! Booking service: create, list, update and delete court bookings.

use uuid::Uuid;

use domain::models::booking::{CreateBookingRequest, UpdateBookingRequest};
use domain::models::{Booking, BookingChanges};
use domain::services::{ensure_booking_owner, AccessDenied};
use persistence::repositories::{BookingRepository, BOOKINGS_ACTIVE_SLOT_INDEX};
use thiserror::Error;

use crate::error::ApiError;
use crate::middleware::metrics::{record_booking_conflict, record_booking_created};
use crate::services::unique_violation;

/// Errors that can occur during booking operations.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("{0}")]
    Validation(String),

    #[error("Booking not found")]
    NotFound,

    #[error("{0}")]
    Forbidden(AccessDenied),

    #[error("Court already booked for this time slot")]
    SlotTaken,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Validation(msg) => ApiError::Validation(msg),
            BookingError::NotFound => ApiError::NotFound(err.to_string()),
            BookingError::Forbidden(denied) => ApiError::Forbidden(denied.to_string()),
            BookingError::SlotTaken => ApiError::Conflict(err.to_string()),
            BookingError::DatabaseError(db_err) => ApiError::from(db_err),
        }
    }
}

/// Maps a write failure, turning a lost slot race into [`BookingError::SlotTaken`].
fn slot_conflict(err: sqlx::Error) -> BookingError {
    if unique_violation(&err, BOOKINGS_ACTIVE_SLOT_INDEX) {
        record_booking_conflict();
        BookingError::SlotTaken
    } else {
        BookingError::DatabaseError(err)
    }
}

/// Booking service.
#[derive(Clone)]
pub struct BookingService {
    bookings: BookingRepository,
}

impl BookingService {
    pub fn new(bookings: BookingRepository) -> Self {
        Self { bookings }
    }

    /// Books a court slot for `actor`.
    ///
    /// `request` must already have passed `validate()`.
    pub async fn create(
        &self,
        actor: Uuid,
        request: CreateBookingRequest,
    ) -> Result<Booking, BookingError> {
        let new_booking = request
            .into_new_booking(actor)
            .ok_or_else(|| BookingError::Validation("Missing required fields".to_string()))?;

        let Some(entity) = self
            .bookings
            .create_if_slot_free(&new_booking)
            .await
            .map_err(slot_conflict)?
        else {
            record_booking_conflict();
            tracing::info!(
                user_id = %actor,
                date = %new_booking.date,
                court_number = new_booking.court_number,
                time_slot = %new_booking.time_slot,
                "Booking rejected: slot already taken"
            );
            return Err(BookingError::SlotTaken);
        };

        let booking: Booking = entity.into();
        record_booking_created();
        tracing::info!(
            booking_id = %booking.id,
            user_id = %actor,
            date = %booking.date,
            court_number = booking.court_number,
            time_slot = %booking.time_slot,
            "Booking created"
        );
        Ok(booking)
    }

    /// All bookings owned by `actor`, by date then slot.
    pub async fn list_for_user(&self, actor: Uuid) -> Result<Vec<Booking>, BookingError> {
        let entities = self.bookings.list_for_user(actor).await?;
        Ok(entities.into_iter().map(Booking::from).collect())
    }

    /// Applies a partial update to one of `actor`'s bookings.
    ///
    /// `request` must already have passed `validate()`.
    pub async fn update(
        &self,
        actor: Uuid,
        booking_id: Uuid,
        request: UpdateBookingRequest,
    ) -> Result<Booking, BookingError> {
        self.load_owned(actor, booking_id).await?;

        let changes = BookingChanges::from(request);
        if changes.is_empty() {
            return Err(BookingError::Validation("No fields to update".to_string()));
        }

        let entity = self
            .bookings
            .update(booking_id, &changes)
            .await
            .map_err(slot_conflict)?
            .ok_or(BookingError::NotFound)?;

        let booking: Booking = entity.into();
        tracing::info!(
            booking_id = %booking.id,
            user_id = %actor,
            status = %booking.status,
            "Booking updated"
        );
        Ok(booking)
    }

    /// Deletes one of `actor`'s bookings. Partner requests that reference it
    /// are kept.
    pub async fn delete(&self, actor: Uuid, booking_id: Uuid) -> Result<(), BookingError> {
        self.load_owned(actor, booking_id).await?;

        if self.bookings.delete(booking_id).await? == 0 {
            return Err(BookingError::NotFound);
        }

        tracing::info!(booking_id = %booking_id, user_id = %actor, "Booking deleted");
        Ok(())
    }

    async fn load_owned(&self, actor: Uuid, booking_id: Uuid) -> Result<Booking, BookingError> {
        let booking: Booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or(BookingError::NotFound)?
            .into();

        ensure_booking_owner(&booking, actor).map_err(BookingError::Forbidden)?;
        Ok(booking)
    }
}
