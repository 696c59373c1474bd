//! Court booking domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::Validate;

use shared::validation::canonical_time_slot;

/// Lifecycle status of a booking.
///
/// Only `Booked` bookings hold their (date, court, slot); a cancelled
/// booking frees the slot for someone else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Booked,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Booked => "booked",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a court reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    /// Owner of the booking.
    pub user_id: Uuid,
    pub court_number: i32,
    pub location: String,
    pub date: NaiveDate,
    pub time_slot: String,
    /// Empty until a partner is named or a partner request is accepted.
    pub partner_name: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// Request payload for creating a booking.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[validate(
        required(message = "Missing required fields"),
        range(min = 1, message = "Court number must be a positive integer")
    )]
    pub court_number: Option<i32>,

    #[validate(
        required(message = "Missing required fields"),
        custom(function = "shared::validation::validate_not_blank"),
        length(max = 200, message = "Location must be at most 200 characters")
    )]
    pub location: Option<String>,

    #[validate(required(message = "Missing required fields"))]
    pub date: Option<NaiveDate>,

    #[validate(
        required(message = "Missing required fields"),
        custom(function = "shared::validation::validate_time_slot")
    )]
    pub time_slot: Option<String>,

    #[validate(length(max = 100, message = "Partner name must be at most 100 characters"))]
    pub partner_name: Option<String>,
}

/// A validated, normalized booking ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub user_id: Uuid,
    pub court_number: i32,
    pub location: String,
    pub date: NaiveDate,
    pub time_slot: String,
    pub partner_name: String,
}

impl CreateBookingRequest {
    /// Normalizes a validated request into a [`NewBooking`] owned by `owner`.
    ///
    /// Returns `None` when a required field is absent or the slot label is
    /// unknown, which `validate()` already reports.
    pub fn into_new_booking(self, owner: Uuid) -> Option<NewBooking> {
        let time_slot = canonical_time_slot(self.time_slot.as_deref()?)?;
        Some(NewBooking {
            user_id: owner,
            court_number: self.court_number?,
            location: self.location?.trim().to_string(),
            date: self.date?,
            time_slot: time_slot.to_string(),
            partner_name: self
                .partner_name
                .map(|p| p.trim().to_string())
                .unwrap_or_default(),
        })
    }
}

/// Request payload for updating a booking (partial update).
///
/// Unknown fields are rejected so that ownership and identifiers can never
/// be rewritten through this payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateBookingRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "Court number must be a positive integer"))]
    pub court_number: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(
        custom(function = "shared::validation::validate_not_blank"),
        length(max = 200, message = "Location must be at most 200 characters")
    )]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "shared::validation::validate_time_slot"))]
    pub time_slot: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100, message = "Partner name must be at most 100 characters"))]
    pub partner_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
}

/// Normalized set of changes to merge into an existing booking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingChanges {
    pub court_number: Option<i32>,
    pub location: Option<String>,
    pub date: Option<NaiveDate>,
    pub time_slot: Option<String>,
    pub partner_name: Option<String>,
    pub status: Option<BookingStatus>,
}

impl BookingChanges {
    pub fn is_empty(&self) -> bool {
        *self == BookingChanges::default()
    }
}

impl From<UpdateBookingRequest> for BookingChanges {
    fn from(request: UpdateBookingRequest) -> Self {
        Self {
            court_number: request.court_number,
            location: request.location.map(|l| l.trim().to_string()),
            date: request.date,
            time_slot: request
                .time_slot
                .as_deref()
                .and_then(canonical_time_slot)
                .map(str::to_string),
            partner_name: request.partner_name.map(|p| p.trim().to_string()),
            status: request.status,
        }
    }
}

/// Response payload for booking operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub court_number: i32,
    pub location: String,
    pub date: NaiveDate,
    pub time_slot: String,
    pub partner_name: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            user_id: b.user_id,
            court_number: b.court_number,
            location: b.location,
            date: b.date,
            time_slot: b.time_slot,
            partner_name: b.partner_name,
            status: b.status,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

/// Envelope for a single booking plus a status message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingEnvelope {
    pub message: String,
    pub booking: BookingResponse,
}

/// Response for listing the caller's bookings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBookingsResponse {
    pub bookings: Vec<BookingResponse>,
}
