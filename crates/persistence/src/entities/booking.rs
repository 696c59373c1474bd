//! Booking entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{Booking, BookingStatus};

/// Database enum for booking status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
pub enum BookingStatusDb {
    Booked,
    Cancelled,
}

impl From<BookingStatusDb> for BookingStatus {
    fn from(status: BookingStatusDb) -> Self {
        match status {
            BookingStatusDb::Booked => BookingStatus::Booked,
            BookingStatusDb::Cancelled => BookingStatus::Cancelled,
        }
    }
}

impl From<BookingStatus> for BookingStatusDb {
    fn from(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Booked => BookingStatusDb::Booked,
            BookingStatus::Cancelled => BookingStatusDb::Cancelled,
        }
    }
}

/// Database row mapping for the bookings table.
#[derive(Debug, Clone, FromRow)]
pub struct BookingEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub court_number: i32,
    pub location: String,
    pub date: NaiveDate,
    pub time_slot: String,
    pub partner_name: String,
    pub status: BookingStatusDb,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BookingEntity> for Booking {
    fn from(entity: BookingEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            court_number: entity.court_number,
            location: entity.location,
            date: entity.date,
            time_slot: entity.time_slot,
            partner_name: entity.partner_name,
            status: entity.status.into(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
