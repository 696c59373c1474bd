//! Partner request entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::booking::BookingResponse;
use domain::models::{PartnerRequest, PartnerRequestDetails, PartnerRequestStatus, PublicUser};

use super::booking::BookingStatusDb;

/// Database enum for partner request status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "partner_request_status", rename_all = "lowercase")]
pub enum PartnerRequestStatusDb {
    Pending,
    Accepted,
    Rejected,
}

impl From<PartnerRequestStatusDb> for PartnerRequestStatus {
    fn from(status: PartnerRequestStatusDb) -> Self {
        match status {
            PartnerRequestStatusDb::Pending => PartnerRequestStatus::Pending,
            PartnerRequestStatusDb::Accepted => PartnerRequestStatus::Accepted,
            PartnerRequestStatusDb::Rejected => PartnerRequestStatus::Rejected,
        }
    }
}

impl From<PartnerRequestStatus> for PartnerRequestStatusDb {
    fn from(status: PartnerRequestStatus) -> Self {
        match status {
            PartnerRequestStatus::Pending => PartnerRequestStatusDb::Pending,
            PartnerRequestStatus::Accepted => PartnerRequestStatusDb::Accepted,
            PartnerRequestStatus::Rejected => PartnerRequestStatusDb::Rejected,
        }
    }
}

/// Database row mapping for the partner_requests table.
#[derive(Debug, Clone, FromRow)]
pub struct PartnerRequestEntity {
    pub id: Uuid,
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub booking_id: Uuid,
    pub status: PartnerRequestStatusDb,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PartnerRequestEntity> for PartnerRequest {
    fn from(entity: PartnerRequestEntity) -> Self {
        Self {
            id: entity.id,
            from_user_id: entity.from_user_id,
            to_user_id: entity.to_user_id,
            booking_id: entity.booking_id,
            status: entity.status.into(),
            responded_at: entity.responded_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Partner request joined with both users and (if it still exists) the booking.
///
/// Booking columns come from a LEFT JOIN and are all `None` once the
/// booking has been deleted.
#[derive(Debug, Clone, FromRow)]
pub struct PartnerRequestWithDetailsEntity {
    pub id: Uuid,
    pub status: PartnerRequestStatusDb,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub from_user_id: Uuid,
    pub from_username: String,
    pub from_email: String,
    pub to_user_id: Uuid,
    pub to_username: String,
    pub to_email: String,
    pub booking_id: Uuid,
    pub booking_user_id: Option<Uuid>,
    pub booking_court_number: Option<i32>,
    pub booking_location: Option<String>,
    pub booking_date: Option<NaiveDate>,
    pub booking_time_slot: Option<String>,
    pub booking_partner_name: Option<String>,
    pub booking_status: Option<BookingStatusDb>,
    pub booking_created_at: Option<DateTime<Utc>>,
    pub booking_updated_at: Option<DateTime<Utc>>,
}

impl PartnerRequestWithDetailsEntity {
    fn booking(&self) -> Option<BookingResponse> {
        Some(BookingResponse {
            id: self.booking_id,
            user_id: self.booking_user_id?,
            court_number: self.booking_court_number?,
            location: self.booking_location.clone()?,
            date: self.booking_date?,
            time_slot: self.booking_time_slot.clone()?,
            partner_name: self.booking_partner_name.clone()?,
            status: self.booking_status?.into(),
            created_at: self.booking_created_at?,
            updated_at: self.booking_updated_at?,
        })
    }
}

impl From<PartnerRequestWithDetailsEntity> for PartnerRequestDetails {
    fn from(entity: PartnerRequestWithDetailsEntity) -> Self {
        let booking = entity.booking();
        Self {
            id: entity.id,
            from_user: PublicUser {
                id: entity.from_user_id,
                username: entity.from_username,
                email: entity.from_email,
            },
            to_user: PublicUser {
                id: entity.to_user_id,
                username: entity.to_username,
                email: entity.to_email,
            },
            booking_id: entity.booking_id,
            booking,
            status: entity.status.into(),
            responded_at: entity.responded_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
