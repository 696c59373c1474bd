//! Partner request service: ask another user to join a booking, and
//! accept or reject such requests.

use uuid::Uuid;

use domain::models::partner_request::{CreatePartnerRequest, RespondRequest};
use domain::models::{Booking, PartnerRequest, PartnerRequestDetails};
use domain::services::{ensure_can_request_partner, ensure_can_respond, AccessDenied};
use persistence::entities::PartnerRequestStatusDb;
use persistence::repositories::{BookingRepository, PartnerRequestRepository, UserRepository};
use thiserror::Error;

use crate::error::ApiError;
use crate::middleware::metrics::{record_partner_request_created, record_partner_request_resolved};

/// Errors that can occur during partner request operations.
#[derive(Debug, Error)]
pub enum PartnerRequestError {
    #[error("{0}")]
    Validation(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Request not found")]
    RequestNotFound,

    #[error("{0}")]
    Denied(AccessDenied),

    #[error("Request already sent")]
    AlreadySent,

    #[error("Request already resolved")]
    AlreadyResolved,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl From<PartnerRequestError> for ApiError {
    fn from(err: PartnerRequestError) -> Self {
        match err {
            PartnerRequestError::Validation(msg) => ApiError::Validation(msg),
            PartnerRequestError::UserNotFound | PartnerRequestError::RequestNotFound => {
                ApiError::NotFound(err.to_string())
            }
            PartnerRequestError::Denied(denied) if denied.is_bad_request() => {
                ApiError::Validation(denied.to_string())
            }
            PartnerRequestError::Denied(denied) => ApiError::Forbidden(denied.to_string()),
            PartnerRequestError::AlreadySent | PartnerRequestError::AlreadyResolved => {
                ApiError::Conflict(err.to_string())
            }
            PartnerRequestError::DatabaseError(db_err) => ApiError::from(db_err),
        }
    }
}

/// Partner request service.
#[derive(Clone)]
pub struct PartnerRequestService {
    users: UserRepository,
    bookings: BookingRepository,
    requests: PartnerRequestRepository,
}

impl PartnerRequestService {
    pub fn new(
        users: UserRepository,
        bookings: BookingRepository,
        requests: PartnerRequestRepository,
    ) -> Self {
        Self {
            users,
            bookings,
            requests,
        }
    }

    /// Sends a pending partner request from `actor` for one of their bookings.
    ///
    /// `request` must already have passed `validate()`.
    pub async fn send(
        &self,
        actor: Uuid,
        request: CreatePartnerRequest,
    ) -> Result<PartnerRequest, PartnerRequestError> {
        let (Some(to_user_id), Some(booking_id)) = (request.to_user_id, request.booking_id) else {
            return Err(PartnerRequestError::Validation(
                "Missing required fields".to_string(),
            ));
        };

        if to_user_id == actor {
            return Err(PartnerRequestError::Denied(AccessDenied::SelfRequest));
        }

        if self.users.find_by_id(to_user_id).await?.is_none() {
            return Err(PartnerRequestError::UserNotFound);
        }

        let booking: Booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or(PartnerRequestError::Denied(AccessDenied::ForeignBooking))?
            .into();
        ensure_can_request_partner(actor, to_user_id, &booking)
            .map_err(PartnerRequestError::Denied)?;

        let created: PartnerRequest = self
            .requests
            .create_if_absent(actor, to_user_id, booking_id)
            .await?
            .ok_or(PartnerRequestError::AlreadySent)?
            .into();

        record_partner_request_created();
        tracing::info!(
            request_id = %created.id,
            user_id = %actor,
            to_user_id = %to_user_id,
            booking_id = %booking_id,
            "Partner request sent"
        );
        Ok(created)
    }

    /// Requests addressed to `actor`, newest first.
    pub async fn list_incoming(
        &self,
        actor: Uuid,
    ) -> Result<Vec<PartnerRequestDetails>, PartnerRequestError> {
        let rows = self.requests.list_incoming(actor).await?;
        Ok(rows.into_iter().map(PartnerRequestDetails::from).collect())
    }

    /// Requests sent by `actor`, newest first.
    pub async fn list_outgoing(
        &self,
        actor: Uuid,
    ) -> Result<Vec<PartnerRequestDetails>, PartnerRequestError> {
        let rows = self.requests.list_outgoing(actor).await?;
        Ok(rows.into_iter().map(PartnerRequestDetails::from).collect())
    }

    /// Accepts or rejects a pending request addressed to `actor`.
    ///
    /// Accepting also names `actor` as the partner on the booking.
    pub async fn respond(
        &self,
        actor: Uuid,
        request_id: Uuid,
        body: RespondRequest,
    ) -> Result<PartnerRequest, PartnerRequestError> {
        let action = body
            .parse_action()
            .map_err(PartnerRequestError::Validation)?;

        let request: PartnerRequest = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or(PartnerRequestError::RequestNotFound)?
            .into();

        ensure_can_respond(&request, actor).map_err(PartnerRequestError::Denied)?;
        let target = request
            .status
            .apply(action)
            .map_err(|_| PartnerRequestError::AlreadyResolved)?;

        let resolved: PartnerRequest = self
            .requests
            .resolve(request_id, actor, PartnerRequestStatusDb::from(target))
            .await?
            .ok_or(PartnerRequestError::AlreadyResolved)?
            .into();

        record_partner_request_resolved(resolved.status.as_str());
        tracing::info!(
            request_id = %resolved.id,
            user_id = %actor,
            booking_id = %resolved.booking_id,
            status = %resolved.status,
            "Partner request resolved"
        );
        Ok(resolved)
    }
}
