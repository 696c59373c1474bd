//! Ownership and participation rules for bookings and partner requests.
//!
//! These checks only look at loaded records; lookups and the atomic
//! status changes live in the persistence layer.

use thiserror::Error;
use uuid::Uuid;

use crate::models::{check_self_request, Booking, PartnerRequest};

/// A rule that denied an action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessDenied {
    /// The caller does not own the booking.
    #[error("Not authorized")]
    NotBookingOwner,

    /// A partner request was sent for somebody else's booking.
    #[error("You can only partner request for your own booking")]
    ForeignBooking,

    /// The sender and recipient are the same user.
    #[error("You cannot send a request to yourself")]
    SelfRequest,

    /// The caller is not the recipient of the partner request.
    #[error("Not authorized")]
    NotRecipient,
}

impl AccessDenied {
    /// Whether the denial is about the input (400) rather than permissions (403).
    pub fn is_bad_request(&self) -> bool {
        matches!(self, AccessDenied::SelfRequest)
    }
}

/// Only the owner may view, update or delete a booking.
pub fn ensure_booking_owner(booking: &Booking, user_id: Uuid) -> Result<(), AccessDenied> {
    if booking.is_owned_by(user_id) {
        Ok(())
    } else {
        Err(AccessDenied::NotBookingOwner)
    }
}

/// A partner request needs a different recipient and the sender's own booking.
pub fn ensure_can_request_partner(
    from_user_id: Uuid,
    to_user_id: Uuid,
    booking: &Booking,
) -> Result<(), AccessDenied> {
    check_self_request(from_user_id, to_user_id).map_err(|_| AccessDenied::SelfRequest)?;
    if !booking.is_owned_by(from_user_id) {
        return Err(AccessDenied::ForeignBooking);
    }
    Ok(())
}

/// Only the recipient may accept or reject a partner request.
pub fn ensure_can_respond(request: &PartnerRequest, user_id: Uuid) -> Result<(), AccessDenied> {
    if request.is_addressed_to(user_id) {
        Ok(())
    } else {
        Err(AccessDenied::NotRecipient)
    }
}
