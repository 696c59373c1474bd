//! Partner request domain models.
//!
//! A partner request asks another user to join one of the sender's
//! bookings. It starts out pending and is resolved exactly once by its
//! recipient.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use super::booking::BookingResponse;
use super::user::PublicUser;

/// Status of a partner request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartnerRequestStatus {
    Pending,
    Accepted,
    Rejected,
}

/// Error returned when a status transition is not allowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Request already resolved")]
pub struct TransitionError {
    pub current: PartnerRequestStatus,
}

impl PartnerRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartnerRequestStatus::Pending => "pending",
            PartnerRequestStatus::Accepted => "accepted",
            PartnerRequestStatus::Rejected => "rejected",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, PartnerRequestStatus::Pending)
    }

    /// Applies a recipient's action. Only pending requests can move.
    pub fn apply(self, action: RespondAction) -> Result<PartnerRequestStatus, TransitionError> {
        if !self.is_pending() {
            return Err(TransitionError { current: self });
        }
        Ok(action.target_status())
    }
}

impl fmt::Display for PartnerRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Action a recipient takes on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RespondAction {
    Accepted,
    Rejected,
}

impl RespondAction {
    pub fn target_status(&self) -> PartnerRequestStatus {
        match self {
            RespondAction::Accepted => PartnerRequestStatus::Accepted,
            RespondAction::Rejected => PartnerRequestStatus::Rejected,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.target_status().as_str()
    }
}

impl FromStr for RespondAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accepted" => Ok(RespondAction::Accepted),
            "rejected" => Ok(RespondAction::Rejected),
            _ => Err("Invalid action".to_string()),
        }
    }
}

/// A partner request as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerRequest {
    pub id: Uuid,
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub booking_id: Uuid,
    pub status: PartnerRequestStatus,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PartnerRequest {
    pub fn is_addressed_to(&self, user_id: Uuid) -> bool {
        self.to_user_id == user_id
    }
}

/// Request payload for sending a partner request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartnerRequest {
    #[validate(required(message = "Missing required fields"))]
    pub to_user_id: Option<Uuid>,

    #[validate(required(message = "Missing required fields"))]
    pub booking_id: Option<Uuid>,
}

/// Request payload for accepting or rejecting a partner request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RespondRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Invalid action"))]
    pub action: String,
}

impl RespondRequest {
    pub fn parse_action(&self) -> Result<RespondAction, String> {
        self.action.trim().parse()
    }
}

/// Returns an error message when `from` may not send a request to `to`.
pub fn check_self_request(from: Uuid, to: Uuid) -> Result<(), &'static str> {
    if from == to {
        Err("You cannot send a request to yourself")
    } else {
        Ok(())
    }
}

/// Response payload for a single partner request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerRequestResponse {
    pub id: Uuid,
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub booking_id: Uuid,
    pub status: PartnerRequestStatus,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PartnerRequest> for PartnerRequestResponse {
    fn from(r: PartnerRequest) -> Self {
        Self {
            id: r.id,
            from_user_id: r.from_user_id,
            to_user_id: r.to_user_id,
            booking_id: r.booking_id,
            status: r.status,
            responded_at: r.responded_at,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Envelope for a single partner request plus a status message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerRequestEnvelope {
    pub message: String,
    pub request: PartnerRequestResponse,
}

/// A partner request with both users and the booking expanded.
///
/// `booking` is `None` once the referenced booking has been deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerRequestDetails {
    pub id: Uuid,
    pub from_user: PublicUser,
    pub to_user: PublicUser,
    pub booking_id: Uuid,
    pub booking: Option<BookingResponse>,
    pub status: PartnerRequestStatus,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response for listing a user's incoming or outgoing requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPartnerRequestsResponse {
    pub requests: Vec<PartnerRequestDetails>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&PartnerRequestStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&PartnerRequestStatus::Accepted).unwrap(),
            "\"accepted\""
        );
        assert_eq!(
            serde_json::to_string(&PartnerRequestStatus::Rejected).unwrap(),
            "\"rejected\""
        );
    }

    #[test]
    fn test_pending_transitions() {
        let pending = PartnerRequestStatus::Pending;
        assert_eq!(
            pending.apply(RespondAction::Accepted),
            Ok(PartnerRequestStatus::Accepted)
        );
        assert_eq!(
            pending.apply(RespondAction::Rejected),
            Ok(PartnerRequestStatus::Rejected)
        );
    }

    #[test]
    fn test_resolved_requests_are_final() {
        for status in [PartnerRequestStatus::Accepted, PartnerRequestStatus::Rejected] {
            for action in [RespondAction::Accepted, RespondAction::Rejected] {
                let err = status.apply(action).unwrap_err();
                assert_eq!(err.current, status);
                assert_eq!(err.to_string(), "Request already resolved");
            }
        }
    }

    #[test]
    fn test_respond_action_parsing() {
        assert_eq!("accepted".parse(), Ok(RespondAction::Accepted));
        assert_eq!("rejected".parse(), Ok(RespondAction::Rejected));
        assert_eq!(
            "pending".parse::<RespondAction>(),
            Err("Invalid action".to_string())
        );
        assert!("Accepted".parse::<RespondAction>().is_err());
    }

    #[test]
    fn test_respond_request_missing_action() {
        let request: RespondRequest = serde_json::from_str("{}").unwrap();
        assert!(request.validate().is_err());
        assert!(request.parse_action().is_err());
    }

    #[test]
    fn test_respond_request_trims_action() {
        let request: RespondRequest =
            serde_json::from_value(serde_json::json!({ "action": " rejected " })).unwrap();
        assert_eq!(request.parse_action(), Ok(RespondAction::Rejected));
    }

    #[test]
    fn test_create_request_requires_both_ids() {
        let request: CreatePartnerRequest =
            serde_json::from_value(serde_json::json!({ "toUserId": Uuid::new_v4() })).unwrap();
        assert!(request.validate().is_err());

        let request: CreatePartnerRequest = serde_json::from_value(serde_json::json!({
            "toUserId": Uuid::new_v4(),
            "bookingId": Uuid::new_v4()
        }))
        .unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_self_request_rejected() {
        let me = Uuid::new_v4();
        assert_eq!(
            check_self_request(me, me),
            Err("You cannot send a request to yourself")
        );
        assert!(check_self_request(me, Uuid::new_v4()).is_ok());
    }

    #[test]
    fn test_request_parties() {
        let request = PartnerRequest {
            id: Uuid::new_v4(),
            from_user_id: Uuid::new_v4(),
            to_user_id: Uuid::new_v4(),
            booking_id: Uuid::new_v4(),
            status: PartnerRequestStatus::Pending,
            responded_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(request.is_addressed_to(request.to_user_id));
        assert!(!request.is_addressed_to(request.from_user_id));
    }

    #[test]
    fn test_details_with_deleted_booking_serializes_null() {
        let alice = PublicUser {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
        };
        let bob = PublicUser {
            id: Uuid::new_v4(),
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
        };
        let details = PartnerRequestDetails {
            id: Uuid::new_v4(),
            from_user: alice,
            to_user: bob,
            booking_id: Uuid::new_v4(),
            booking: None,
            status: PartnerRequestStatus::Pending,
            responded_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&details).unwrap();
        assert!(json["booking"].is_null());
        assert!(json["respondedAt"].is_null());
        assert_eq!(json["fromUser"]["username"], "alice");
        assert_eq!(json["toUser"]["username"], "bob");
    }
}
