//! Targeted event invitation models.
//!
//! An invitation is single-use and expiring: it starts `pending` and may flip
//! to `accepted` exactly once. Expiry is detected lazily at redemption time,
//! so the stored status never becomes `expired` - responses derive it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shared::pagination::Pagination;
use shared::validation::validate_not_blank;

/// Invitation status as surfaced in responses.
///
/// Only `pending` and `accepted` are persisted; `expired` is derived from
/// `expires_at` when shaping the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Expired,
}

/// Request payload for creating a targeted invitation.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateInvitationRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,

    #[validate(length(max = 32, message = "Phone number must be at most 32 characters"))]
    pub phone_number: Option<String>,

    /// Days until the invitation expires (default 7).
    #[validate(range(min = 1, max = 365, message = "Expiry must be between 1 and 365 days"))]
    pub expires_in_days: Option<i32>,
}

/// Request payload for redeeming an invitation code.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UseInvitationRequest {
    #[validate(
        length(min = 1, max = 32, message = "Code must be between 1 and 32 characters"),
        custom(function = "validate_not_blank")
    )]
    pub code: String,
}

/// Invitation representation in responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InvitationResponse {
    pub id: Uuid,
    pub event_id: Uuid,
    pub code: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub status: InvitationStatus,
    pub invited_by: Option<Uuid>,
    pub expires_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub accepted_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Status counts for an event's invitations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InvitationSummary {
    pub pending: i64,
    pub accepted: i64,
    pub expired: i64,
}

/// Query parameters for listing invitations.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ListInvitationsQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Response for listing an event's invitations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListInvitationsResponse {
    pub data: Vec<InvitationResponse>,
    pub pagination: Pagination,
    pub summary: InvitationSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invitation_status_serialization() {
        assert_eq!(
            serde_json::to_string(&InvitationStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&InvitationStatus::Accepted).unwrap(),
            "\"accepted\""
        );
        assert_eq!(
            serde_json::to_string(&InvitationStatus::Expired).unwrap(),
            "\"expired\""
        );
    }

    #[test]
    fn test_create_invitation_request_validation() {
        let valid = CreateInvitationRequest {
            email: Some("friend@example.com".to_string()),
            phone_number: None,
            expires_in_days: Some(14),
        };
        assert!(valid.validate().is_ok());

        let bad_email = CreateInvitationRequest {
            email: Some("not-an-email".to_string()),
            phone_number: None,
            expires_in_days: None,
        };
        assert!(bad_email.validate().is_err());

        let zero_days = CreateInvitationRequest {
            email: None,
            phone_number: None,
            expires_in_days: Some(0),
        };
        assert!(zero_days.validate().is_err());
    }

    #[test]
    fn test_create_invitation_request_contacts_optional() {
        let request: CreateInvitationRequest = serde_json::from_str("{}").unwrap();
        assert!(request.validate().is_ok());
        assert!(request.email.is_none());
        assert!(request.phone_number.is_none());
        assert!(request.expires_in_days.is_none());
    }

    #[test]
    fn test_use_invitation_request_rejects_blank_code() {
        let blank = UseInvitationRequest {
            code: "  ".to_string(),
        };
        assert!(blank.validate().is_err());

        let ok = UseInvitationRequest {
            code: "XKCDPLATYPUS".to_string(),
        };
        assert!(ok.validate().is_ok());
    }
}
