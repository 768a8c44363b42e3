//! Membership DTOs shared by league members and event participants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::user::UserPublic;

/// Request payload for joining a league or event.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct JoinRequest {
    /// Required for private entities; must match the stored code exactly.
    #[validate(length(max = 16, message = "Invite code must be at most 16 characters"))]
    pub invite_code: Option<String>,
}

/// Request payload for an admin adding a member directly.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AddMemberRequest {
    pub user_id: Uuid,
}

/// A member or participant in list responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MemberResponse {
    pub user: UserPublic,
    pub points: i32,
    pub rank: i32,
    pub joined_at: DateTime<Utc>,
}

/// A freshly created or joined membership.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MembershipResponse {
    pub user_id: Uuid,
    pub points: i32,
    pub rank: i32,
    pub joined_at: DateTime<Utc>,
}

/// Response for listing members or participants, ordered by rank.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListMembersResponse {
    pub data: Vec<MemberResponse>,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_request_code_optional() {
        let request: JoinRequest = serde_json::from_str("{}").unwrap();
        assert!(request.invite_code.is_none());
        assert!(request.validate().is_ok());

        let with_code: JoinRequest =
            serde_json::from_str(r#"{"invite_code": "A1B2C3D4"}"#).unwrap();
        assert_eq!(with_code.invite_code.as_deref(), Some("A1B2C3D4"));
    }

    #[test]
    fn test_join_request_rejects_oversized_code() {
        let request = JoinRequest {
            invite_code: Some("X".repeat(17)),
        };
        assert!(request.validate().is_err());
    }
}
