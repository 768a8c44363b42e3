//! HTTP route handlers.

pub mod event_invitations;
pub mod event_participants;
pub mod event_points;
pub mod event_rules;
pub mod events;
pub mod health;
pub mod league_admins;
pub mod league_members;
pub mod league_points;
pub mod league_rules;
pub mod leagues;

use domain::models::{
    InvitationResponse, InvitationStatus, LeaderboardEntry, MemberResponse, RuleCategory,
    RuleResponse, UserPublic,
};
use persistence::entities::{EventInvitationEntity, MemberRowEntity};

use crate::error::ApiError;

/// Shapes a member/participant row into its list representation.
pub(crate) fn member_response(row: MemberRowEntity) -> MemberResponse {
    MemberResponse {
        user: UserPublic {
            id: row.user_id,
            display_name: row.display_name,
            avatar_url: row.avatar_url,
        },
        points: row.points,
        rank: row.rank,
        joined_at: row.joined_at,
    }
}

/// Shapes a member/participant row into a leaderboard entry.
pub(crate) fn leaderboard_entry(row: MemberRowEntity) -> LeaderboardEntry {
    LeaderboardEntry {
        user_id: row.user_id,
        username: row.display_name,
        avatar_url: row.avatar_url,
        total_points: row.points,
        rank: row.rank,
    }
}

/// Parses a stored rule category, surfacing corruption as an internal error.
pub(crate) fn parse_category(raw: &str) -> Result<RuleCategory, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::Internal(format!("Invalid rule category in storage: {}", raw)))
}

/// Shapes a rule row into its response representation.
pub(crate) fn rule_response(
    id: uuid::Uuid,
    title: String,
    description: Option<String>,
    points: i32,
    category: &str,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
) -> Result<RuleResponse, ApiError> {
    Ok(RuleResponse {
        id,
        title,
        description,
        points,
        category: parse_category(category)?,
        created_at,
        updated_at,
    })
}

/// Shapes an invitation row, deriving the surfaced status (`expired` is
/// never stored, only derived).
pub(crate) fn invitation_response(entity: EventInvitationEntity) -> InvitationResponse {
    let status = if !entity.is_pending() {
        InvitationStatus::Accepted
    } else if entity.is_expired() {
        InvitationStatus::Expired
    } else {
        InvitationStatus::Pending
    };

    InvitationResponse {
        id: entity.id,
        event_id: entity.event_id,
        code: entity.code,
        email: entity.email,
        phone_number: entity.phone_number,
        status,
        invited_by: entity.invited_by,
        expires_at: entity.expires_at,
        accepted_at: entity.accepted_at,
        accepted_by: entity.accepted_by,
        created_at: entity.created_at,
    }
}
