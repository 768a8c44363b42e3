//! Targeted event invitation routes.
//!
//! Invitations are single-use and expiring: created by an admin (optionally
//! addressed to an email or phone number), redeemed by code exactly once.
//! Expiry is detected lazily at redemption time.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::{
    CreateInvitationRequest, InvitationResponse, InvitationSummary, ListInvitationsQuery,
    ListInvitationsResponse, MembershipResponse, UseInvitationRequest,
};
use domain::services::invite_code::{generate_invitation_code, invitation_expiry};
use persistence::repositories::{EventInvitationRepository, EventRepository};
use shared::pagination::{clamp_page, clamp_per_page, offset, Pagination};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::authorization::require_event_admin;
use crate::services::membership;

use super::invitation_response;

/// How many code collisions to tolerate before giving up. Codes are globally
/// unique and 12 characters from a 32-character alphabet, so a retry is
/// already a rare event.
const CODE_GENERATION_ATTEMPTS: usize = 3;

/// Create a targeted invitation.
///
/// POST /api/v1/events/:event_id/invitations
pub async fn create_invitation(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(event_id): Path<Uuid>,
    Json(request): Json<CreateInvitationRequest>,
) -> Result<(StatusCode, Json<InvitationResponse>), ApiError> {
    request.validate()?;

    let events = EventRepository::new(state.pool.clone());
    let event = events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    require_event_admin(&state.pool, &event, user_auth.user_id).await?;

    let invitations = EventInvitationRepository::new(state.pool.clone());
    let expires_at = invitation_expiry(request.expires_in_days);

    for _ in 0..CODE_GENERATION_ATTEMPTS {
        let code = generate_invitation_code();
        match invitations
            .create(
                event_id,
                &code,
                request.email.as_deref(),
                request.phone_number.as_deref(),
                user_auth.user_id,
                expires_at,
            )
            .await
        {
            Ok(entity) => {
                info!(
                    event_id = %event_id,
                    invitation_id = %entity.id,
                    user_id = %user_auth.user_id,
                    expires_at = %entity.expires_at,
                    "Invitation created"
                );
                return Ok((StatusCode::CREATED, Json(invitation_response(entity))));
            }
            Err(sqlx::Error::Database(db_err))
                if db_err.code().as_deref() == Some("23505") =>
            {
                continue;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(ApiError::Internal(
        "Failed to generate a unique invitation code".to_string(),
    ))
}

/// List an event's invitations with status summary.
///
/// GET /api/v1/events/:event_id/invitations
pub async fn list_invitations(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(event_id): Path<Uuid>,
    Query(query): Query<ListInvitationsQuery>,
) -> Result<Json<ListInvitationsResponse>, ApiError> {
    let events = EventRepository::new(state.pool.clone());
    let event = events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    require_event_admin(&state.pool, &event, user_auth.user_id).await?;

    let page = clamp_page(query.page);
    let per_page = clamp_per_page(query.per_page);

    let invitations = EventInvitationRepository::new(state.pool.clone());
    let entities = invitations
        .list_by_event(event_id, per_page, offset(page, per_page))
        .await?;
    let total = invitations.count_by_event(event_id).await?;
    let counts = invitations.summary_counts(event_id).await?;

    let data: Vec<InvitationResponse> =
        entities.into_iter().map(invitation_response).collect();

    Ok(Json(ListInvitationsResponse {
        data,
        pagination: Pagination::new(page, per_page, total),
        summary: InvitationSummary {
            pending: counts.pending,
            accepted: counts.accepted,
            expired: counts.expired,
        },
    }))
}

/// Revoke a pending invitation.
///
/// DELETE /api/v1/events/:event_id/invitations/:invitation_id
///
/// Accepted invitations cannot be revoked.
pub async fn revoke_invitation(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((event_id, invitation_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let events = EventRepository::new(state.pool.clone());
    let event = events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    require_event_admin(&state.pool, &event, user_auth.user_id).await?;

    let invitations = EventInvitationRepository::new(state.pool.clone());
    let deleted = invitations.delete_pending(invitation_id, event_id).await?;
    if !deleted {
        return Err(ApiError::NotFound(
            "Invitation not found or already accepted".to_string(),
        ));
    }

    info!(
        event_id = %event_id,
        invitation_id = %invitation_id,
        user_id = %user_auth.user_id,
        "Invitation revoked"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Redeem an invitation code.
///
/// POST /api/v1/events/:event_id/invitations/use
///
/// On success the caller joins the event and the invitation flips to
/// accepted; the transition is terminal.
pub async fn use_invitation(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(event_id): Path<Uuid>,
    Json(request): Json<UseInvitationRequest>,
) -> Result<Json<MembershipResponse>, ApiError> {
    request.validate()?;

    let events = EventRepository::new(state.pool.clone());
    let event = events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    let invitations = EventInvitationRepository::new(state.pool.clone());
    let invitation = invitations
        .find_by_code(&request.code)
        .await?
        .ok_or_else(|| ApiError::NotFound("Invitation not found".to_string()))?;

    if invitation.event_id != event_id {
        return Err(ApiError::Conflict(
            "Invitation does not belong to this event".to_string(),
        ));
    }
    if !invitation.is_pending() {
        return Err(ApiError::Conflict(
            "Invitation has already been used".to_string(),
        ));
    }
    if invitation.is_expired() {
        return Err(ApiError::Conflict("Invitation has expired".to_string()));
    }

    let participant =
        membership::redeem_event_invitation(&state.pool, &event, &invitation, user_auth.user_id)
            .await?;

    info!(
        event_id = %event_id,
        invitation_id = %invitation.id,
        user_id = %user_auth.user_id,
        "Invitation redeemed"
    );

    Ok(Json(MembershipResponse {
        user_id: participant.user_id,
        points: participant.points,
        rank: participant.rank,
        joined_at: participant.joined_at,
    }))
}
