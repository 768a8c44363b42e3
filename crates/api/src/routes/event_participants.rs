//! Event participation routes: join, leave, and admin-managed participants.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{
    AddMemberRequest, JoinRequest, ListMembersResponse, MembershipResponse,
};
use persistence::repositories::{EventParticipantRepository, EventRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::authorization::{require_event_admin, require_event_view};
use crate::services::membership;

use super::member_response;

/// Join an event.
///
/// POST /api/v1/events/:event_id/join
///
/// Private events require a matching invite code; full events conflict.
pub async fn join_event(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(event_id): Path<Uuid>,
    Json(request): Json<JoinRequest>,
) -> Result<(StatusCode, Json<MembershipResponse>), ApiError> {
    request.validate()?;

    let events = EventRepository::new(state.pool.clone());
    let event = events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    let participant = membership::join_event(
        &state.pool,
        &event,
        user_auth.user_id,
        request.invite_code.as_deref(),
    )
    .await?;

    info!(
        event_id = %event_id,
        user_id = %user_auth.user_id,
        rank = participant.rank,
        "User joined event"
    );

    Ok((
        StatusCode::CREATED,
        Json(MembershipResponse {
            user_id: participant.user_id,
            points: participant.points,
            rank: participant.rank,
            joined_at: participant.joined_at,
        }),
    ))
}

/// Leave an event.
///
/// POST /api/v1/events/:event_id/leave
pub async fn leave_event(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(event_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let events = EventRepository::new(state.pool.clone());
    let event = events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    membership::leave_event(&state.pool, &event, user_auth.user_id).await?;

    info!(
        event_id = %event_id,
        user_id = %user_auth.user_id,
        "User left event"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// List event participants in rank order.
///
/// GET /api/v1/events/:event_id/participants
pub async fn list_participants(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(event_id): Path<Uuid>,
) -> Result<Json<ListMembersResponse>, ApiError> {
    let events = EventRepository::new(state.pool.clone());
    let event = events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    require_event_view(&state.pool, &event, user_auth.user_id).await?;

    let participants = EventParticipantRepository::new(state.pool.clone());
    let rows = participants.list_with_users(event_id).await?;
    let data: Vec<_> = rows.into_iter().map(member_response).collect();
    let count = data.len();

    Ok(Json(ListMembersResponse { data, count }))
}

/// Add a participant directly (admin action).
///
/// POST /api/v1/events/:event_id/participants
pub async fn add_participant(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(event_id): Path<Uuid>,
    Json(request): Json<AddMemberRequest>,
) -> Result<(StatusCode, Json<MembershipResponse>), ApiError> {
    let events = EventRepository::new(state.pool.clone());
    let event = events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    require_event_admin(&state.pool, &event, user_auth.user_id).await?;

    let participant =
        membership::add_event_participant(&state.pool, &event, request.user_id).await?;

    info!(
        event_id = %event_id,
        admin_id = %user_auth.user_id,
        user_id = %request.user_id,
        "Admin added event participant"
    );

    Ok((
        StatusCode::CREATED,
        Json(MembershipResponse {
            user_id: participant.user_id,
            points: participant.points,
            rank: participant.rank,
            joined_at: participant.joined_at,
        }),
    ))
}

/// Remove a participant (admin action). The owner cannot be removed.
///
/// DELETE /api/v1/events/:event_id/participants/:user_id
pub async fn remove_participant(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((event_id, target_user_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let events = EventRepository::new(state.pool.clone());
    let event = events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    require_event_admin(&state.pool, &event, user_auth.user_id).await?;

    membership::remove_event_participant(&state.pool, &event, target_user_id).await?;

    info!(
        event_id = %event_id,
        admin_id = %user_auth.user_id,
        user_id = %target_user_id,
        "Admin removed event participant"
    );

    Ok(StatusCode::NO_CONTENT)
}
