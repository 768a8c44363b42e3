//! Event points and leaderboard routes.

use axum::{
    extract::{Path, State},
    Json,
};
use domain::models::{AssignPointsRequest, LeaderboardResponse, PointsAssignment};
use persistence::repositories::{EventParticipantRepository, EventRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::authorization::{require_event_admin, require_event_view};
use crate::services::scoring;

use super::leaderboard_entry;

/// Assign points to an event participant.
///
/// POST /api/v1/events/:event_id/points
///
/// Admin only. For events linked to a league, the delta is also mirrored
/// onto the user's league membership and the league is re-ranked; users who
/// are not league members keep the points event-local.
pub async fn assign_points(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(event_id): Path<Uuid>,
    Json(request): Json<AssignPointsRequest>,
) -> Result<Json<PointsAssignment>, ApiError> {
    request.validate()?;

    let events = EventRepository::new(state.pool.clone());
    let event = events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    require_event_admin(&state.pool, &event, user_auth.user_id).await?;

    let assignment = scoring::assign_event_points(
        &state.pool,
        &event,
        request.user_id,
        request.points,
        request.category,
        request.reason,
    )
    .await?;

    info!(
        event_id = %event_id,
        league_id = ?event.league_id,
        admin_id = %user_auth.user_id,
        user_id = %request.user_id,
        delta = request.points,
        category = %request.category,
        total_points = assignment.total_points,
        "Points assigned to event participant"
    );

    Ok(Json(assignment))
}

/// Get the event leaderboard.
///
/// GET /api/v1/events/:event_id/leaderboard
pub async fn get_leaderboard(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(event_id): Path<Uuid>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let events = EventRepository::new(state.pool.clone());
    let event = events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    require_event_view(&state.pool, &event, user_auth.user_id).await?;

    let participants = EventParticipantRepository::new(state.pool.clone());
    let rows = participants.list_with_users(event_id).await?;
    let data: Vec<_> = rows.into_iter().map(leaderboard_entry).collect();
    let count = data.len();

    Ok(Json(LeaderboardResponse { data, count }))
}
