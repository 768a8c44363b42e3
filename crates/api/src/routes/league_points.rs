//! League points and leaderboard routes.

use axum::{
    extract::{Path, State},
    Json,
};
use domain::models::{AssignPointsRequest, LeaderboardResponse, PointsAssignment};
use persistence::repositories::{LeagueMemberRepository, LeagueRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::authorization::{require_league_admin, require_league_view};
use crate::services::scoring;

use super::leaderboard_entry;

/// Assign points to a league member.
///
/// POST /api/v1/leagues/:league_id/points
///
/// Admin only. The delta is additive and not idempotent; the league is
/// re-ranked before the response is returned.
pub async fn assign_points(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(league_id): Path<Uuid>,
    Json(request): Json<AssignPointsRequest>,
) -> Result<Json<PointsAssignment>, ApiError> {
    request.validate()?;

    let leagues = LeagueRepository::new(state.pool.clone());
    let league = leagues
        .find_by_id(league_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("League not found".to_string()))?;

    require_league_admin(&state.pool, &league, user_auth.user_id).await?;

    let assignment = scoring::assign_league_points(
        &state.pool,
        &league,
        request.user_id,
        request.points,
        request.category,
        request.reason,
    )
    .await?;

    info!(
        league_id = %league_id,
        admin_id = %user_auth.user_id,
        user_id = %request.user_id,
        delta = request.points,
        category = %request.category,
        total_points = assignment.total_points,
        "Points assigned to league member"
    );

    Ok(Json(assignment))
}

/// Get the league leaderboard.
///
/// GET /api/v1/leagues/:league_id/leaderboard
///
/// Returns members in rank order as of the last completed recompute.
pub async fn get_leaderboard(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(league_id): Path<Uuid>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let leagues = LeagueRepository::new(state.pool.clone());
    let league = leagues
        .find_by_id(league_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("League not found".to_string()))?;

    require_league_view(&state.pool, &league, user_auth.user_id).await?;

    let members = LeagueMemberRepository::new(state.pool.clone());
    let rows = members.list_with_users(league_id).await?;
    let data: Vec<_> = rows.into_iter().map(leaderboard_entry).collect();
    let count = data.len();

    Ok(Json(LeaderboardResponse { data, count }))
}
