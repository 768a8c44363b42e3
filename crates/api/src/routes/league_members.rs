//! League membership routes: join, leave, and admin-managed members.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{
    AddMemberRequest, JoinRequest, ListMembersResponse, MembershipResponse,
};
use persistence::repositories::{LeagueMemberRepository, LeagueRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::authorization::{require_league_admin, require_league_view};
use crate::services::membership;

use super::member_response;

/// Join a league.
///
/// POST /api/v1/leagues/:league_id/join
///
/// Private leagues require a matching invite code in the body.
pub async fn join_league(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(league_id): Path<Uuid>,
    Json(request): Json<JoinRequest>,
) -> Result<(StatusCode, Json<MembershipResponse>), ApiError> {
    request.validate()?;

    let leagues = LeagueRepository::new(state.pool.clone());
    let league = leagues
        .find_by_id(league_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("League not found".to_string()))?;

    let member = membership::join_league(
        &state.pool,
        &league,
        user_auth.user_id,
        request.invite_code.as_deref(),
    )
    .await?;

    info!(
        league_id = %league_id,
        user_id = %user_auth.user_id,
        rank = member.rank,
        "User joined league"
    );

    Ok((
        StatusCode::CREATED,
        Json(MembershipResponse {
            user_id: member.user_id,
            points: member.points,
            rank: member.rank,
            joined_at: member.joined_at,
        }),
    ))
}

/// Leave a league.
///
/// POST /api/v1/leagues/:league_id/leave
pub async fn leave_league(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(league_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let leagues = LeagueRepository::new(state.pool.clone());
    let league = leagues
        .find_by_id(league_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("League not found".to_string()))?;

    membership::leave_league(&state.pool, &league, user_auth.user_id).await?;

    info!(
        league_id = %league_id,
        user_id = %user_auth.user_id,
        "User left league"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// List league members in rank order.
///
/// GET /api/v1/leagues/:league_id/members
pub async fn list_members(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(league_id): Path<Uuid>,
) -> Result<Json<ListMembersResponse>, ApiError> {
    let leagues = LeagueRepository::new(state.pool.clone());
    let league = leagues
        .find_by_id(league_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("League not found".to_string()))?;

    require_league_view(&state.pool, &league, user_auth.user_id).await?;

    let members = LeagueMemberRepository::new(state.pool.clone());
    let rows = members.list_with_users(league_id).await?;
    let data: Vec<_> = rows.into_iter().map(member_response).collect();
    let count = data.len();

    Ok(Json(ListMembersResponse { data, count }))
}

/// Add a member directly (admin action).
///
/// POST /api/v1/leagues/:league_id/members
pub async fn add_member(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(league_id): Path<Uuid>,
    Json(request): Json<AddMemberRequest>,
) -> Result<(StatusCode, Json<MembershipResponse>), ApiError> {
    let leagues = LeagueRepository::new(state.pool.clone());
    let league = leagues
        .find_by_id(league_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("League not found".to_string()))?;

    require_league_admin(&state.pool, &league, user_auth.user_id).await?;

    let member = membership::add_league_member(&state.pool, &league, request.user_id).await?;

    info!(
        league_id = %league_id,
        admin_id = %user_auth.user_id,
        user_id = %request.user_id,
        "Admin added league member"
    );

    Ok((
        StatusCode::CREATED,
        Json(MembershipResponse {
            user_id: member.user_id,
            points: member.points,
            rank: member.rank,
            joined_at: member.joined_at,
        }),
    ))
}

/// Remove a member (admin action). The owner cannot be removed.
///
/// DELETE /api/v1/leagues/:league_id/members/:user_id
pub async fn remove_member(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((league_id, target_user_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let leagues = LeagueRepository::new(state.pool.clone());
    let league = leagues
        .find_by_id(league_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("League not found".to_string()))?;

    require_league_admin(&state.pool, &league, user_auth.user_id).await?;

    membership::remove_league_member(&state.pool, &league, target_user_id).await?;

    info!(
        league_id = %league_id,
        admin_id = %user_auth.user_id,
        user_id = %target_user_id,
        "Admin removed league member"
    );

    Ok(StatusCode::NO_CONTENT)
}
