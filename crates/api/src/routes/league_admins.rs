//! Delegated league admin routes.
//!
//! Delegated admins are a relation on (league, user); the owner is a
//! distinct, non-revocable role layered on top and never appears here.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::LeagueAdminResponse;
use persistence::repositories::{LeagueAdminRepository, LeagueMemberRepository, LeagueRepository};
use tracing::info;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::authorization::require_league_admin;

/// Grant delegated admin rights to a member.
///
/// POST /api/v1/leagues/:league_id/admins/:user_id
pub async fn grant_admin(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((league_id, target_user_id)): Path<(Uuid, Uuid)>,
) -> Result<(StatusCode, Json<LeagueAdminResponse>), ApiError> {
    let leagues = LeagueRepository::new(state.pool.clone());
    let league = leagues
        .find_by_id(league_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("League not found".to_string()))?;

    require_league_admin(&state.pool, &league, user_auth.user_id).await?;

    if target_user_id == league.owner_id {
        return Err(ApiError::Conflict(
            "The owner already has admin rights".to_string(),
        ));
    }

    let members = LeagueMemberRepository::new(state.pool.clone());
    if !members.exists(league_id, target_user_id).await? {
        return Err(ApiError::NotFound(
            "User is not a member of this league".to_string(),
        ));
    }

    let admins = LeagueAdminRepository::new(state.pool.clone());
    if admins.exists(league_id, target_user_id).await? {
        return Err(ApiError::Conflict(
            "User is already an admin of this league".to_string(),
        ));
    }

    let grant = admins
        .insert(league_id, target_user_id, user_auth.user_id)
        .await?;

    info!(
        league_id = %league_id,
        granter_id = %user_auth.user_id,
        user_id = %target_user_id,
        "Delegated admin granted"
    );

    Ok((
        StatusCode::CREATED,
        Json(LeagueAdminResponse {
            league_id: grant.league_id,
            user_id: grant.user_id,
            granted_by: grant.granted_by,
            granted_at: grant.granted_at,
        }),
    ))
}

/// Revoke delegated admin rights.
///
/// DELETE /api/v1/leagues/:league_id/admins/:user_id
///
/// The owner's rights can never be revoked.
pub async fn revoke_admin(
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

    if target_user_id == league.owner_id {
        return Err(ApiError::Forbidden(
            "Cannot revoke the owner's admin rights".to_string(),
        ));
    }

    let admins = LeagueAdminRepository::new(state.pool.clone());
    let revoked = admins.delete(league_id, target_user_id).await?;
    if !revoked {
        return Err(ApiError::NotFound(
            "User is not an admin of this league".to_string(),
        ));
    }

    info!(
        league_id = %league_id,
        revoker_id = %user_auth.user_id,
        user_id = %target_user_id,
        "Delegated admin revoked"
    );

    Ok(StatusCode::NO_CONTENT)
}
