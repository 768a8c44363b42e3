//! League management routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{
    CreateLeagueRequest, LeagueDetail, LeagueResponse, LeagueSummary, ListLeaguesResponse,
    UpdateLeagueRequest, UserPublic,
};
use domain::services::invite_code::generate_invite_code;
use persistence::repositories::{
    LeagueAdminRepository, LeagueMemberRepository, LeagueRepository, LeagueRuleRepository,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::authorization::{is_league_admin, require_league_admin, require_league_view};
use crate::services::scoring::rerank_league;

use super::{member_response, rule_response};

/// Create a new league.
///
/// POST /api/v1/leagues
///
/// The caller becomes the owner and the first member (rank 1). Private
/// leagues receive a generated invite code.
pub async fn create_league(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<CreateLeagueRequest>,
) -> Result<(StatusCode, Json<LeagueResponse>), ApiError> {
    request.validate()?;

    let leagues = LeagueRepository::new(state.pool.clone());
    let members = LeagueMemberRepository::new(state.pool.clone());

    let invite_code = request.is_private.then(generate_invite_code);

    let league = leagues
        .create(
            &request.name,
            request.description.as_deref(),
            user_auth.user_id,
            request.is_private,
            invite_code.as_deref(),
        )
        .await?;

    // The owner is the first member; seed their rank in the same transaction.
    let mut tx = state.pool.begin().await?;
    members.insert(&mut tx, league.id, user_auth.user_id).await?;
    rerank_league(&members, &mut tx, league.id).await?;
    tx.commit().await?;

    info!(
        league_id = %league.id,
        league_name = %league.name,
        user_id = %user_auth.user_id,
        "League created"
    );

    Ok((
        StatusCode::CREATED,
        Json(LeagueResponse {
            id: league.id,
            name: league.name,
            description: league.description,
            owner_id: league.owner_id,
            is_private: league.is_private,
            invite_code: league.invite_code,
            member_count: 1,
            created_at: league.created_at,
            updated_at: league.updated_at,
        }),
    ))
}

/// List leagues visible to the caller.
///
/// GET /api/v1/leagues
pub async fn list_leagues(
    State(state): State<AppState>,
    user_auth: UserAuth,
) -> Result<Json<ListLeaguesResponse>, ApiError> {
    let leagues = LeagueRepository::new(state.pool.clone());

    let rows = leagues.list_visible(user_auth.user_id).await?;
    let data: Vec<LeagueSummary> = rows
        .into_iter()
        .map(|l| LeagueSummary {
            id: l.id,
            name: l.name,
            description: l.description,
            owner_id: l.owner_id,
            is_private: l.is_private,
            member_count: l.member_count,
            created_at: l.created_at,
        })
        .collect();
    let count = data.len();

    Ok(Json(ListLeaguesResponse { data, count }))
}

/// Get league detail with nested members, admins and rules.
///
/// GET /api/v1/leagues/:league_id
///
/// Private leagues are visible only to members and admins.
pub async fn get_league(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(league_id): Path<Uuid>,
) -> Result<Json<LeagueDetail>, ApiError> {
    let leagues = LeagueRepository::new(state.pool.clone());
    let league = leagues
        .find_by_id(league_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("League not found".to_string()))?;

    require_league_view(&state.pool, &league, user_auth.user_id).await?;

    let members = LeagueMemberRepository::new(state.pool.clone());
    let admins = LeagueAdminRepository::new(state.pool.clone());
    let rules = LeagueRuleRepository::new(state.pool.clone());

    let member_rows = members.list_with_users(league_id).await?;
    let admin_users = admins.list_users(league_id).await?;
    let rule_rows = rules.list_by_league(league_id).await?;

    // The invite code is a secret for sharing; only admins see it.
    let caller_is_admin = is_league_admin(&state.pool, &league, user_auth.user_id).await?;

    let mut rule_responses = Vec::with_capacity(rule_rows.len());
    for rule in rule_rows {
        rule_responses.push(rule_response(
            rule.id,
            rule.title,
            rule.description,
            rule.points,
            &rule.category,
            rule.created_at,
            rule.updated_at,
        )?);
    }

    Ok(Json(LeagueDetail {
        id: league.id,
        name: league.name,
        description: league.description,
        owner_id: league.owner_id,
        is_private: league.is_private,
        invite_code: if caller_is_admin {
            league.invite_code
        } else {
            None
        },
        created_at: league.created_at,
        updated_at: league.updated_at,
        members: member_rows.into_iter().map(member_response).collect(),
        admins: admin_users
            .into_iter()
            .map(|u| UserPublic {
                id: u.id,
                display_name: u.display_name,
                avatar_url: u.avatar_url,
            })
            .collect(),
        rules: rule_responses,
    }))
}

/// Update a league.
///
/// PUT /api/v1/leagues/:league_id
///
/// Admin only. Toggling privacy on regenerates the invite code; toggling it
/// off clears it.
pub async fn update_league(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(league_id): Path<Uuid>,
    Json(request): Json<UpdateLeagueRequest>,
) -> Result<Json<LeagueResponse>, ApiError> {
    request.validate()?;

    let leagues = LeagueRepository::new(state.pool.clone());
    let league = leagues
        .find_by_id(league_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("League not found".to_string()))?;

    require_league_admin(&state.pool, &league, user_auth.user_id).await?;

    let mut updated = leagues
        .update(
            league_id,
            request.name.as_deref(),
            request.description.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("League not found".to_string()))?;

    if let Some(is_private) = request.is_private {
        if is_private != updated.is_private {
            let invite_code = is_private.then(generate_invite_code);
            updated = leagues
                .set_privacy(league_id, is_private, invite_code.as_deref())
                .await?
                .ok_or_else(|| ApiError::NotFound("League not found".to_string()))?;
        }
    }

    let members = LeagueMemberRepository::new(state.pool.clone());
    let member_count = members.count_by_league(league_id).await?;

    info!(
        league_id = %league_id,
        user_id = %user_auth.user_id,
        "League updated"
    );

    Ok(Json(LeagueResponse {
        id: updated.id,
        name: updated.name,
        description: updated.description,
        owner_id: updated.owner_id,
        is_private: updated.is_private,
        invite_code: updated.invite_code,
        member_count,
        created_at: updated.created_at,
        updated_at: updated.updated_at,
    }))
}
