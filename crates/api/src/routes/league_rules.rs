//! League rule catalog routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{CreateRuleRequest, ListRulesResponse, RuleResponse, UpdateRuleRequest};
use persistence::repositories::{LeagueRepository, LeagueRuleRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::authorization::{require_league_admin, require_league_view};

use super::rule_response;

/// Create a rule in the league's catalog.
///
/// POST /api/v1/leagues/:league_id/rules
pub async fn create_rule(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(league_id): Path<Uuid>,
    Json(request): Json<CreateRuleRequest>,
) -> Result<(StatusCode, Json<RuleResponse>), ApiError> {
    request.validate()?;

    let leagues = LeagueRepository::new(state.pool.clone());
    let league = leagues
        .find_by_id(league_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("League not found".to_string()))?;

    require_league_admin(&state.pool, &league, user_auth.user_id).await?;

    let rules = LeagueRuleRepository::new(state.pool.clone());
    let rule = rules
        .create(
            league_id,
            &request.title,
            request.description.as_deref(),
            request.points,
            request.category.as_str(),
        )
        .await?;

    info!(
        league_id = %league_id,
        rule_id = %rule.id,
        user_id = %user_auth.user_id,
        category = %request.category,
        "League rule created"
    );

    Ok((
        StatusCode::CREATED,
        Json(rule_response(
            rule.id,
            rule.title,
            rule.description,
            rule.points,
            &rule.category,
            rule.created_at,
            rule.updated_at,
        )?),
    ))
}

/// Partially update a rule; only supplied fields change.
///
/// PUT /api/v1/leagues/:league_id/rules/:rule_id
pub async fn update_rule(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((league_id, rule_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<UpdateRuleRequest>,
) -> Result<Json<RuleResponse>, ApiError> {
    request.validate()?;

    let leagues = LeagueRepository::new(state.pool.clone());
    let league = leagues
        .find_by_id(league_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("League not found".to_string()))?;

    require_league_admin(&state.pool, &league, user_auth.user_id).await?;

    let rules = LeagueRuleRepository::new(state.pool.clone());
    let rule = rules
        .update(
            league_id,
            rule_id,
            request.title.as_deref(),
            request.description.as_deref(),
            request.points,
            request.category.map(|c| c.as_str()),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Rule not found in this league".to_string()))?;

    info!(
        league_id = %league_id,
        rule_id = %rule_id,
        user_id = %user_auth.user_id,
        "League rule updated"
    );

    Ok(Json(rule_response(
        rule.id,
        rule.title,
        rule.description,
        rule.points,
        &rule.category,
        rule.created_at,
        rule.updated_at,
    )?))
}

/// List the league's rule catalog.
///
/// GET /api/v1/leagues/:league_id/rules
pub async fn list_rules(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(league_id): Path<Uuid>,
) -> Result<Json<ListRulesResponse>, ApiError> {
    let leagues = LeagueRepository::new(state.pool.clone());
    let league = leagues
        .find_by_id(league_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("League not found".to_string()))?;

    require_league_view(&state.pool, &league, user_auth.user_id).await?;

    let rules = LeagueRuleRepository::new(state.pool.clone());
    let rows = rules.list_by_league(league_id).await?;

    let mut data = Vec::with_capacity(rows.len());
    for rule in rows {
        data.push(rule_response(
            rule.id,
            rule.title,
            rule.description,
            rule.points,
            &rule.category,
            rule.created_at,
            rule.updated_at,
        )?);
    }
    let count = data.len();

    Ok(Json(ListRulesResponse { data, count }))
}
