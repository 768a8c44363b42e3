//! Event rule catalog routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{CreateRuleRequest, ListRulesResponse, RuleResponse, UpdateRuleRequest};
use persistence::repositories::{EventRepository, EventRuleRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::authorization::{require_event_admin, require_event_view};

use super::rule_response;

/// Create a rule in the event's catalog.
///
/// POST /api/v1/events/:event_id/rules
pub async fn create_rule(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(event_id): Path<Uuid>,
    Json(request): Json<CreateRuleRequest>,
) -> Result<(StatusCode, Json<RuleResponse>), ApiError> {
    request.validate()?;

    let events = EventRepository::new(state.pool.clone());
    let event = events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    require_event_admin(&state.pool, &event, user_auth.user_id).await?;

    let rules = EventRuleRepository::new(state.pool.clone());
    let rule = rules
        .create(
            event_id,
            &request.title,
            request.description.as_deref(),
            request.points,
            request.category.as_str(),
        )
        .await?;

    info!(
        event_id = %event_id,
        rule_id = %rule.id,
        user_id = %user_auth.user_id,
        category = %request.category,
        "Event rule created"
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
/// PUT /api/v1/events/:event_id/rules/:rule_id
pub async fn update_rule(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((event_id, rule_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<UpdateRuleRequest>,
) -> Result<Json<RuleResponse>, ApiError> {
    request.validate()?;

    let events = EventRepository::new(state.pool.clone());
    let event = events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    require_event_admin(&state.pool, &event, user_auth.user_id).await?;

    let rules = EventRuleRepository::new(state.pool.clone());
    let rule = rules
        .update(
            event_id,
            rule_id,
            request.title.as_deref(),
            request.description.as_deref(),
            request.points,
            request.category.map(|c| c.as_str()),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Rule not found in this event".to_string()))?;

    info!(
        event_id = %event_id,
        rule_id = %rule_id,
        user_id = %user_auth.user_id,
        "Event rule updated"
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

/// List the event's rule catalog.
///
/// GET /api/v1/events/:event_id/rules
pub async fn list_rules(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(event_id): Path<Uuid>,
) -> Result<Json<ListRulesResponse>, ApiError> {
    let events = EventRepository::new(state.pool.clone());
    let event = events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    require_event_view(&state.pool, &event, user_auth.user_id).await?;

    let rules = EventRuleRepository::new(state.pool.clone());
    let rows = rules.list_by_event(event_id).await?;

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
