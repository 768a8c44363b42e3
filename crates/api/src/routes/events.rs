//! Event management routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::{
    CreateEventRequest, EventDetail, EventResponse, EventSummary, ListEventsQuery,
    ListEventsResponse, UpdateEventRequest,
};
use domain::services::invite_code::generate_invite_code;
use persistence::repositories::{
    EventParticipantRepository, EventRepository, EventRuleRepository, LeagueMemberRepository,
    LeagueRepository,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::authorization::{
    is_event_admin, is_league_admin, require_event_admin, require_event_view,
};
use crate::services::scoring::rerank_event;

use super::{member_response, rule_response};

/// Create a new event.
///
/// POST /api/v1/events
///
/// The caller becomes the owner and the first participant. Creating an
/// event inside a league requires being a member or admin of that league.
pub async fn create_event(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), ApiError> {
    request.validate()?;

    if let Some(league_id) = request.league_id {
        let leagues = LeagueRepository::new(state.pool.clone());
        let league = leagues
            .find_by_id(league_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("League not found".to_string()))?;

        let members = LeagueMemberRepository::new(state.pool.clone());
        let is_member = members.exists(league_id, user_auth.user_id).await?;
        if !is_member && !is_league_admin(&state.pool, &league, user_auth.user_id).await? {
            return Err(ApiError::Forbidden(
                "Must be a member of the league to create events in it".to_string(),
            ));
        }
    }

    let events = EventRepository::new(state.pool.clone());
    let participants = EventParticipantRepository::new(state.pool.clone());

    let invite_code = request.is_private.then(generate_invite_code);

    let event = events
        .create(
            &request.title,
            request.description.as_deref(),
            request.league_id,
            user_auth.user_id,
            request.starts_at,
            request.ends_at,
            request.is_private,
            request.max_participants,
            invite_code.as_deref(),
            request.scoring_enabled,
        )
        .await?;

    // The owner is the first participant; seed their rank in one transaction.
    let mut tx = state.pool.begin().await?;
    participants
        .insert(&mut tx, event.id, user_auth.user_id, event.max_participants)
        .await?;
    rerank_event(&participants, &mut tx, event.id).await?;
    tx.commit().await?;

    info!(
        event_id = %event.id,
        event_title = %event.title,
        league_id = ?event.league_id,
        user_id = %user_auth.user_id,
        "Event created"
    );

    Ok((
        StatusCode::CREATED,
        Json(EventResponse {
            id: event.id,
            title: event.title,
            description: event.description,
            league_id: event.league_id,
            owner_id: event.owner_id,
            starts_at: event.starts_at,
            ends_at: event.ends_at,
            is_private: event.is_private,
            max_participants: event.max_participants,
            invite_code: event.invite_code,
            scoring_enabled: event.scoring_enabled,
            participant_count: 1,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }),
    ))
}

/// List events visible to the caller, optionally filtered by league.
///
/// GET /api/v1/events?league_id=...
pub async fn list_events(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<ListEventsResponse>, ApiError> {
    let events = EventRepository::new(state.pool.clone());

    let rows = events
        .list_visible(user_auth.user_id, query.league_id)
        .await?;
    let data: Vec<EventSummary> = rows
        .into_iter()
        .map(|e| EventSummary {
            id: e.id,
            title: e.title,
            description: e.description,
            league_id: e.league_id,
            owner_id: e.owner_id,
            starts_at: e.starts_at,
            ends_at: e.ends_at,
            is_private: e.is_private,
            participant_count: e.participant_count,
            created_at: e.created_at,
        })
        .collect();
    let count = data.len();

    Ok(Json(ListEventsResponse { data, count }))
}

/// Get event detail with nested participants and rules.
///
/// GET /api/v1/events/:event_id
pub async fn get_event(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(event_id): Path<Uuid>,
) -> Result<Json<EventDetail>, ApiError> {
    let events = EventRepository::new(state.pool.clone());
    let event = events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    require_event_view(&state.pool, &event, user_auth.user_id).await?;

    let participants = EventParticipantRepository::new(state.pool.clone());
    let rules = EventRuleRepository::new(state.pool.clone());

    let participant_rows = participants.list_with_users(event_id).await?;
    let rule_rows = rules.list_by_event(event_id).await?;

    let caller_is_admin = is_event_admin(&state.pool, &event, user_auth.user_id).await?;

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

    Ok(Json(EventDetail {
        id: event.id,
        title: event.title,
        description: event.description,
        league_id: event.league_id,
        owner_id: event.owner_id,
        starts_at: event.starts_at,
        ends_at: event.ends_at,
        is_private: event.is_private,
        max_participants: event.max_participants,
        invite_code: if caller_is_admin {
            event.invite_code
        } else {
            None
        },
        scoring_enabled: event.scoring_enabled,
        created_at: event.created_at,
        updated_at: event.updated_at,
        participants: participant_rows.into_iter().map(member_response).collect(),
        rules: rule_responses,
    }))
}

/// Update an event.
///
/// PUT /api/v1/events/:event_id
///
/// Admin only. Toggling privacy manages the invite code like leagues.
pub async fn update_event(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(event_id): Path<Uuid>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<Json<EventResponse>, ApiError> {
    request.validate()?;

    let events = EventRepository::new(state.pool.clone());
    let event = events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    require_event_admin(&state.pool, &event, user_auth.user_id).await?;

    let mut updated = events
        .update(
            event_id,
            request.title.as_deref(),
            request.description.as_deref(),
            request.starts_at,
            request.ends_at,
            request.max_participants,
            request.scoring_enabled,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    if let Some(is_private) = request.is_private {
        if is_private != updated.is_private {
            let invite_code = is_private.then(generate_invite_code);
            updated = events
                .set_privacy(event_id, is_private, invite_code.as_deref())
                .await?
                .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;
        }
    }

    let participants = EventParticipantRepository::new(state.pool.clone());
    let participant_count = participants.count_by_event(event_id).await?;

    info!(
        event_id = %event_id,
        user_id = %user_auth.user_id,
        "Event updated"
    );

    Ok(Json(EventResponse {
        id: updated.id,
        title: updated.title,
        description: updated.description,
        league_id: updated.league_id,
        owner_id: updated.owner_id,
        starts_at: updated.starts_at,
        ends_at: updated.ends_at,
        is_private: updated.is_private,
        max_participants: updated.max_participants,
        invite_code: updated.invite_code,
        scoring_enabled: updated.scoring_enabled,
        participant_count,
        created_at: updated.created_at,
        updated_at: updated.updated_at,
    }))
}
