//! Admin authorization resolution.
//!
//! A league is administered by its owner plus any delegated admins; the
//! owner is never stored as a delegated admin and their rights cannot be
//! revoked. An event is administered by its owner, or by an admin of the
//! league it is linked to.

use sqlx::PgPool;
use uuid::Uuid;

use persistence::entities::{EventEntity, LeagueEntity};
use persistence::repositories::{
    EventParticipantRepository, LeagueAdminRepository, LeagueMemberRepository, LeagueRepository,
};

use crate::error::ApiError;

/// Resolves whether the user may perform privileged operations on the league.
pub async fn is_league_admin(
    pool: &PgPool,
    league: &LeagueEntity,
    user_id: Uuid,
) -> Result<bool, ApiError> {
    if league.is_owned_by(user_id) {
        return Ok(true);
    }
    let admins = LeagueAdminRepository::new(pool.clone());
    Ok(admins.exists(league.id, user_id).await?)
}

/// Fails with Forbidden unless the user administers the league.
pub async fn require_league_admin(
    pool: &PgPool,
    league: &LeagueEntity,
    user_id: Uuid,
) -> Result<(), ApiError> {
    if is_league_admin(pool, league, user_id).await? {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "Only league admins can perform this action".to_string(),
        ))
    }
}

/// Resolves whether the user may perform privileged operations on the event.
pub async fn is_event_admin(
    pool: &PgPool,
    event: &EventEntity,
    user_id: Uuid,
) -> Result<bool, ApiError> {
    if event.is_owned_by(user_id) {
        return Ok(true);
    }
    // Admins of the linked league supervise its events.
    if let Some(league_id) = event.league_id {
        let leagues = LeagueRepository::new(pool.clone());
        if let Some(league) = leagues.find_by_id(league_id).await? {
            return is_league_admin(pool, &league, user_id).await;
        }
    }
    Ok(false)
}

/// Fails with Forbidden unless the user administers the event.
pub async fn require_event_admin(
    pool: &PgPool,
    event: &EventEntity,
    user_id: Uuid,
) -> Result<(), ApiError> {
    if is_event_admin(pool, event, user_id).await? {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "Only event admins can perform this action".to_string(),
        ))
    }
}

/// Resolves whether the user may read the league's member-scoped data
/// (member list, rules, leaderboard): anyone for public leagues, members
/// and admins otherwise.
pub async fn can_view_league(
    pool: &PgPool,
    league: &LeagueEntity,
    user_id: Uuid,
) -> Result<bool, ApiError> {
    if !league.is_private {
        return Ok(true);
    }
    let members = LeagueMemberRepository::new(pool.clone());
    if members.exists(league.id, user_id).await? {
        return Ok(true);
    }
    is_league_admin(pool, league, user_id).await
}

/// Fails with Forbidden unless the user may view the league.
pub async fn require_league_view(
    pool: &PgPool,
    league: &LeagueEntity,
    user_id: Uuid,
) -> Result<(), ApiError> {
    if can_view_league(pool, league, user_id).await? {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "This league is private".to_string(),
        ))
    }
}

/// Resolves whether the user may read the event's participant-scoped data.
pub async fn can_view_event(
    pool: &PgPool,
    event: &EventEntity,
    user_id: Uuid,
) -> Result<bool, ApiError> {
    if !event.is_private {
        return Ok(true);
    }
    let participants = EventParticipantRepository::new(pool.clone());
    if participants.exists(event.id, user_id).await? {
        return Ok(true);
    }
    is_event_admin(pool, event, user_id).await
}

/// Fails with Forbidden unless the user may view the event.
pub async fn require_event_view(
    pool: &PgPool,
    event: &EventEntity,
    user_id: Uuid,
) -> Result<(), ApiError> {
    if can_view_event(pool, event, user_id).await? {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "This event is private".to_string(),
        ))
    }
}
