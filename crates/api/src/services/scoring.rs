//! Points ledger and ranking orchestration.
//!
//! Point deltas are additive and not idempotent. Every mutation runs inside
//! one transaction: apply the delta, recompute the entity's ranks, and (for
//! events linked to a league) mirror the delta onto the league membership
//! and recompute the league too. The standings are read `FOR UPDATE`, so
//! concurrent mutations on the same entity serialize instead of interleaving
//! their rank writes.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use domain::models::points::PointsAssignment;
use domain::models::rule::RuleCategory;
use domain::services::ranking::{compute_rankings, RankAssignment};
use persistence::entities::{EventEntity, LeagueEntity};
use persistence::repositories::{EventParticipantRepository, LeagueMemberRepository};

use crate::error::ApiError;
use crate::middleware::metrics::record_points_assignment;

/// Recomputes and persists a league's ranks inside the caller's transaction.
///
/// Returns the computed assignments so callers can surface fresh ranks
/// without re-reading.
pub async fn rerank_league(
    members: &LeagueMemberRepository,
    conn: &mut PgConnection,
    league_id: Uuid,
) -> Result<Vec<RankAssignment>, ApiError> {
    let standings = members.standings_for_update(conn, league_id).await?;
    let ranks = compute_rankings(standings);
    members.update_ranks(conn, league_id, &ranks).await?;
    Ok(ranks)
}

/// Recomputes and persists an event's ranks inside the caller's transaction.
pub async fn rerank_event(
    participants: &EventParticipantRepository,
    conn: &mut PgConnection,
    event_id: Uuid,
) -> Result<Vec<RankAssignment>, ApiError> {
    let standings = participants.standings_for_update(conn, event_id).await?;
    let ranks = compute_rankings(standings);
    participants.update_ranks(conn, event_id, &ranks).await?;
    Ok(ranks)
}

fn rank_of(ranks: &[RankAssignment], user_id: Uuid) -> Option<i32> {
    ranks.iter().find(|r| r.user_id == user_id).map(|r| r.rank)
}

/// Assigns a point delta to a league member and re-ranks the league.
pub async fn assign_league_points(
    pool: &PgPool,
    league: &LeagueEntity,
    target_user_id: Uuid,
    delta: i32,
    category: RuleCategory,
    reason: Option<String>,
) -> Result<PointsAssignment, ApiError> {
    let members = LeagueMemberRepository::new(pool.clone());

    let mut tx = pool.begin().await?;

    let updated = members
        .add_points(&mut tx, league.id, target_user_id, delta)
        .await?
        .ok_or_else(|| ApiError::NotFound("User is not a member of this league".to_string()))?;

    let ranks = rerank_league(&members, &mut tx, league.id).await?;

    tx.commit().await?;

    record_points_assignment("league");

    Ok(PointsAssignment {
        user_id: target_user_id,
        total_points: updated.points,
        rank: rank_of(&ranks, target_user_id).unwrap_or(updated.rank),
        delta,
        category,
        reason,
    })
}

/// Assigns a point delta to an event participant, re-ranks the event, and
/// mirrors the delta onto the linked league membership when there is one.
///
/// The propagation is one-directional and silently skipped when the user is
/// not a member of the linked league.
pub async fn assign_event_points(
    pool: &PgPool,
    event: &EventEntity,
    target_user_id: Uuid,
    delta: i32,
    category: RuleCategory,
    reason: Option<String>,
) -> Result<PointsAssignment, ApiError> {
    if !event.scoring_enabled {
        return Err(ApiError::Conflict(
            "Scoring is not enabled for this event".to_string(),
        ));
    }

    let participants = EventParticipantRepository::new(pool.clone());
    let members = LeagueMemberRepository::new(pool.clone());

    let mut tx = pool.begin().await?;

    let updated = participants
        .add_points(&mut tx, event.id, target_user_id, delta)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound("User is not a participant of this event".to_string())
        })?;

    let ranks = rerank_event(&participants, &mut tx, event.id).await?;

    if let Some(league_id) = event.league_id {
        let mirrored = members
            .add_points(&mut tx, league_id, target_user_id, delta)
            .await?;
        if mirrored.is_some() {
            rerank_league(&members, &mut tx, league_id).await?;
        }
    }

    tx.commit().await?;

    record_points_assignment("event");

    Ok(PointsAssignment {
        user_id: target_user_id,
        total_points: updated.points,
        rank: rank_of(&ranks, target_user_id).unwrap_or(updated.rank),
        delta,
        category,
        reason,
    })
}
