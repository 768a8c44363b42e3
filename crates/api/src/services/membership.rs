//! Membership units of work: join, add, leave and remove, each followed by
//! a rank recompute inside the same transaction.
//!
//! Duplicate memberships are prevented by the (entity, user) unique
//! constraints; the exists() pre-checks only exist to produce friendly
//! conflict messages. Event capacity is enforced by the conditional insert
//! itself, not by a separate count.

use sqlx::PgPool;
use uuid::Uuid;

use persistence::entities::{
    EventEntity, EventInvitationEntity, EventParticipantEntity, LeagueEntity, LeagueMemberEntity,
};
use persistence::repositories::{
    EventInvitationRepository, EventParticipantRepository, LeagueAdminRepository,
    LeagueMemberRepository, UserRepository,
};

use crate::error::ApiError;
use crate::middleware::metrics::{record_invitation_redeemed, record_membership_change};
use crate::services::scoring::{rerank_event, rerank_league};

/// Joins the caller to a league.
///
/// Private leagues require the exact invite code.
pub async fn join_league(
    pool: &PgPool,
    league: &LeagueEntity,
    user_id: Uuid,
    invite_code: Option<&str>,
) -> Result<LeagueMemberEntity, ApiError> {
    if league.is_private && !league.invite_code_matches(invite_code) {
        return Err(ApiError::Forbidden("Invalid invite code".to_string()));
    }

    let members = LeagueMemberRepository::new(pool.clone());
    if members.exists(league.id, user_id).await? {
        return Err(ApiError::Conflict(
            "User is already a member of this league".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;
    let mut member = members.insert(&mut tx, league.id, user_id).await?;
    let ranks = rerank_league(&members, &mut tx, league.id).await?;
    tx.commit().await?;

    if let Some(assigned) = ranks.iter().find(|r| r.user_id == user_id) {
        member.rank = assigned.rank;
    }

    record_membership_change("league", "join");
    Ok(member)
}

/// Adds a user to a league on an admin's behalf.
///
/// The invite code is not required; admin authorization was already checked
/// by the caller.
pub async fn add_league_member(
    pool: &PgPool,
    league: &LeagueEntity,
    user_id: Uuid,
) -> Result<LeagueMemberEntity, ApiError> {
    let users = UserRepository::new(pool.clone());
    if !users.exists(user_id).await? {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    let members = LeagueMemberRepository::new(pool.clone());
    if members.exists(league.id, user_id).await? {
        return Err(ApiError::Conflict(
            "User is already a member of this league".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;
    let mut member = members.insert(&mut tx, league.id, user_id).await?;
    let ranks = rerank_league(&members, &mut tx, league.id).await?;
    tx.commit().await?;

    if let Some(assigned) = ranks.iter().find(|r| r.user_id == user_id) {
        member.rank = assigned.rank;
    }

    record_membership_change("league", "add");
    Ok(member)
}

/// Removes a member from a league (admin action).
///
/// The owner can never be removed. A removed delegated admin also loses the
/// grant, so the authorization set never references non-members.
pub async fn remove_league_member(
    pool: &PgPool,
    league: &LeagueEntity,
    target_user_id: Uuid,
) -> Result<(), ApiError> {
    if target_user_id == league.owner_id {
        return Err(ApiError::Forbidden(
            "Cannot remove the league owner".to_string(),
        ));
    }

    let members = LeagueMemberRepository::new(pool.clone());
    let admins = LeagueAdminRepository::new(pool.clone());

    let mut tx = pool.begin().await?;
    let removed = members.delete(&mut tx, league.id, target_user_id).await?;
    if !removed {
        return Err(ApiError::NotFound(
            "User is not a member of this league".to_string(),
        ));
    }
    admins.delete_in(&mut tx, league.id, target_user_id).await?;
    rerank_league(&members, &mut tx, league.id).await?;
    tx.commit().await?;

    record_membership_change("league", "remove");
    Ok(())
}

/// Removes the caller from a league.
///
/// A league must always retain an admin presence: either the owner still a
/// member, or at least one delegated admin. Leaving in a way that would
/// strand the league without one is a conflict.
pub async fn leave_league(
    pool: &PgPool,
    league: &LeagueEntity,
    user_id: Uuid,
) -> Result<(), ApiError> {
    let members = LeagueMemberRepository::new(pool.clone());
    let admins = LeagueAdminRepository::new(pool.clone());

    let mut tx = pool.begin().await?;

    // Locks the member rows, so concurrent leaves serialize against the guard.
    let standings = members.standings_for_update(&mut tx, league.id).await?;
    if !standings.iter().any(|s| s.user_id == user_id) {
        return Err(ApiError::NotFound(
            "User is not a member of this league".to_string(),
        ));
    }

    let surrendered_grant = admins.delete_in(&mut tx, league.id, user_id).await?;
    let remaining_admins = admins.count_in(&mut tx, league.id).await?;
    let owner_remains = user_id != league.owner_id
        && standings.iter().any(|s| s.user_id == league.owner_id);

    let leaves_league_unmanaged = if user_id == league.owner_id {
        remaining_admins == 0
    } else {
        surrendered_grant && remaining_admins == 0 && !owner_remains
    };
    if leaves_league_unmanaged {
        return Err(ApiError::Conflict(
            "Cannot leave the league as its only admin".to_string(),
        ));
    }

    members.delete(&mut tx, league.id, user_id).await?;
    rerank_league(&members, &mut tx, league.id).await?;
    tx.commit().await?;

    record_membership_change("league", "leave");
    Ok(())
}

/// Joins the caller to an event.
///
/// Private events require the exact invite code; full events conflict.
pub async fn join_event(
    pool: &PgPool,
    event: &EventEntity,
    user_id: Uuid,
    invite_code: Option<&str>,
) -> Result<EventParticipantEntity, ApiError> {
    if event.is_private && !event.invite_code_matches(invite_code) {
        return Err(ApiError::Forbidden("Invalid invite code".to_string()));
    }

    let participants = EventParticipantRepository::new(pool.clone());
    if participants.exists(event.id, user_id).await? {
        return Err(ApiError::Conflict(
            "User is already a participant of this event".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;
    let mut participant = participants
        .insert(&mut tx, event.id, user_id, event.max_participants)
        .await?
        .ok_or_else(|| {
            ApiError::Conflict("Event has reached its maximum number of participants".to_string())
        })?;
    let ranks = rerank_event(&participants, &mut tx, event.id).await?;
    tx.commit().await?;

    if let Some(assigned) = ranks.iter().find(|r| r.user_id == user_id) {
        participant.rank = assigned.rank;
    }

    record_membership_change("event", "join");
    Ok(participant)
}

/// Adds a user to an event on an admin's behalf.
pub async fn add_event_participant(
    pool: &PgPool,
    event: &EventEntity,
    user_id: Uuid,
) -> Result<EventParticipantEntity, ApiError> {
    let users = UserRepository::new(pool.clone());
    if !users.exists(user_id).await? {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    let participants = EventParticipantRepository::new(pool.clone());
    if participants.exists(event.id, user_id).await? {
        return Err(ApiError::Conflict(
            "User is already a participant of this event".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;
    let mut participant = participants
        .insert(&mut tx, event.id, user_id, event.max_participants)
        .await?
        .ok_or_else(|| {
            ApiError::Conflict("Event has reached its maximum number of participants".to_string())
        })?;
    let ranks = rerank_event(&participants, &mut tx, event.id).await?;
    tx.commit().await?;

    if let Some(assigned) = ranks.iter().find(|r| r.user_id == user_id) {
        participant.rank = assigned.rank;
    }

    record_membership_change("event", "add");
    Ok(participant)
}

/// Removes a participant from an event (admin action). The owner cannot be
/// removed.
pub async fn remove_event_participant(
    pool: &PgPool,
    event: &EventEntity,
    target_user_id: Uuid,
) -> Result<(), ApiError> {
    if target_user_id == event.owner_id {
        return Err(ApiError::Forbidden(
            "Cannot remove the event owner".to_string(),
        ));
    }

    let participants = EventParticipantRepository::new(pool.clone());

    let mut tx = pool.begin().await?;
    let removed = participants.delete(&mut tx, event.id, target_user_id).await?;
    if !removed {
        return Err(ApiError::NotFound(
            "User is not a participant of this event".to_string(),
        ));
    }
    rerank_event(&participants, &mut tx, event.id).await?;
    tx.commit().await?;

    record_membership_change("event", "remove");
    Ok(())
}

/// Redeems a targeted invitation: joins the event, then flips the
/// invitation to accepted, in one transaction.
///
/// The caller has already verified the invitation targets this event, is
/// pending and is not expired. The guarded accept makes the status
/// transition happen at most once even under concurrent redemption; the
/// join itself still honors capacity and duplicate-participation rules.
pub async fn redeem_event_invitation(
    pool: &PgPool,
    event: &EventEntity,
    invitation: &EventInvitationEntity,
    user_id: Uuid,
) -> Result<EventParticipantEntity, ApiError> {
    let participants = EventParticipantRepository::new(pool.clone());
    if participants.exists(event.id, user_id).await? {
        return Err(ApiError::Conflict(
            "User is already a participant of this event".to_string(),
        ));
    }

    let invitations = EventInvitationRepository::new(pool.clone());

    let mut tx = pool.begin().await?;
    let mut participant = participants
        .insert(&mut tx, event.id, user_id, event.max_participants)
        .await?
        .ok_or_else(|| {
            ApiError::Conflict("Event has reached its maximum number of participants".to_string())
        })?;
    let ranks = rerank_event(&participants, &mut tx, event.id).await?;

    let accepted = invitations.accept(&mut tx, invitation.id, user_id).await?;
    if !accepted {
        return Err(ApiError::Conflict(
            "Invitation has already been used".to_string(),
        ));
    }
    tx.commit().await?;

    if let Some(assigned) = ranks.iter().find(|r| r.user_id == user_id) {
        participant.rank = assigned.rank;
    }

    record_invitation_redeemed();
    record_membership_change("event", "join");
    Ok(participant)
}

/// Removes the caller from an event.
///
/// Event ownership does not depend on participation, so the owner may leave
/// without further guards.
pub async fn leave_event(
    pool: &PgPool,
    event: &EventEntity,
    user_id: Uuid,
) -> Result<(), ApiError> {
    let participants = EventParticipantRepository::new(pool.clone());

    let mut tx = pool.begin().await?;
    let removed = participants.delete(&mut tx, event.id, user_id).await?;
    if !removed {
        return Err(ApiError::NotFound(
            "User is not a participant of this event".to_string(),
        ));
    }
    rerank_event(&participants, &mut tx, event.id).await?;
    tx.commit().await?;

    record_membership_change("event", "leave");
    Ok(())
}
