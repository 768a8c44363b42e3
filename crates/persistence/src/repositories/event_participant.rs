//! Repository for event participant database operations.
//!
//! Mirrors the league member repository over the event_participants table,
//! plus capacity-aware insertion for events with a participant limit.

use domain::services::ranking::{RankAssignment, Standing};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::entities::{EventParticipantEntity, MemberRowEntity, StandingRowEntity};

/// Repository for event participant operations.
#[derive(Clone)]
pub struct EventParticipantRepository {
    pool: PgPool,
}

impl EventParticipantRepository {
    /// Creates a new event participant repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a participant row, enforcing the optional capacity limit in
    /// the same statement.
    ///
    /// Returns None when the event is full. The capacity check and the
    /// insert are one statement, so two racing joins cannot both squeeze
    /// past the limit. Duplicate participation still surfaces as a unique
    /// constraint violation.
    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        event_id: Uuid,
        user_id: Uuid,
        max_participants: Option<i32>,
    ) -> Result<Option<EventParticipantEntity>, sqlx::Error> {
        sqlx::query_as::<_, EventParticipantEntity>(
            r#"
            INSERT INTO event_participants (event_id, user_id)
            SELECT $1, $2
            WHERE $3::int IS NULL
               OR (SELECT COUNT(*) FROM event_participants WHERE event_id = $1) < $3
            RETURNING id, event_id, user_id, points, rank, joined_at
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .bind(max_participants)
        .fetch_optional(conn)
        .await
    }

    /// Deletes a participant row. Returns true if a row was removed.
    pub async fn delete(
        &self,
        conn: &mut PgConnection,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM event_participants
            WHERE event_id = $1 AND user_id = $2
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Finds a participation by event and user.
    pub async fn find_by_event_and_user(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<EventParticipantEntity>, sqlx::Error> {
        sqlx::query_as::<_, EventParticipantEntity>(
            r#"
            SELECT id, event_id, user_id, points, rank, joined_at
            FROM event_participants
            WHERE event_id = $1 AND user_id = $2
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Checks whether the user participates in the event.
    pub async fn exists(&self, event_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM event_participants
                WHERE event_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Counts participants of an event.
    pub async fn count_by_event(&self, event_id: Uuid) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM event_participants
            WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Lists participants joined with user info, in rank order.
    pub async fn list_with_users(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<MemberRowEntity>, sqlx::Error> {
        sqlx::query_as::<_, MemberRowEntity>(
            r#"
            SELECT p.user_id, u.display_name, u.avatar_url,
                   p.points, p.rank, p.joined_at
            FROM event_participants p
            JOIN users u ON u.id = p.user_id
            WHERE p.event_id = $1
            ORDER BY p.rank ASC, p.joined_at ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Applies a signed point delta to a participant's total.
    ///
    /// Returns the updated row, or None when the user does not participate.
    pub async fn add_points(
        &self,
        conn: &mut PgConnection,
        event_id: Uuid,
        user_id: Uuid,
        delta: i32,
    ) -> Result<Option<EventParticipantEntity>, sqlx::Error> {
        sqlx::query_as::<_, EventParticipantEntity>(
            r#"
            UPDATE event_participants
            SET points = points + $3
            WHERE event_id = $1 AND user_id = $2
            RETURNING id, event_id, user_id, points, rank, joined_at
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .bind(delta)
        .fetch_optional(conn)
        .await
    }

    /// Loads the event's standings with row locks held until the
    /// surrounding transaction commits.
    pub async fn standings_for_update(
        &self,
        conn: &mut PgConnection,
        event_id: Uuid,
    ) -> Result<Vec<Standing>, sqlx::Error> {
        let rows = sqlx::query_as::<_, StandingRowEntity>(
            r#"
            SELECT user_id, points, joined_at
            FROM event_participants
            WHERE event_id = $1
            FOR UPDATE
            "#,
        )
        .bind(event_id)
        .fetch_all(conn)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Persists a full set of computed ranks in one batched statement.
    pub async fn update_ranks(
        &self,
        conn: &mut PgConnection,
        event_id: Uuid,
        ranks: &[RankAssignment],
    ) -> Result<(), sqlx::Error> {
        if ranks.is_empty() {
            return Ok(());
        }

        let user_ids: Vec<Uuid> = ranks.iter().map(|r| r.user_id).collect();
        let rank_values: Vec<i32> = ranks.iter().map(|r| r.rank).collect();

        sqlx::query(
            r#"
            UPDATE event_participants AS p
            SET rank = r.rank
            FROM (SELECT UNNEST($2::uuid[]) AS user_id, UNNEST($3::int[]) AS rank) AS r
            WHERE p.event_id = $1 AND p.user_id = r.user_id
            "#,
        )
        .bind(event_id)
        .bind(user_ids)
        .bind(rank_values)
        .execute(conn)
        .await?;

        Ok(())
    }
}
