//! Repository for league membership database operations.
//!
//! Membership mutations always run inside a caller-owned transaction so the
//! rank recompute that follows them lands atomically; those methods take a
//! `&mut PgConnection`.

use domain::services::ranking::{RankAssignment, Standing};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::entities::{LeagueMemberEntity, MemberRowEntity, StandingRowEntity};

/// Repository for league member operations.
#[derive(Clone)]
pub struct LeagueMemberRepository {
    pool: PgPool,
}

impl LeagueMemberRepository {
    /// Creates a new league member repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a membership row.
    ///
    /// The (league_id, user_id) unique constraint is the source of truth for
    /// duplicate memberships; a violation surfaces as a database error the
    /// caller maps to a conflict.
    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        league_id: Uuid,
        user_id: Uuid,
    ) -> Result<LeagueMemberEntity, sqlx::Error> {
        sqlx::query_as::<_, LeagueMemberEntity>(
            r#"
            INSERT INTO league_members (league_id, user_id)
            VALUES ($1, $2)
            RETURNING id, league_id, user_id, points, rank, joined_at
            "#,
        )
        .bind(league_id)
        .bind(user_id)
        .fetch_one(conn)
        .await
    }

    /// Deletes a membership row. Returns true if a row was removed.
    pub async fn delete(
        &self,
        conn: &mut PgConnection,
        league_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM league_members
            WHERE league_id = $1 AND user_id = $2
            "#,
        )
        .bind(league_id)
        .bind(user_id)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Finds a membership by league and user.
    pub async fn find_by_league_and_user(
        &self,
        league_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<LeagueMemberEntity>, sqlx::Error> {
        sqlx::query_as::<_, LeagueMemberEntity>(
            r#"
            SELECT id, league_id, user_id, points, rank, joined_at
            FROM league_members
            WHERE league_id = $1 AND user_id = $2
            "#,
        )
        .bind(league_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Checks whether the user is a member of the league.
    pub async fn exists(&self, league_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM league_members
                WHERE league_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(league_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Counts members of a league.
    pub async fn count_by_league(&self, league_id: Uuid) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM league_members
            WHERE league_id = $1
            "#,
        )
        .bind(league_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Lists members joined with user info, in rank order.
    pub async fn list_with_users(
        &self,
        league_id: Uuid,
    ) -> Result<Vec<MemberRowEntity>, sqlx::Error> {
        sqlx::query_as::<_, MemberRowEntity>(
            r#"
            SELECT m.user_id, u.display_name, u.avatar_url,
                   m.points, m.rank, m.joined_at
            FROM league_members m
            JOIN users u ON u.id = m.user_id
            WHERE m.league_id = $1
            ORDER BY m.rank ASC, m.joined_at ASC
            "#,
        )
        .bind(league_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Applies a signed point delta to a member's total.
    ///
    /// Returns the updated row, or None when the user is not a member.
    pub async fn add_points(
        &self,
        conn: &mut PgConnection,
        league_id: Uuid,
        user_id: Uuid,
        delta: i32,
    ) -> Result<Option<LeagueMemberEntity>, sqlx::Error> {
        sqlx::query_as::<_, LeagueMemberEntity>(
            r#"
            UPDATE league_members
            SET points = points + $3
            WHERE league_id = $1 AND user_id = $2
            RETURNING id, league_id, user_id, points, rank, joined_at
            "#,
        )
        .bind(league_id)
        .bind(user_id)
        .bind(delta)
        .fetch_optional(conn)
        .await
    }

    /// Loads the league's standings with row locks held until the
    /// surrounding transaction commits, serializing concurrent re-ranks.
    pub async fn standings_for_update(
        &self,
        conn: &mut PgConnection,
        league_id: Uuid,
    ) -> Result<Vec<Standing>, sqlx::Error> {
        let rows = sqlx::query_as::<_, StandingRowEntity>(
            r#"
            SELECT user_id, points, joined_at
            FROM league_members
            WHERE league_id = $1
            FOR UPDATE
            "#,
        )
        .bind(league_id)
        .fetch_all(conn)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Persists a full set of computed ranks in one batched statement.
    pub async fn update_ranks(
        &self,
        conn: &mut PgConnection,
        league_id: Uuid,
        ranks: &[RankAssignment],
    ) -> Result<(), sqlx::Error> {
        if ranks.is_empty() {
            return Ok(());
        }

        let user_ids: Vec<Uuid> = ranks.iter().map(|r| r.user_id).collect();
        let rank_values: Vec<i32> = ranks.iter().map(|r| r.rank).collect();

        sqlx::query(
            r#"
            UPDATE league_members AS m
            SET rank = r.rank
            FROM (SELECT UNNEST($2::uuid[]) AS user_id, UNNEST($3::int[]) AS rank) AS r
            WHERE m.league_id = $1 AND m.user_id = r.user_id
            "#,
        )
        .bind(league_id)
        .bind(user_ids)
        .bind(rank_values)
        .execute(conn)
        .await?;

        Ok(())
    }
}
