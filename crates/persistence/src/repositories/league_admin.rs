//! Repository for delegated league admin database operations.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::entities::{LeagueAdminEntity, UserEntity};

/// Repository for delegated admin operations.
#[derive(Clone)]
pub struct LeagueAdminRepository {
    pool: PgPool,
}

impl LeagueAdminRepository {
    /// Creates a new league admin repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Grants delegated admin rights.
    ///
    /// A duplicate grant violates the (league_id, user_id) unique constraint
    /// and surfaces as a conflict to the caller.
    pub async fn insert(
        &self,
        league_id: Uuid,
        user_id: Uuid,
        granted_by: Uuid,
    ) -> Result<LeagueAdminEntity, sqlx::Error> {
        sqlx::query_as::<_, LeagueAdminEntity>(
            r#"
            INSERT INTO league_admins (league_id, user_id, granted_by)
            VALUES ($1, $2, $3)
            RETURNING id, league_id, user_id, granted_by, granted_at
            "#,
        )
        .bind(league_id)
        .bind(user_id)
        .bind(granted_by)
        .fetch_one(&self.pool)
        .await
    }

    /// Revokes delegated admin rights. Returns true if a grant was removed.
    pub async fn delete(&self, league_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM league_admins
            WHERE league_id = $1 AND user_id = $2
            "#,
        )
        .bind(league_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Transaction-scoped variant of [`delete`](Self::delete), used when a
    /// leaving member surrenders their grant in the same unit of work.
    pub async fn delete_in(
        &self,
        conn: &mut PgConnection,
        league_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM league_admins
            WHERE league_id = $1 AND user_id = $2
            "#,
        )
        .bind(league_id)
        .bind(user_id)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Checks whether the user holds a delegated grant for the league.
    pub async fn exists(&self, league_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM league_admins
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

    /// Counts delegated admins inside a caller-owned transaction, used for
    /// the leaving-as-sole-admin guard.
    pub async fn count_in(
        &self,
        conn: &mut PgConnection,
        league_id: Uuid,
    ) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM league_admins
            WHERE league_id = $1
            "#,
        )
        .bind(league_id)
        .fetch_one(conn)
        .await?;

        Ok(result.0)
    }

    /// Lists the delegated admins' user records.
    pub async fn list_users(&self, league_id: Uuid) -> Result<Vec<UserEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT u.id, u.display_name, u.avatar_url, u.created_at
            FROM league_admins a
            JOIN users u ON u.id = a.user_id
            WHERE a.league_id = $1
            ORDER BY a.granted_at ASC
            "#,
        )
        .bind(league_id)
        .fetch_all(&self.pool)
        .await
    }
}
