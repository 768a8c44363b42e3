//! Repository for league database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{LeagueEntity, LeagueWithCountEntity};

/// Repository for league operations.
#[derive(Clone)]
pub struct LeagueRepository {
    pool: PgPool,
}

impl LeagueRepository {
    /// Creates a new league repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a new league.
    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        owner_id: Uuid,
        is_private: bool,
        invite_code: Option<&str>,
    ) -> Result<LeagueEntity, sqlx::Error> {
        sqlx::query_as::<_, LeagueEntity>(
            r#"
            INSERT INTO leagues (name, description, owner_id, is_private, invite_code)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, owner_id, is_private, invite_code,
                      created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(owner_id)
        .bind(is_private)
        .bind(invite_code)
        .fetch_one(&self.pool)
        .await
    }

    /// Finds a league by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<LeagueEntity>, sqlx::Error> {
        sqlx::query_as::<_, LeagueEntity>(
            r#"
            SELECT id, name, description, owner_id, is_private, invite_code,
                   created_at, updated_at
            FROM leagues
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Lists leagues visible to the given user: public leagues plus leagues
    /// the user owns, belongs to or administers.
    pub async fn list_visible(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<LeagueWithCountEntity>, sqlx::Error> {
        sqlx::query_as::<_, LeagueWithCountEntity>(
            r#"
            SELECT l.id, l.name, l.description, l.owner_id, l.is_private, l.invite_code,
                   l.created_at, l.updated_at,
                   (SELECT COUNT(*) FROM league_members m WHERE m.league_id = l.id) AS member_count
            FROM leagues l
            WHERE l.is_private = FALSE
               OR l.owner_id = $1
               OR EXISTS (SELECT 1 FROM league_members m
                          WHERE m.league_id = l.id AND m.user_id = $1)
               OR EXISTS (SELECT 1 FROM league_admins a
                          WHERE a.league_id = l.id AND a.user_id = $1)
            ORDER BY l.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Partially updates a league's profile fields.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Option<LeagueEntity>, sqlx::Error> {
        sqlx::query_as::<_, LeagueEntity>(
            r#"
            UPDATE leagues
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, owner_id, is_private, invite_code,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await
    }

    /// Sets the privacy flag together with the invite code it implies
    /// (a fresh code when turning private, NULL when turning public).
    pub async fn set_privacy(
        &self,
        id: Uuid,
        is_private: bool,
        invite_code: Option<&str>,
    ) -> Result<Option<LeagueEntity>, sqlx::Error> {
        sqlx::query_as::<_, LeagueEntity>(
            r#"
            UPDATE leagues
            SET is_private = $2,
                invite_code = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, owner_id, is_private, invite_code,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(is_private)
        .bind(invite_code)
        .fetch_optional(&self.pool)
        .await
    }
}
