//! Repository for league rule database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::LeagueRuleEntity;

/// Repository for league rule operations.
#[derive(Clone)]
pub struct LeagueRuleRepository {
    pool: PgPool,
}

impl LeagueRuleRepository {
    /// Creates a new league rule repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a new rule in the league's catalog.
    pub async fn create(
        &self,
        league_id: Uuid,
        title: &str,
        description: Option<&str>,
        points: i32,
        category: &str,
    ) -> Result<LeagueRuleEntity, sqlx::Error> {
        sqlx::query_as::<_, LeagueRuleEntity>(
            r#"
            INSERT INTO league_rules (league_id, title, description, points, category)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, league_id, title, description, points, category,
                      created_at, updated_at
            "#,
        )
        .bind(league_id)
        .bind(title)
        .bind(description)
        .bind(points)
        .bind(category)
        .fetch_one(&self.pool)
        .await
    }

    /// Partially updates a rule; only supplied fields change.
    ///
    /// Returns None when the rule does not belong to the stated league.
    pub async fn update(
        &self,
        league_id: Uuid,
        rule_id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        points: Option<i32>,
        category: Option<&str>,
    ) -> Result<Option<LeagueRuleEntity>, sqlx::Error> {
        sqlx::query_as::<_, LeagueRuleEntity>(
            r#"
            UPDATE league_rules
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                points = COALESCE($5, points),
                category = COALESCE($6, category),
                updated_at = NOW()
            WHERE id = $2 AND league_id = $1
            RETURNING id, league_id, title, description, points, category,
                      created_at, updated_at
            "#,
        )
        .bind(league_id)
        .bind(rule_id)
        .bind(title)
        .bind(description)
        .bind(points)
        .bind(category)
        .fetch_optional(&self.pool)
        .await
    }

    /// Lists the league's rule catalog.
    pub async fn list_by_league(
        &self,
        league_id: Uuid,
    ) -> Result<Vec<LeagueRuleEntity>, sqlx::Error> {
        sqlx::query_as::<_, LeagueRuleEntity>(
            r#"
            SELECT id, league_id, title, description, points, category,
                   created_at, updated_at
            FROM league_rules
            WHERE league_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(league_id)
        .fetch_all(&self.pool)
        .await
    }
}
