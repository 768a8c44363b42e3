//! Repository for event rule database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::EventRuleEntity;

/// Repository for event rule operations.
#[derive(Clone)]
pub struct EventRuleRepository {
    pool: PgPool,
}

impl EventRuleRepository {
    /// Creates a new event rule repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a new rule in the event's catalog.
    pub async fn create(
        &self,
        event_id: Uuid,
        title: &str,
        description: Option<&str>,
        points: i32,
        category: &str,
    ) -> Result<EventRuleEntity, sqlx::Error> {
        sqlx::query_as::<_, EventRuleEntity>(
            r#"
            INSERT INTO event_rules (event_id, title, description, points, category)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, event_id, title, description, points, category,
                      created_at, updated_at
            "#,
        )
        .bind(event_id)
        .bind(title)
        .bind(description)
        .bind(points)
        .bind(category)
        .fetch_one(&self.pool)
        .await
    }

    /// Partially updates a rule; only supplied fields change.
    ///
    /// Returns None when the rule does not belong to the stated event.
    pub async fn update(
        &self,
        event_id: Uuid,
        rule_id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        points: Option<i32>,
        category: Option<&str>,
    ) -> Result<Option<EventRuleEntity>, sqlx::Error> {
        sqlx::query_as::<_, EventRuleEntity>(
            r#"
            UPDATE event_rules
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                points = COALESCE($5, points),
                category = COALESCE($6, category),
                updated_at = NOW()
            WHERE id = $2 AND event_id = $1
            RETURNING id, event_id, title, description, points, category,
                      created_at, updated_at
            "#,
        )
        .bind(event_id)
        .bind(rule_id)
        .bind(title)
        .bind(description)
        .bind(points)
        .bind(category)
        .fetch_optional(&self.pool)
        .await
    }

    /// Lists the event's rule catalog.
    pub async fn list_by_event(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<EventRuleEntity>, sqlx::Error> {
        sqlx::query_as::<_, EventRuleEntity>(
            r#"
            SELECT id, event_id, title, description, points, category,
                   created_at, updated_at
            FROM event_rules
            WHERE event_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
    }
}
