//! Repository for event database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{EventEntity, EventWithCountEntity};

/// Repository for event operations.
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Creates a new event repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a new event.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        title: &str,
        description: Option<&str>,
        league_id: Option<Uuid>,
        owner_id: Uuid,
        starts_at: Option<chrono::DateTime<chrono::Utc>>,
        ends_at: Option<chrono::DateTime<chrono::Utc>>,
        is_private: bool,
        max_participants: Option<i32>,
        invite_code: Option<&str>,
        scoring_enabled: bool,
    ) -> Result<EventEntity, sqlx::Error> {
        sqlx::query_as::<_, EventEntity>(
            r#"
            INSERT INTO events (title, description, league_id, owner_id, starts_at, ends_at,
                                is_private, max_participants, invite_code, scoring_enabled)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, title, description, league_id, owner_id, starts_at, ends_at,
                      is_private, max_participants, invite_code, scoring_enabled,
                      created_at, updated_at
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(league_id)
        .bind(owner_id)
        .bind(starts_at)
        .bind(ends_at)
        .bind(is_private)
        .bind(max_participants)
        .bind(invite_code)
        .bind(scoring_enabled)
        .fetch_one(&self.pool)
        .await
    }

    /// Finds an event by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<EventEntity>, sqlx::Error> {
        sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT id, title, description, league_id, owner_id, starts_at, ends_at,
                   is_private, max_participants, invite_code, scoring_enabled,
                   created_at, updated_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Lists events visible to the given user, optionally filtered by
    /// league: public events plus events the user owns or participates in.
    pub async fn list_visible(
        &self,
        user_id: Uuid,
        league_id: Option<Uuid>,
    ) -> Result<Vec<EventWithCountEntity>, sqlx::Error> {
        sqlx::query_as::<_, EventWithCountEntity>(
            r#"
            SELECT e.id, e.title, e.description, e.league_id, e.owner_id,
                   e.starts_at, e.ends_at, e.is_private, e.max_participants,
                   e.invite_code, e.scoring_enabled, e.created_at, e.updated_at,
                   (SELECT COUNT(*) FROM event_participants p
                    WHERE p.event_id = e.id) AS participant_count
            FROM events e
            WHERE ($2::uuid IS NULL OR e.league_id = $2)
              AND (e.is_private = FALSE
                   OR e.owner_id = $1
                   OR EXISTS (SELECT 1 FROM event_participants p
                              WHERE p.event_id = e.id AND p.user_id = $1))
            ORDER BY e.created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(league_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Partially updates an event's profile and scheduling fields.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        starts_at: Option<chrono::DateTime<chrono::Utc>>,
        ends_at: Option<chrono::DateTime<chrono::Utc>>,
        max_participants: Option<i32>,
        scoring_enabled: Option<bool>,
    ) -> Result<Option<EventEntity>, sqlx::Error> {
        sqlx::query_as::<_, EventEntity>(
            r#"
            UPDATE events
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                starts_at = COALESCE($4, starts_at),
                ends_at = COALESCE($5, ends_at),
                max_participants = COALESCE($6, max_participants),
                scoring_enabled = COALESCE($7, scoring_enabled),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, league_id, owner_id, starts_at, ends_at,
                      is_private, max_participants, invite_code, scoring_enabled,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(starts_at)
        .bind(ends_at)
        .bind(max_participants)
        .bind(scoring_enabled)
        .fetch_optional(&self.pool)
        .await
    }

    /// Sets the privacy flag together with the invite code it implies.
    pub async fn set_privacy(
        &self,
        id: Uuid,
        is_private: bool,
        invite_code: Option<&str>,
    ) -> Result<Option<EventEntity>, sqlx::Error> {
        sqlx::query_as::<_, EventEntity>(
            r#"
            UPDATE events
            SET is_private = $2,
                invite_code = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, league_id, owner_id, starts_at, ends_at,
                      is_private, max_participants, invite_code, scoring_enabled,
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
