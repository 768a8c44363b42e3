//! Repository for targeted event invitation database operations.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::entities::EventInvitationEntity;

/// Repository for event invitation operations.
#[derive(Clone)]
pub struct EventInvitationRepository {
    pool: PgPool,
}

impl EventInvitationRepository {
    /// Creates a new event invitation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a new invitation.
    ///
    /// Codes are globally unique; the caller regenerates and retries on a
    /// unique constraint violation.
    pub async fn create(
        &self,
        event_id: Uuid,
        code: &str,
        email: Option<&str>,
        phone_number: Option<&str>,
        invited_by: Uuid,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<EventInvitationEntity, sqlx::Error> {
        sqlx::query_as::<_, EventInvitationEntity>(
            r#"
            INSERT INTO event_invitations (event_id, code, email, phone_number, invited_by, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, event_id, code, email, phone_number, status, invited_by,
                      expires_at, accepted_at, accepted_by, created_at
            "#,
        )
        .bind(event_id)
        .bind(code)
        .bind(email)
        .bind(phone_number)
        .bind(invited_by)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
    }

    /// Finds an invitation by its code.
    pub async fn find_by_code(
        &self,
        code: &str,
    ) -> Result<Option<EventInvitationEntity>, sqlx::Error> {
        sqlx::query_as::<_, EventInvitationEntity>(
            r#"
            SELECT id, event_id, code, email, phone_number, status, invited_by,
                   expires_at, accepted_at, accepted_by, created_at
            FROM event_invitations
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
    }

    /// Lists an event's invitations, newest first.
    pub async fn list_by_event(
        &self,
        event_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<EventInvitationEntity>, sqlx::Error> {
        sqlx::query_as::<_, EventInvitationEntity>(
            r#"
            SELECT id, event_id, code, email, phone_number, status, invited_by,
                   expires_at, accepted_at, accepted_by, created_at
            FROM event_invitations
            WHERE event_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(event_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    /// Counts an event's invitations.
    pub async fn count_by_event(&self, event_id: Uuid) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM event_invitations
            WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Gets invitation status counts for an event.
    pub async fn summary_counts(
        &self,
        event_id: Uuid,
    ) -> Result<InvitationSummaryCounts, sqlx::Error> {
        let result: (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status = 'pending' AND expires_at > NOW()) AS pending,
                COUNT(*) FILTER (WHERE status = 'accepted') AS accepted,
                COUNT(*) FILTER (WHERE status = 'pending' AND expires_at <= NOW()) AS expired
            FROM event_invitations
            WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(InvitationSummaryCounts {
            pending: result.0,
            accepted: result.1,
            expired: result.2,
        })
    }

    /// Marks an invitation as accepted.
    ///
    /// The status guard makes the pending→accepted transition happen at most
    /// once; returns false if another request got there first.
    pub async fn accept(
        &self,
        conn: &mut PgConnection,
        invitation_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE event_invitations
            SET status = 'accepted', accepted_at = NOW(), accepted_by = $2
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(invitation_id)
        .bind(user_id)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a pending invitation. Returns true if one was removed.
    pub async fn delete_pending(
        &self,
        invitation_id: Uuid,
        event_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM event_invitations
            WHERE id = $1 AND event_id = $2 AND status = 'pending'
            "#,
        )
        .bind(invitation_id)
        .bind(event_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Status counts for an event's invitations.
#[derive(Debug, Clone)]
pub struct InvitationSummaryCounts {
    pub pending: i64,
    pub accepted: i64,
    pub expired: i64,
}
