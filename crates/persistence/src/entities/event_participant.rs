//! Event participant entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the event_participants table.
#[derive(Debug, Clone, FromRow)]
pub struct EventParticipantEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub points: i32,
    pub rank: i32,
    pub joined_at: DateTime<Utc>,
}
