//! Delegated league admin entity (database row mapping).
//!
//! The owner is never stored here; ownership is carried on the league row
//! and is not revocable.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the league_admins table.
#[derive(Debug, Clone, FromRow)]
pub struct LeagueAdminEntity {
    pub id: Uuid,
    pub league_id: Uuid,
    pub user_id: Uuid,
    pub granted_by: Option<Uuid>,
    pub granted_at: DateTime<Utc>,
}
