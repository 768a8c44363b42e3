//! Scoring rule entities (database row mappings).
//!
//! League and event rules share a shape but live in separate tables scoped
//! by their parent.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the league_rules table.
#[derive(Debug, Clone, FromRow)]
pub struct LeagueRuleEntity {
    pub id: Uuid,
    pub league_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub points: i32,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database row mapping for the event_rules table.
#[derive(Debug, Clone, FromRow)]
pub struct EventRuleEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub points: i32,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
