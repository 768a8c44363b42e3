//! Event entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the events table.
#[derive(Debug, Clone, FromRow)]
pub struct EventEntity {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub league_id: Option<Uuid>,
    pub owner_id: Uuid,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub is_private: bool,
    pub max_participants: Option<i32>,
    pub invite_code: Option<String>,
    pub scoring_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EventEntity {
    /// Check whether the given user owns this event.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    /// Check whether the given code matches the stored invite code exactly.
    pub fn invite_code_matches(&self, code: Option<&str>) -> bool {
        match (self.invite_code.as_deref(), code) {
            (Some(stored), Some(supplied)) => stored == supplied,
            _ => false,
        }
    }
}

/// Event row joined with its participant count, for listings.
#[derive(Debug, Clone, FromRow)]
pub struct EventWithCountEntity {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub league_id: Option<Uuid>,
    pub owner_id: Uuid,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub is_private: bool,
    pub max_participants: Option<i32>,
    pub invite_code: Option<String>,
    pub scoring_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub participant_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_event(invite_code: Option<&str>) -> EventEntity {
        EventEntity {
            id: Uuid::new_v4(),
            title: "Season opener".to_string(),
            description: None,
            league_id: None,
            owner_id: Uuid::new_v4(),
            starts_at: None,
            ends_at: None,
            is_private: invite_code.is_some(),
            max_participants: Some(16),
            invite_code: invite_code.map(String::from),
            scoring_enabled: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_owned_by() {
        let event = create_test_event(None);
        assert!(event.is_owned_by(event.owner_id));
        assert!(!event.is_owned_by(Uuid::new_v4()));
    }

    #[test]
    fn test_invite_code_matches() {
        let event = create_test_event(Some("EVNT2024"));
        assert!(event.invite_code_matches(Some("EVNT2024")));
        assert!(!event.invite_code_matches(Some("evnt2024")));
        assert!(!event.invite_code_matches(None));

        let open_event = create_test_event(None);
        assert!(!open_event.invite_code_matches(Some("EVNT2024")));
    }
}
