//! League entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the leagues table.
#[derive(Debug, Clone, FromRow)]
pub struct LeagueEntity {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub is_private: bool,
    pub invite_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LeagueEntity {
    /// Check whether the given user owns this league.
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

/// League row joined with its member count, for listings.
#[derive(Debug, Clone, FromRow)]
pub struct LeagueWithCountEntity {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub is_private: bool,
    pub invite_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub member_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_league(invite_code: Option<&str>) -> LeagueEntity {
        LeagueEntity {
            id: Uuid::new_v4(),
            name: "Sunday Football".to_string(),
            description: None,
            owner_id: Uuid::new_v4(),
            is_private: invite_code.is_some(),
            invite_code: invite_code.map(String::from),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_owned_by() {
        let league = create_test_league(None);
        assert!(league.is_owned_by(league.owner_id));
        assert!(!league.is_owned_by(Uuid::new_v4()));
    }

    #[test]
    fn test_invite_code_matches_exact() {
        let league = create_test_league(Some("A1B2C3D4"));
        assert!(league.invite_code_matches(Some("A1B2C3D4")));
        assert!(!league.invite_code_matches(Some("a1b2c3d4")));
        assert!(!league.invite_code_matches(Some("WRONG123")));
        assert!(!league.invite_code_matches(None));
    }

    #[test]
    fn test_invite_code_matches_without_stored_code() {
        let league = create_test_league(None);
        assert!(!league.invite_code_matches(Some("A1B2C3D4")));
        assert!(!league.invite_code_matches(None));
    }
}
