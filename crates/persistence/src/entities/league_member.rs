//! League membership entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::services::ranking::Standing;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the league_members table.
#[derive(Debug, Clone, FromRow)]
pub struct LeagueMemberEntity {
    pub id: Uuid,
    pub league_id: Uuid,
    pub user_id: Uuid,
    pub points: i32,
    pub rank: i32,
    pub joined_at: DateTime<Utc>,
}

/// Member or participant row joined with user info, ordered by rank.
///
/// Shared by league member and event participant listings (the two tables
/// have the same standing columns).
#[derive(Debug, Clone, FromRow)]
pub struct MemberRowEntity {
    pub user_id: Uuid,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub points: i32,
    pub rank: i32,
    pub joined_at: DateTime<Utc>,
}

/// Minimal standing row loaded (with a row lock) before a rank recompute.
#[derive(Debug, Clone, FromRow)]
pub struct StandingRowEntity {
    pub user_id: Uuid,
    pub points: i32,
    pub joined_at: DateTime<Utc>,
}

impl From<StandingRowEntity> for Standing {
    fn from(row: StandingRowEntity) -> Self {
        Standing {
            user_id: row.user_id,
            points: row.points,
            joined_at: row.joined_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standing_row_conversion() {
        let row = StandingRowEntity {
            user_id: Uuid::new_v4(),
            points: 42,
            joined_at: Utc::now(),
        };
        let standing: Standing = row.clone().into();
        assert_eq!(standing.user_id, row.user_id);
        assert_eq!(standing.points, 42);
        assert_eq!(standing.joined_at, row.joined_at);
    }
}
