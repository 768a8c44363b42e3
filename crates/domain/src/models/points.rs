//! Points assignment and leaderboard models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shared::validation::validate_point_value;

use super::rule::RuleCategory;

/// Request payload for assigning points to a member or participant.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct AssignPointsRequest {
    pub user_id: Uuid,

    /// Signed delta added to the stored total. Not idempotent: repeating the
    /// call repeats the effect.
    #[validate(custom(function = "validate_point_value"))]
    pub points: i32,

    pub category: RuleCategory,

    #[validate(length(max = 500, message = "Reason must be at most 500 characters"))]
    pub reason: Option<String>,
}

/// Result of a points assignment: the updated standing plus the echoed
/// delta, category and reason.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PointsAssignment {
    pub user_id: Uuid,
    pub total_points: i32,
    pub rank: i32,
    pub delta: i32,
    pub category: RuleCategory,
    pub reason: Option<String>,
}

/// One row of a leaderboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LeaderboardEntry {
    pub user_id: Uuid,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub total_points: i32,
    pub rank: i32,
}

/// Response for a leaderboard read, in rank order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LeaderboardResponse {
    pub data: Vec<LeaderboardEntry>,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_points_request_validation() {
        let valid = AssignPointsRequest {
            user_id: Uuid::new_v4(),
            points: -5,
            category: RuleCategory::Penalty,
            reason: Some("Late to kickoff".to_string()),
        };
        assert!(valid.validate().is_ok());

        let out_of_range = AssignPointsRequest {
            user_id: Uuid::new_v4(),
            points: 1_000_000,
            category: RuleCategory::Bonus,
            reason: None,
        };
        assert!(out_of_range.validate().is_err());
    }

    #[test]
    fn test_assign_points_request_deserializes_category() {
        let request: AssignPointsRequest = serde_json::from_str(
            r#"{"user_id": "4b8c0d76-9a27-4f08-8a3e-0a6f72f4e8f1", "points": 10, "category": "wins"}"#,
        )
        .unwrap();
        assert_eq!(request.category, RuleCategory::Wins);
        assert_eq!(request.points, 10);
        assert!(request.reason.is_none());
    }
}
