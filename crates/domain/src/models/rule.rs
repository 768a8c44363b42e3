//! Scoring rule models shared by leagues and events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use shared::validation::{validate_not_blank, validate_point_value};

/// Category of a scoring rule.
///
/// Advisory only: assigning points re-states the category explicitly, the
/// catalog never applies points by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    Wins,
    Participation,
    Bonus,
    Penalty,
}

impl RuleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCategory::Wins => "wins",
            RuleCategory::Participation => "participation",
            RuleCategory::Bonus => "bonus",
            RuleCategory::Penalty => "penalty",
        }
    }
}

impl FromStr for RuleCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wins" => Ok(RuleCategory::Wins),
            "participation" => Ok(RuleCategory::Participation),
            "bonus" => Ok(RuleCategory::Bonus),
            "penalty" => Ok(RuleCategory::Penalty),
            _ => Err(format!("Invalid rule category: {}", s)),
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request payload for creating a rule.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateRuleRequest {
    #[validate(
        length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_point_value"))]
    pub points: i32,

    pub category: RuleCategory,
}

/// Request payload for partially updating a rule.
///
/// Only supplied fields change; everything else keeps its prior value.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateRuleRequest {
    #[validate(
        length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: Option<String>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_point_value"))]
    pub points: Option<i32>,

    pub category: Option<RuleCategory>,
}

/// Rule representation in responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RuleResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub points: i32,
    pub category: RuleCategory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response for listing rules.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListRulesResponse {
    pub data: Vec<RuleResponse>,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_category_as_str() {
        assert_eq!(RuleCategory::Wins.as_str(), "wins");
        assert_eq!(RuleCategory::Participation.as_str(), "participation");
        assert_eq!(RuleCategory::Bonus.as_str(), "bonus");
        assert_eq!(RuleCategory::Penalty.as_str(), "penalty");
    }

    #[test]
    fn test_rule_category_from_str() {
        assert_eq!(RuleCategory::from_str("wins").unwrap(), RuleCategory::Wins);
        assert_eq!(
            RuleCategory::from_str("PARTICIPATION").unwrap(),
            RuleCategory::Participation
        );
        assert_eq!(RuleCategory::from_str("Bonus").unwrap(), RuleCategory::Bonus);
        assert_eq!(
            RuleCategory::from_str("penalty").unwrap(),
            RuleCategory::Penalty
        );
        assert!(RuleCategory::from_str("streak").is_err());
    }

    #[test]
    fn test_rule_category_display() {
        assert_eq!(format!("{}", RuleCategory::Wins), "wins");
        assert_eq!(format!("{}", RuleCategory::Penalty), "penalty");
    }

    #[test]
    fn test_rule_category_serde_roundtrip() {
        let json = serde_json::to_string(&RuleCategory::Bonus).unwrap();
        assert_eq!(json, "\"bonus\"");
        let parsed: RuleCategory = serde_json::from_str("\"wins\"").unwrap();
        assert_eq!(parsed, RuleCategory::Wins);
    }

    #[test]
    fn test_create_rule_request_validation() {
        let valid = CreateRuleRequest {
            title: "Match win".to_string(),
            description: Some("Winning a scheduled match".to_string()),
            points: 10,
            category: RuleCategory::Wins,
        };
        assert!(valid.validate().is_ok());

        let blank_title = CreateRuleRequest {
            title: "   ".to_string(),
            description: None,
            points: 10,
            category: RuleCategory::Wins,
        };
        assert!(blank_title.validate().is_err());

        let absurd_points = CreateRuleRequest {
            title: "Cheating".to_string(),
            description: None,
            points: -1_000_000,
            category: RuleCategory::Penalty,
        };
        assert!(absurd_points.validate().is_err());
    }

    #[test]
    fn test_update_rule_request_all_optional() {
        let empty = UpdateRuleRequest {
            title: None,
            description: None,
            points: None,
            category: None,
        };
        assert!(empty.validate().is_ok());
    }
}
