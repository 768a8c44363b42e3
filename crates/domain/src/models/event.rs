//! Event domain models.
//!
//! Events optionally belong to a league; points earned in a linked event are
//! mirrored onto the league membership.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shared::validation::validate_not_blank;

use super::member::MemberResponse;
use super::rule::RuleResponse;

/// Request payload for creating an event.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateEventRequest {
    #[validate(
        length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    /// League this event belongs to; participants' event points are then
    /// mirrored onto their league membership.
    pub league_id: Option<Uuid>,

    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub is_private: bool,

    #[validate(range(min = 2, max = 10000, message = "Max participants must be between 2 and 10000"))]
    pub max_participants: Option<i32>,

    #[serde(default = "default_scoring_enabled")]
    pub scoring_enabled: bool,
}

fn default_scoring_enabled() -> bool {
    true
}

/// Request payload for partially updating an event.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateEventRequest {
    #[validate(
        length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: Option<String>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,

    pub is_private: Option<bool>,

    #[validate(range(min = 2, max = 10000, message = "Max participants must be between 2 and 10000"))]
    pub max_participants: Option<i32>,

    pub scoring_enabled: Option<bool>,
}

/// Event representation in create/update responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EventResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub league_id: Option<Uuid>,
    pub owner_id: Uuid,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub is_private: bool,
    pub max_participants: Option<i32>,
    /// Present only when the caller administers the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_code: Option<String>,
    pub scoring_enabled: bool,
    pub participant_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Event representation in listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EventSummary {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub league_id: Option<Uuid>,
    pub owner_id: Uuid,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub is_private: bool,
    pub participant_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Aggregate event detail: the event plus participants and rule catalog.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EventDetail {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub league_id: Option<Uuid>,
    pub owner_id: Uuid,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub is_private: bool,
    pub max_participants: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_code: Option<String>,
    pub scoring_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub participants: Vec<MemberResponse>,
    pub rules: Vec<RuleResponse>,
}

/// Query parameters for listing events.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ListEventsQuery {
    /// Restrict the listing to events of one league.
    pub league_id: Option<Uuid>,
}

/// Response for listing events.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListEventsResponse {
    pub data: Vec<EventSummary>,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_event_request_validation() {
        let valid = CreateEventRequest {
            title: "Season opener".to_string(),
            description: None,
            league_id: Some(Uuid::new_v4()),
            starts_at: None,
            ends_at: None,
            is_private: false,
            max_participants: Some(16),
            scoring_enabled: true,
        };
        assert!(valid.validate().is_ok());

        let blank_title = CreateEventRequest {
            title: "  ".to_string(),
            ..valid.clone()
        };
        assert!(blank_title.validate().is_err());

        let tiny_capacity = CreateEventRequest {
            max_participants: Some(1),
            ..valid
        };
        assert!(tiny_capacity.validate().is_err());
    }

    #[test]
    fn test_create_event_request_defaults() {
        let request: CreateEventRequest =
            serde_json::from_str(r#"{"title": "Quiz night"}"#).unwrap();
        assert!(request.scoring_enabled, "scoring defaults to enabled");
        assert!(!request.is_private);
        assert!(request.league_id.is_none());
        assert!(request.max_participants.is_none());
    }

    #[test]
    fn test_update_event_request_all_optional() {
        let request: UpdateEventRequest = serde_json::from_str("{}").unwrap();
        assert!(request.validate().is_ok());
        assert!(request.scoring_enabled.is_none());
    }
}
