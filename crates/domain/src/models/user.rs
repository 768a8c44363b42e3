//! User identity models.
//!
//! Users are owned by the external authentication service; this backend only
//! reads the mirrored identity record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public user info embedded in member lists and leaderboards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UserPublic {
    pub id: Uuid,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}
