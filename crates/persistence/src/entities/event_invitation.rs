//! Targeted event invitation entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Stored status value for a pending invitation.
pub const STATUS_PENDING: &str = "pending";

/// Stored status value for an accepted invitation.
pub const STATUS_ACCEPTED: &str = "accepted";

/// Database row mapping for the event_invitations table.
#[derive(Debug, Clone, FromRow)]
pub struct EventInvitationEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub code: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub status: String,
    pub invited_by: Option<Uuid>,
    pub expires_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub accepted_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl EventInvitationEntity {
    /// Check if this invitation has not been accepted yet.
    pub fn is_pending(&self) -> bool {
        self.status == STATUS_PENDING
    }

    /// Check if this invitation is past its expiry.
    ///
    /// Expiry is lazy: there is no stored `expired` status, redemption
    /// checks the timestamp at use time.
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }

    /// Check if this invitation can still be redeemed.
    pub fn is_valid(&self) -> bool {
        self.is_pending() && !self.is_expired()
    }
}
