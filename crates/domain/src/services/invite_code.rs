//! Invite code and invitation code generation.
//!
//! Two kinds of secrets live here:
//! - the self-service invite code carried by a private league/event, redeemed
//!   together with the entity id;
//! - the targeted invitation code, looked up by code alone and therefore
//!   generated with more entropy from an unambiguous charset.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Length of a self-service invite code.
pub const INVITE_CODE_LEN: usize = 8;

/// Length of a targeted invitation code.
pub const INVITATION_CODE_LEN: usize = 12;

/// Default invitation lifetime in days.
pub const DEFAULT_INVITATION_DAYS: i32 = 7;

const INVITE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

// Avoids confusing characters (0, O, 1, l, I).
const INVITATION_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

fn random_code(charset: &[u8], len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..charset.len());
            charset[idx] as char
        })
        .collect()
}

/// Generates an 8-character uppercase alphanumeric invite code for a private
/// league or event.
pub fn generate_invite_code() -> String {
    random_code(INVITE_CHARSET, INVITE_CODE_LEN)
}

/// Generates a targeted invitation code.
pub fn generate_invitation_code() -> String {
    random_code(INVITATION_CHARSET, INVITATION_CODE_LEN)
}

/// Computes the absolute expiry for an invitation.
pub fn invitation_expiry(expires_in_days: Option<i32>) -> DateTime<Utc> {
    let days = expires_in_days.unwrap_or(DEFAULT_INVITATION_DAYS);
    Utc::now() + Duration::days(days as i64)
}
