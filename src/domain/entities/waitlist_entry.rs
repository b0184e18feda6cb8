use chrono::{DateTime, Utc};

use super::waitlist_status::WaitlistStatus;

/// A stored waitlist signup. `email` is always the normalized address.
#[derive(Debug, Clone, PartialEq)]
pub struct WaitlistEntry {
    /// Store-assigned identity. Only used for ordering; never returned to clients.
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub referral_source: Option<String>,
    pub status: WaitlistStatus,
    pub created_at: DateTime<Utc>,
}

/// Validated, normalized input for a new waitlist row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWaitlistEntry {
    pub email: String,
    pub name: Option<String>,
    pub referral_source: Option<String>,
}
