use serde::{Deserialize, Serialize};

/// Outcome of pushing a waitlist entry into the external mailing list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContactSyncStatus {
    /// Not attempted (sync disabled or not reached yet).
    #[default]
    Pending,
    Success,
    Failed,
}

impl ContactSyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactSyncStatus::Pending => "pending",
            ContactSyncStatus::Success => "success",
            ContactSyncStatus::Failed => "failed",
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ContactSyncStatus::Failed)
    }
}

impl std::fmt::Display for ContactSyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
