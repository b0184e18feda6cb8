use serde::{Deserialize, Serialize};

/// Lifecycle stage of a waitlist entry. New signups always start as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WaitlistStatus {
    #[default]
    Pending,
    Confirmed,
    Invited,
    Active,
}

impl WaitlistStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaitlistStatus::Pending => "pending",
            WaitlistStatus::Confirmed => "confirmed",
            WaitlistStatus::Invited => "invited",
            WaitlistStatus::Active => "active",
        }
    }

    /// Parse a stored value, falling back to `Pending` for anything unknown.
    pub fn from_db(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|err| {
            tracing::warn!(raw = raw, error = %err, "Unknown waitlist status in database");
            WaitlistStatus::default()
        })
    }
}

impl std::fmt::Display for WaitlistStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for WaitlistStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(WaitlistStatus::Pending),
            "confirmed" => Ok(WaitlistStatus::Confirmed),
            "invited" => Ok(WaitlistStatus::Invited),
            "active" => Ok(WaitlistStatus::Active),
            _ => Err(format!(
                "Invalid waitlist status: {}. Must be 'pending', 'confirmed', 'invited' or 'active'",
                s
            )),
        }
    }
}
