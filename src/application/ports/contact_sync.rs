use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::entities::contact_sync_status::ContactSyncStatus;

// ============================================================================
// Port Types
// ============================================================================

/// A new signup to push into the mailing list.
#[derive(Debug, Clone)]
pub struct ContactRequest {
    pub email: String,
    pub name: Option<String>,
    pub referral_source: Option<String>,
    pub position: i64,
    pub signup_date: NaiveDate,
}

impl ContactRequest {
    /// First word of the name, and the remainder if any.
    pub fn name_parts(&self) -> (Option<&str>, Option<&str>) {
        let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) else {
            return (None, None);
        };
        match name.split_once(char::is_whitespace) {
            Some((first, rest)) => {
                let rest = rest.trim();
                (Some(first), (!rest.is_empty()).then_some(rest))
            }
            None => (Some(name), None),
        }
    }
}

/// Result of a sync attempt. Failures are data, not errors: a signup is never
/// rejected because the mailing list is down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSyncReport {
    pub status: ContactSyncStatus,
    pub contact_id: Option<String>,
    pub error_code: Option<&'static str>,
    pub message: String,
}

impl ContactSyncReport {
    pub fn success(contact_id: Option<String>, message: impl Into<String>) -> Self {
        Self {
            status: ContactSyncStatus::Success,
            contact_id,
            error_code: None,
            message: message.into(),
        }
    }

    pub fn failed(error_code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: ContactSyncStatus::Failed,
            contact_id: None,
            error_code: Some(error_code),
            message: message.into(),
        }
    }

    pub fn skipped() -> Self {
        Self {
            status: ContactSyncStatus::Pending,
            contact_id: None,
            error_code: None,
            message: "Contact sync disabled".to_string(),
        }
    }
}

/// Connectivity report for health checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactConnection {
    pub enabled: bool,
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ContactConnection {
    /// Healthy means either disabled or reachable.
    pub fn is_healthy(&self) -> bool {
        !self.enabled || self.connected
    }
}

// ============================================================================
// Port Trait
// ============================================================================

#[async_trait]
pub trait ContactSync: Send + Sync {
    async fn add_contact(&self, contact: &ContactRequest) -> ContactSyncReport;
    async fn check_connection(&self) -> ContactConnection;
}

/// Used when no mailing-list credentials are configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledContactSync;

#[async_trait]
impl ContactSync for DisabledContactSync {
    async fn add_contact(&self, _contact: &ContactRequest) -> ContactSyncReport {
        ContactSyncReport::skipped()
    }

    async fn check_connection(&self) -> ContactConnection {
        ContactConnection::default()
    }
}
