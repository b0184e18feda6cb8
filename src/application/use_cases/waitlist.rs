use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::{
    app_error::{AppError, AppResult},
    application::{
        ports::contact_sync::{ContactConnection, ContactRequest, ContactSync, ContactSyncReport},
        validators::{
            MAX_NAME_LEN, MAX_REFERRAL_SOURCE_LEN, clean_optional_text, is_valid_email,
            normalize_email,
        },
    },
    domain::entities::{
        contact_sync_status::ContactSyncStatus,
        waitlist_entry::{NewWaitlistEntry, WaitlistEntry},
    },
};

// ============================================================================
// Repository Trait
// ============================================================================

/// Persistence port for waitlist entries.
///
/// Implementations must enforce email uniqueness in storage (a unique index),
/// so that concurrent inserts of the same address produce one row and the
/// losers observe `AlreadyExists`.
#[async_trait]
pub trait WaitlistRepo: Send + Sync {
    /// Inserts unless the email is taken. A created entry comes back with its
    /// position, computed in the same statement as the insert.
    async fn insert_if_new(&self, entry: &NewWaitlistEntry) -> AppResult<InsertOutcome>;

    async fn count(&self) -> AppResult<i64>;

    /// 1-based position of the entry in signup order.
    async fn position_of(&self, id: i64) -> AppResult<i64>;

    async fn record_contact_sync(&self, id: i64, report: &ContactSyncReport) -> AppResult<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    Created { entry: WaitlistEntry, position: i64 },
    AlreadyExists(WaitlistEntry),
}

// ============================================================================
// Input / Output Types
// ============================================================================

/// Raw submission as received from the client.
#[derive(Debug, Clone, Default)]
pub struct WaitlistSubmission {
    pub email: String,
    pub name: Option<String>,
    pub referral_source: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AddOutcome {
    pub already_existed: bool,
    pub entry: WaitlistEntry,
    pub position: i64,
    /// Only set when this call created the entry.
    pub contact_sync: Option<ContactSyncStatus>,
}

// ============================================================================
// Use Cases
// ============================================================================

#[derive(Clone)]
pub struct WaitlistUseCases {
    repo: Arc<dyn WaitlistRepo>,
    contacts: Arc<dyn ContactSync>,
}

impl WaitlistUseCases {
    pub fn new(repo: Arc<dyn WaitlistRepo>, contacts: Arc<dyn ContactSync>) -> Self {
        Self { repo, contacts }
    }

    /// Adds an email to the waitlist. Re-submitting a known address (in any
    /// casing or surrounding whitespace) succeeds with `already_existed = true`.
    #[instrument(skip(self, submission))]
    pub async fn add(&self, submission: WaitlistSubmission) -> AppResult<AddOutcome> {
        let new_entry = prepare_entry(&submission)?;

        match self.repo.insert_if_new(&new_entry).await? {
            InsertOutcome::AlreadyExists(entry) => {
                tracing::info!(email = %entry.email, "Duplicate waitlist submission");
                let position = self.repo.position_of(entry.id).await?;
                Ok(AddOutcome {
                    already_existed: true,
                    entry,
                    position,
                    contact_sync: None,
                })
            }
            InsertOutcome::Created { entry, position } => {
                tracing::info!(email = %entry.email, position, "Waitlist entry created");
                let sync_status = self.sync_contact(&entry, position).await;
                Ok(AddOutcome {
                    already_existed: false,
                    entry,
                    position,
                    contact_sync: Some(sync_status),
                })
            }
        }
    }

    /// Number of distinct entries, read from the store on every call.
    #[instrument(skip(self))]
    pub async fn count(&self) -> AppResult<i64> {
        self.repo.count().await
    }

    pub async fn contacts_status(&self) -> ContactConnection {
        self.contacts.check_connection().await
    }

    async fn sync_contact(&self, entry: &WaitlistEntry, position: i64) -> ContactSyncStatus {
        let request = ContactRequest {
            email: entry.email.clone(),
            name: entry.name.clone(),
            referral_source: entry.referral_source.clone(),
            position,
            signup_date: entry.created_at.date_naive(),
        };

        let report = self.contacts.add_contact(&request).await;

        match report.status {
            ContactSyncStatus::Pending => return report.status,
            ContactSyncStatus::Failed => tracing::warn!(
                email = %entry.email,
                error_code = ?report.error_code,
                message = %report.message,
                "Contact sync failed; waitlist entry kept"
            ),
            ContactSyncStatus::Success => {
                tracing::info!(email = %entry.email, contact_id = ?report.contact_id, "Contact synced")
            }
        }

        if let Err(err) = self.repo.record_contact_sync(entry.id, &report).await {
            tracing::warn!(error = %err, entry_id = entry.id, "Failed to record contact sync result");
        }

        report.status
    }
}

fn prepare_entry(submission: &WaitlistSubmission) -> AppResult<NewWaitlistEntry> {
    let email = normalize_email(&submission.email);
    if !is_valid_email(&email) {
        return Err(AppError::InvalidInput("invalid email".into()));
    }

    Ok(NewWaitlistEntry {
        email,
        name: clean_optional_text(submission.name.as_deref(), MAX_NAME_LEN, "name")?,
        referral_source: clean_optional_text(
            submission.referral_source.as_deref(),
            MAX_REFERRAL_SOURCE_LEN,
            "referral_source",
        )?,
    })
}
