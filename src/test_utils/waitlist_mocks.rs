//! In-memory implementations of the waitlist ports.
//!
//! `InMemoryWaitlistRepo` checks uniqueness and inserts under one lock, which
//! is how the unique index behaves for concurrent inserts in Postgres.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;

use crate::{
    app_error::{AppError, AppResult},
    application::{
        ports::contact_sync::{ContactConnection, ContactRequest, ContactSync, ContactSyncReport},
        use_cases::waitlist::{InsertOutcome, WaitlistRepo},
    },
    domain::entities::{
        waitlist_entry::{NewWaitlistEntry, WaitlistEntry},
        waitlist_status::WaitlistStatus,
    },
};

// ============================================================================
// InMemoryWaitlistRepo
// ============================================================================

#[derive(Default)]
pub struct InMemoryWaitlistRepo {
    pub entries: Mutex<Vec<WaitlistEntry>>,
    pub sync_reports: Mutex<HashMap<i64, ContactSyncReport>>,
}

impl InMemoryWaitlistRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<WaitlistEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            sync_reports: Mutex::new(HashMap::new()),
        }
    }

    pub fn sync_report(&self, id: i64) -> Option<ContactSyncReport> {
        self.sync_reports.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl WaitlistRepo for InMemoryWaitlistRepo {
    async fn insert_if_new(&self, entry: &NewWaitlistEntry) -> AppResult<InsertOutcome> {
        let mut entries = self.entries.lock().unwrap();

        if let Some(existing) = entries.iter().find(|e| e.email == entry.email) {
            return Ok(InsertOutcome::AlreadyExists(existing.clone()));
        }

        let next_id = entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        let created = WaitlistEntry {
            id: next_id,
            email: entry.email.clone(),
            name: entry.name.clone(),
            referral_source: entry.referral_source.clone(),
            status: WaitlistStatus::Pending,
            created_at: Utc::now(),
        };
        entries.push(created.clone());
        Ok(InsertOutcome::Created {
            entry: created,
            position: entries.len() as i64,
        })
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.entries.lock().unwrap().len() as i64)
    }

    async fn position_of(&self, id: i64) -> AppResult<i64> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.id <= id)
            .count() as i64)
    }

    async fn record_contact_sync(&self, id: i64, report: &ContactSyncReport) -> AppResult<()> {
        self.sync_reports.lock().unwrap().insert(id, report.clone());
        Ok(())
    }
}

// ============================================================================
// UnavailableWaitlistRepo
// ============================================================================

/// Every call fails the way an unreachable database does.
#[derive(Default)]
pub struct UnavailableWaitlistRepo;

fn unavailable<T>() -> AppResult<T> {
    Err(AppError::StorageUnavailable("connection refused".into()))
}

#[async_trait]
impl WaitlistRepo for UnavailableWaitlistRepo {
    async fn insert_if_new(&self, _entry: &NewWaitlistEntry) -> AppResult<InsertOutcome> {
        unavailable()
    }

    async fn count(&self) -> AppResult<i64> {
        unavailable()
    }

    async fn position_of(&self, _id: i64) -> AppResult<i64> {
        unavailable()
    }

    async fn record_contact_sync(&self, _id: i64, _report: &ContactSyncReport) -> AppResult<()> {
        unavailable()
    }
}

// ============================================================================
// RecordingContactSync
// ============================================================================

/// Returns a fixed report and remembers every request it was given.
pub struct RecordingContactSync {
    report: ContactSyncReport,
    connection: ContactConnection,
    calls: Mutex<Vec<ContactRequest>>,
}

impl RecordingContactSync {
    pub fn succeeding() -> Self {
        Self {
            report: ContactSyncReport::success(Some("42".into()), "Contact added"),
            connection: ContactConnection {
                enabled: true,
                connected: true,
                account_email: Some("owner@example.com".into()),
                company_name: Some("Example Inc".into()),
                plan_type: Some("free".into()),
                error: None,
            },
            calls: Mutex::new(vec![]),
        }
    }

    pub fn failing() -> Self {
        Self {
            report: ContactSyncReport::failed("BREVO_API_ERROR", "API error: Bad Gateway"),
            connection: ContactConnection {
                enabled: true,
                connected: false,
                error: Some("API error: Bad Gateway".into()),
                ..Default::default()
            },
            calls: Mutex::new(vec![]),
        }
    }

    pub fn calls(&self) -> Vec<ContactRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContactSync for RecordingContactSync {
    async fn add_contact(&self, contact: &ContactRequest) -> ContactSyncReport {
        self.calls.lock().unwrap().push(contact.clone());
        self.report.clone()
    }

    async fn check_connection(&self) -> ContactConnection {
        self.connection.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_entry;

    #[tokio::test]
    async fn in_memory_repo_positions_follow_id_order() {
        let repo = InMemoryWaitlistRepo::with_entries(vec![
            create_test_entry(|e| {
                e.id = 1;
                e.email = "a@example.com".into();
            }),
            create_test_entry(|e| {
                e.id = 2;
                e.email = "b@example.com".into();
            }),
        ]);

        assert_eq!(repo.position_of(2).await.unwrap(), 2);

        let outcome = repo
            .insert_if_new(&NewWaitlistEntry {
                email: "c@example.com".into(),
                name: None,
                referral_source: None,
            })
            .await
            .unwrap();
        let InsertOutcome::Created { entry, position } = outcome else {
            panic!("expected a new entry");
        };
        assert_eq!(entry.id, 3);
        assert_eq!(position, 3);
        assert_eq!(repo.count().await.unwrap(), 3);
    }
}
