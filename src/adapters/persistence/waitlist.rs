use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::{
        ports::contact_sync::ContactSyncReport,
        use_cases::waitlist::{InsertOutcome, WaitlistRepo},
    },
    domain::entities::{
        contact_sync_status::ContactSyncStatus,
        waitlist_entry::{NewWaitlistEntry, WaitlistEntry},
        waitlist_status::WaitlistStatus,
    },
};

fn row_to_entry(row: sqlx::postgres::PgRow) -> WaitlistEntry {
    let status: String = row.get("status");
    WaitlistEntry {
        id: row.get("id"),
        email: row.get("email"),
        name: row.get("name"),
        referral_source: row.get("referral_source"),
        status: WaitlistStatus::from_db(&status),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl WaitlistRepo for PostgresPersistence {
    async fn insert_if_new(&self, entry: &NewWaitlistEntry) -> AppResult<InsertOutcome> {
        // The outer SELECT sees the table as it was before the insert, so the
        // new row counts itself with the `+ 1`.
        let inserted = sqlx::query(
            r#"
            WITH inserted AS (
                INSERT INTO waitlist (email, name, referral_source, status)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (email) DO NOTHING
                RETURNING id, email, name, referral_source, status, created_at
            )
            SELECT inserted.*,
                   (SELECT COUNT(*) FROM waitlist w WHERE w.id < inserted.id) + 1 AS position
            FROM inserted
            "#,
        )
        .bind(&entry.email)
        .bind(&entry.name)
        .bind(&entry.referral_source)
        .bind(WaitlistStatus::Pending.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;

        if let Some(row) = inserted {
            let position: i64 = row.get("position");
            return Ok(InsertOutcome::Created {
                entry: row_to_entry(row),
                position,
            });
        }

        // Conflict: the other row is committed once ON CONFLICT returns, and this
        // statement gets a fresh snapshot.
        let existing = sqlx::query(
            r#"
            SELECT id, email, name, referral_source, status, created_at
            FROM waitlist
            WHERE email = $1
            "#,
        )
        .bind(&entry.email)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;

        existing
            .map(|row| InsertOutcome::AlreadyExists(row_to_entry(row)))
            .ok_or_else(|| AppError::Internal("Conflicting waitlist entry not found".into()))
    }

    async fn count(&self) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM waitlist")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(row.get("count"))
    }

    async fn position_of(&self, id: i64) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS position FROM waitlist WHERE id <= $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(row.get("position"))
    }

    async fn record_contact_sync(&self, id: i64, report: &ContactSyncReport) -> AppResult<()> {
        let synced_at = (report.status == ContactSyncStatus::Success).then(Utc::now);

        sqlx::query(
            r#"
            UPDATE waitlist
            SET contact_id = COALESCE($2, contact_id),
                contact_sync_status = $3,
                contact_synced_at = COALESCE($4, contact_synced_at)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&report.contact_id)
        .bind(report.status.as_str())
        .bind(synced_at)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(())
    }
}
