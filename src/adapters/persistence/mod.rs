use sqlx::PgPool;

use crate::app_error::AppError;

pub mod waitlist;

#[derive(Clone)]
pub struct PostgresPersistence {
    pool: PgPool,
}

impl PostgresPersistence {
    pub fn new(pool: PgPool) -> Self {
        PostgresPersistence { pool }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            // PostgreSQL check violation: only the normalized-email constraint exists
            sqlx::Error::Database(db_err) if db_err.is_check_violation() => {
                tracing::warn!(error = %err, "Rejected by database constraint");
                AppError::InvalidInput("invalid email".into())
            }
            _ => {
                // Log the actual error for debugging, but don't expose details
                tracing::error!(error = %err, "Database error");
                AppError::StorageUnavailable("Database operation failed".into())
            }
        }
    }
}
