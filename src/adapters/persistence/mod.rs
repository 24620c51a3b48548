use sqlx::PgPool;

use crate::app_error::AppError;

pub mod waitlist;

pub const DOCUMENT_UNIQUE_CONSTRAINT: &str = "waitlist_document_key";
pub const EMAIL_UNIQUE_CONSTRAINT: &str = "waitlist_email_key";
/// Width of the `waitlist.phone_number VARCHAR(15)` column.
pub const PHONE_NUMBER_COLUMN_WIDTH: usize = 15;

#[derive(Clone)]
pub struct PostgresPersistence {
    pool: PgPool,
}

impl PostgresPersistence {
    pub fn new(pool: PgPool) -> Self {
        PostgresPersistence { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Message returned to clients when a unique constraint rejects an insert.
pub fn conflict_message(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(DOCUMENT_UNIQUE_CONSTRAINT) => "This document number is already on the waitlist",
        Some(EMAIL_UNIQUE_CONSTRAINT) => "This email address is already on the waitlist",
        _ => "A registration with these details already exists",
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::NotFound,
            sqlx::Error::PoolTimedOut => {
                tracing::warn!("Timed out waiting for a database connection");
                AppError::ServiceUnavailable
            }
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(conflict_message(db_err.constraint()).into())
            }
            _ => {
                // Log the actual error for debugging, but don't expose details
                tracing::error!(error = ?err, "Database error");
                AppError::Database("Database operation failed".into())
            }
        }
    }
}
