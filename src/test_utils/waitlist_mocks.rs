//! In-memory mock implementation of `WaitlistRepo`.
//!
//! Enforces the same uniqueness rules as the `waitlist` table and can
//! simulate an exhausted pool or an unreachable database.

use std::sync::{
    Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    adapters::persistence::{DOCUMENT_UNIQUE_CONSTRAINT, EMAIL_UNIQUE_CONSTRAINT, conflict_message},
    app_error::{AppError, AppResult},
    application::use_cases::waitlist::{InsertedEntry, Pagination, WaitlistRepo},
    domain::entities::waitlist_entry::{NewWaitlistEntry, WaitlistEntry},
};

#[derive(Default)]
struct Table {
    rows: Vec<WaitlistEntry>,
    last_id: i64,
}

#[derive(Default)]
pub struct InMemoryWaitlistRepo {
    table: Mutex<Table>,
    exhausted: AtomicBool,
    unreachable: AtomicBool,
}

impl InMemoryWaitlistRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronous insert for seeding fixtures.
    pub fn seed(&self, entry: NewWaitlistEntry) -> AppResult<InsertedEntry> {
        let mut table = self.table.lock().unwrap();

        let constraint = if table.rows.iter().any(|r| {
            r.document_type == entry.document_type && r.document_number == entry.document_number
        }) {
            Some(DOCUMENT_UNIQUE_CONSTRAINT)
        } else if entry.email.is_some()
            && table.rows.iter().any(|r| r.email == entry.email)
        {
            Some(EMAIL_UNIQUE_CONSTRAINT)
        } else {
            None
        };
        if let Some(constraint) = constraint {
            return Err(AppError::Conflict(conflict_message(Some(constraint)).into()));
        }

        // Ids are never reused, like a BIGSERIAL.
        table.last_id += 1;
        let stored = WaitlistEntry::from_new(table.last_id, Utc::now(), entry);
        table.rows.push(stored.clone());
        Ok(InsertedEntry {
            entry: stored,
            position: table.rows.len() as i64,
        })
    }

    /// Snapshot of every stored row in id order.
    pub fn get_all(&self) -> Vec<WaitlistEntry> {
        self.table.lock().unwrap().rows.clone()
    }

    /// Every call fails as if no pool connection became free in time.
    pub fn set_exhausted(&self, exhausted: bool) {
        self.exhausted.store(exhausted, Ordering::SeqCst);
    }

    /// Every call fails as if the database refused connections.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    fn check_available(&self) -> AppResult<()> {
        if self.exhausted.load(Ordering::SeqCst) {
            return Err(AppError::from(sqlx::Error::PoolTimedOut));
        }
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(AppError::Database("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl WaitlistRepo for InMemoryWaitlistRepo {
    async fn insert(&self, entry: NewWaitlistEntry) -> AppResult<InsertedEntry> {
        self.check_available()?;
        self.seed(entry)
    }

    async fn list(&self, page: Pagination) -> AppResult<Vec<WaitlistEntry>> {
        self.check_available()?;
        Ok(self
            .table
            .lock()
            .unwrap()
            .rows
            .iter()
            .skip(page.skip as usize)
            .take(page.limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> AppResult<i64> {
        self.check_available()?;
        Ok(self.table.lock().unwrap().rows.len() as i64)
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<WaitlistEntry>> {
        self.check_available()?;
        Ok(self
            .table
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<bool> {
        self.check_available()?;
        let mut table = self.table.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|r| r.id != id);
        Ok(table.rows.len() < before)
    }

    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        self.check_available()?;
        Ok(self
            .table
            .lock()
            .unwrap()
            .rows
            .iter()
            .any(|r| r.email.as_deref() == Some(email)))
    }

    async fn ping(&self) -> AppResult<()> {
        self.check_available()
    }
}
