use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    app_error::{AppError, AppResult},
    application::validators::{
        RegistrationInput, ValidationRules, normalize_email, validate_registration,
    },
    domain::entities::waitlist_entry::{NewWaitlistEntry, WaitlistEntry},
};

pub const DEFAULT_PAGE_SIZE: i64 = 100;
pub const MAX_PAGE_SIZE: i64 = 1000;

// ============================================================================
// Repository Trait
// ============================================================================

#[async_trait]
pub trait WaitlistRepo: Send + Sync {
    /// Stores a new entry and reports its place in line as part of the same
    /// operation. Fails with `Conflict` when the document or email is already
    /// registered.
    async fn insert(&self, entry: NewWaitlistEntry) -> AppResult<InsertedEntry>;

    /// Entries ordered by id ascending.
    async fn list(&self, page: Pagination) -> AppResult<Vec<WaitlistEntry>>;

    async fn count(&self) -> AppResult<i64>;

    async fn get_by_id(&self, id: i64) -> AppResult<Option<WaitlistEntry>>;

    /// Returns false when no row had this id.
    async fn delete_by_id(&self, id: i64) -> AppResult<bool>;

    async fn email_exists(&self, email: &str) -> AppResult<bool>;

    async fn ping(&self) -> AppResult<()>;
}

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub skip: i64,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(skip: Option<i64>, limit: Option<i64>) -> AppResult<Self> {
        let skip = skip.unwrap_or(0);
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE);
        if skip < 0 {
            return Err(AppError::InvalidInput("skip must not be negative".into()));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(AppError::InvalidInput(format!(
                "limit must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        Ok(Self { skip, limit })
    }
}

/// A freshly stored entry and the number of entries registered at or
/// before it.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertedEntry {
    pub entry: WaitlistEntry,
    pub position: i64,
}

/// Result of a successful signup.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    #[serde(flatten)]
    pub entry: WaitlistEntry,
    pub position: i64,
    pub message: String,
}

// ============================================================================
// Use Cases
// ============================================================================

#[derive(Clone)]
pub struct WaitlistUseCases {
    repo: Arc<dyn WaitlistRepo>,
    rules: ValidationRules,
    launch_date: String,
}

impl WaitlistUseCases {
    pub fn new(repo: Arc<dyn WaitlistRepo>, rules: ValidationRules, launch_date: String) -> Self {
        Self {
            repo,
            rules,
            launch_date,
        }
    }

    /// Validates and stores a signup. Nothing is written when validation
    /// fails.
    #[instrument(skip(self, input))]
    pub async fn register(
        &self,
        input: &RegistrationInput,
        client_ip: Option<String>,
    ) -> AppResult<Registration> {
        let entry = NewWaitlistEntry {
            registration_ip: client_ip,
            ..validate_registration(input, &self.rules)?
        };

        let InsertedEntry { entry, position } = self.repo.insert(entry).await?;

        info!(
            entry_id = entry.id,
            document_type = %entry.document_type,
            position,
            "Waitlist registration stored"
        );

        let greeting = match &entry.first_name {
            Some(name) => format!("Welcome {name}! "),
            None => "Welcome! ".to_string(),
        };
        let message = format!(
            "{greeting}You are number {position} on the waitlist. We will contact you when we launch on {}.",
            self.launch_date
        );

        Ok(Registration {
            entry,
            position,
            message,
        })
    }

    pub async fn list(&self, page: Pagination) -> AppResult<Vec<WaitlistEntry>> {
        self.repo.list(page).await
    }

    pub async fn count(&self) -> AppResult<i64> {
        self.repo.count().await
    }

    pub async fn get(&self, id: i64) -> AppResult<WaitlistEntry> {
        self.repo.get_by_id(id).await?.ok_or(AppError::NotFound)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repo.delete_by_id(id).await? {
            return Err(AppError::NotFound);
        }
        info!(entry_id = id, "Waitlist entry deleted");
        Ok(())
    }

    pub async fn is_email_registered(&self, email: &str) -> AppResult<bool> {
        self.repo.email_exists(&normalize_email(email)).await
    }

    pub async fn database_reachable(&self) -> bool {
        match self.repo.ping().await {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "Database ping failed");
                false
            }
        }
    }
}
