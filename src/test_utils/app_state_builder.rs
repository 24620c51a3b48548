//! Test app state builder for HTTP-level integration testing.
//!
//! This module provides `TestAppStateBuilder` which creates a minimal `AppState`
//! backed by an `InMemoryWaitlistRepo`.

use std::sync::Arc;

use axum::http::HeaderValue;
use secrecy::SecretString;

use crate::{
    adapters::http::app_state::AppState,
    application::{
        access_gate::AccessGate, use_cases::waitlist::WaitlistUseCases,
        validators::ValidationRules,
    },
    domain::entities::waitlist_entry::NewWaitlistEntry,
    infra::config::{AppConfig, PoolSettings},
    test_utils::InMemoryWaitlistRepo,
};

pub const TEST_API_KEY: &str = "test_api_key_12345678";
pub const TEST_ADMIN_USERNAME: &str = "admin";
pub const TEST_ADMIN_PASSWORD: &str = "correct-horse-battery";
pub const TEST_ALLOWED_ORIGIN: &str = "http://localhost:3000";
pub const TEST_LAUNCH_DATE: &str = "2025-02-05";

/// Builder for creating `AppState` with in-memory mocks for testing.
///
/// # Example
///
/// ```ignore
/// let (app_state, repo) = TestAppStateBuilder::new()
///     .with_entry(create_test_entry(|e| e.email = Some("maria@ejemplo.com".into())))
///     .build_with_repo();
/// ```
#[derive(Default)]
pub struct TestAppStateBuilder {
    entries: Vec<NewWaitlistEntry>,
    exhausted_pool: bool,
    unreachable_database: bool,
    trust_proxy: bool,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entry. Entries get ids in the order they are added.
    pub fn with_entry(mut self, entry: NewWaitlistEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Make every repository call time out waiting for a connection.
    pub fn with_exhausted_pool(mut self) -> Self {
        self.exhausted_pool = true;
        self
    }

    /// Make every repository call fail as if the database were down.
    pub fn with_unreachable_database(mut self) -> Self {
        self.unreachable_database = true;
        self
    }

    /// Trust X-Forwarded-For / X-Real-IP for the client address.
    pub fn with_trust_proxy(mut self) -> Self {
        self.trust_proxy = true;
        self
    }

    pub fn build(self) -> AppState {
        self.build_with_repo().0
    }

    /// Build the state and keep a handle on the repository for assertions.
    pub fn build_with_repo(self) -> (AppState, Arc<InMemoryWaitlistRepo>) {
        let repo = Arc::new(InMemoryWaitlistRepo::new());
        for entry in self.entries {
            repo.seed(entry).expect("seeded entries must be unique");
        }
        repo.set_exhausted(self.exhausted_pool);
        repo.set_unreachable(self.unreachable_database);

        let config = test_config(self.trust_proxy);
        let rules = ValidationRules::default();
        let waitlist_use_cases =
            WaitlistUseCases::new(repo.clone(), rules, config.launch_date.clone());
        let access_gate = AccessGate::new(
            SecretString::new(TEST_API_KEY.into()),
            SecretString::new(TEST_ADMIN_USERNAME.into()),
            SecretString::new(TEST_ADMIN_PASSWORD.into()),
        );

        let app_state = AppState {
            config: Arc::new(config),
            access_gate: Arc::new(access_gate),
            waitlist_use_cases: Arc::new(waitlist_use_cases),
        };
        (app_state, repo)
    }
}

fn test_config(trust_proxy: bool) -> AppConfig {
    AppConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        database_url: "postgres://localhost/waitlist_test".to_string(),
        pool: PoolSettings::default(),
        run_migrations: false,
        api_key: SecretString::new(TEST_API_KEY.into()),
        admin_username: SecretString::new(TEST_ADMIN_USERNAME.into()),
        admin_password: SecretString::new(TEST_ADMIN_PASSWORD.into()),
        allowed_origins: vec![HeaderValue::from_static(TEST_ALLOWED_ORIGIN)],
        trust_proxy,
        launch_date: TEST_LAUNCH_DATE.to_string(),
        phone_digits: 7..=15,
        log_file: None,
    }
}
