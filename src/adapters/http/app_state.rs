use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    application::{access_gate::AccessGate, use_cases::waitlist::WaitlistUseCases},
    infra::config::AppConfig,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub access_gate: Arc<AccessGate>,
    pub waitlist_use_cases: Arc<WaitlistUseCases>,
}

impl FromRef<AppState> for Arc<WaitlistUseCases> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.waitlist_use_cases.clone()
    }
}
