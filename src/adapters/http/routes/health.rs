use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::adapters::http::app_state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
    timestamp: DateTime<Utc>,
    version: &'static str,
}

/// Unguarded liveness route, mounted at the root rather than under `/api`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn health(State(app_state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let reachable = app_state.waitlist_use_cases.database_reachable().await;
    let (status_code, status, database) = if reachable {
        (StatusCode::OK, "healthy", "reachable")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", "unreachable")
    };

    (
        status_code,
        Json(HealthResponse {
            status,
            database,
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}
