use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::{
    adapters::http::{app_state::AppState, middleware::ClientIp},
    app_error::{AppError, AppResult},
    application::{
        use_cases::waitlist::{Pagination, WaitlistUseCases},
        validators::RegistrationInput,
    },
    domain::entities::waitlist_entry::WaitlistEntry,
};

/// Waitlist routes. The api_key_auth middleware is applied in mod.rs when
/// nesting this router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_entries).post(register))
        .route("/count", get(count_entries))
        .route("/check/{email}", get(check_email))
        .route("/{id}", get(get_entry).delete(delete_entry))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
struct ListQuery {
    skip: Option<i64>,
    limit: Option<i64>,
}

#[derive(Serialize)]
struct CountResponse {
    count: i64,
}

#[derive(Serialize)]
struct EmailCheckResponse {
    exists: bool,
    message: &'static str,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/waitlist
async fn register(
    State(use_cases): State<Arc<WaitlistUseCases>>,
    ClientIp(client_ip): ClientIp,
    payload: Result<Json<RegistrationInput>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let registration = use_cases.register(&input, client_ip).await?;
    Ok((StatusCode::CREATED, Json(registration)))
}

/// GET /api/waitlist?skip=&limit=
async fn list_entries(
    State(use_cases): State<Arc<WaitlistUseCases>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> AppResult<Json<Vec<WaitlistEntry>>> {
    let Query(query) = query.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let page = Pagination::new(query.skip, query.limit)?;
    Ok(Json(use_cases.list(page).await?))
}

/// GET /api/waitlist/count
async fn count_entries(
    State(use_cases): State<Arc<WaitlistUseCases>>,
) -> AppResult<Json<CountResponse>> {
    let count = use_cases.count().await?;
    Ok(Json(CountResponse { count }))
}

/// GET /api/waitlist/check/{email}
async fn check_email(
    State(use_cases): State<Arc<WaitlistUseCases>>,
    Path(email): Path<String>,
) -> AppResult<Json<EmailCheckResponse>> {
    let exists = use_cases.is_email_registered(&email).await?;
    let message = if exists {
        "This email is already on the waitlist"
    } else {
        "This email is available"
    };
    Ok(Json(EmailCheckResponse { exists, message }))
}

/// GET /api/waitlist/{id}
async fn get_entry(
    State(use_cases): State<Arc<WaitlistUseCases>>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<WaitlistEntry>> {
    let id = entry_id(id)?;
    Ok(Json(use_cases.get(id).await?))
}

/// DELETE /api/waitlist/{id}
async fn delete_entry(
    State(use_cases): State<Arc<WaitlistUseCases>>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<StatusCode> {
    let id = entry_id(id)?;
    use_cases.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn entry_id(path: Result<Path<i64>, PathRejection>) -> AppResult<i64> {
    path.map(|Path(id)| id)
        .map_err(|_| AppError::InvalidInput("Entry id must be an integer".into()))
}
