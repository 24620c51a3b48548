use axum::{Json, Router, extract::State, extract::rejection::JsonRejection, routing::post};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
};

#[derive(Deserialize)]
struct LoginPayload {
    username: String,
    password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    success: bool,
    message: String,
    api_key: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// POST /api/admin/login
/// Returns the shared API key the admin uses for every protected route.
async fn login(
    State(app_state): State<AppState>,
    payload: Result<Json<LoginPayload>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Json(payload) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;

    app_state
        .access_gate
        .verify_admin(&payload.username, &payload.password)?;

    tracing::info!(username = %payload.username, "Admin logged in");

    Ok(Json(LoginResponse {
        success: true,
        message: format!("Welcome {}", payload.username),
        api_key: app_state.access_gate.api_key().expose_secret().to_string(),
    }))
}
