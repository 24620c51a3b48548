use axum::{Json, Router, routing::get};

use crate::{
    adapters::http::app_state::AppState,
    application::data_policy::{DATA_POLICY, DataPolicy},
};

pub fn router() -> Router<AppState> {
    Router::new().route("/data-policy", get(data_policy))
}

/// GET /api/legal/data-policy
async fn data_policy() -> Json<DataPolicy> {
    Json(DATA_POLICY)
}
