pub mod admin;
pub mod health;
pub mod legal;
pub mod waitlist;

use axum::{Router, middleware};

use crate::adapters::http::{app_state::AppState, middleware::api_key_auth};

/// Routes served under `/api`. Everything except the admin login requires
/// the API key header.
pub fn router(app_state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .nest("/waitlist", waitlist::router())
        .nest("/legal", legal::router())
        .route_layer(middleware::from_fn_with_state(app_state, api_key_auth));

    Router::new().nest("/admin", admin::router()).merge(protected)
}
