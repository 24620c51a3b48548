use axum::Json;
use axum::{
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};

use crate::app_error::{AppError, ErrorCode};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let status = status_for(code);

        // Log the error before it gets converted into a status response.
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }

        let body = match self {
            AppError::Validation(errors) => serde_json::json!({
                "code": code.as_str(),
                "message": "One or more fields are invalid",
                "errors": errors,
            }),
            AppError::InvalidInput(msg) | AppError::Conflict(msg) => {
                serde_json::json!({ "code": code.as_str(), "message": msg })
            }
            AppError::InvalidApiKey => serde_json::json!({
                "code": code.as_str(),
                "message": "Invalid or missing API key",
            }),
            AppError::InvalidCredentials => serde_json::json!({
                "code": code.as_str(),
                "message": "Invalid username or password",
            }),
            AppError::NotFound => serde_json::json!({
                "code": code.as_str(),
                "message": "Resource not found",
            }),
            AppError::ServiceUnavailable => serde_json::json!({
                "code": code.as_str(),
                "message": "Service temporarily unavailable, please retry",
            }),
            AppError::Database(_) | AppError::Internal(_) => serde_json::json!({
                "code": code.as_str(),
                "message": "Internal server error",
            }),
        };

        let mut response = (status, Json(body)).into_response();
        if code == ErrorCode::InvalidApiKey {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("ApiKey"));
        }
        response
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationError | ErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorCode::InvalidApiKey | ErrorCode::InvalidCredentials => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
