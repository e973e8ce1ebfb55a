use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

use crate::api::errors::ApiError;

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}

/// Landing endpoint the identity provider redirects to after login
///
/// GET /login-results
pub async fn login_results() -> Json<Value> {
    Json(json!({
        "message": "Successfully Logged In"
    }))
}

/// Fallback for unknown paths
pub async fn not_found() -> ApiError {
    ApiError::not_found("resource not found")
}

/// Fallback for known paths called with an unsupported method
pub async fn method_not_allowed() -> ApiError {
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
}
