// ABOUTME: Centralized error handling system with per-class status mapping and logging
// ABOUTME: Rollback and collaborator failures carry the original error text for diagnostics

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Database(sea_orm::DbErr),
    Unauthorized(String),
    NotFound(String),
    Validation(String),
    Forbidden(String),
    UpdateFailed(String),
    DeleteFailed { message: &'static str, detail: String },
    EmailFailed(Option<String>),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Database(err) => write!(f, "Database error: {}", err),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::UpdateFailed(detail) => write!(f, "Update failed: {}", detail),
            AppError::DeleteFailed { message, detail } => write!(f, "{}: {}", message, detail),
            AppError::EmailFailed(Some(detail)) => write!(f, "Email send failed: {}", detail),
            AppError::EmailFailed(None) => write!(f, "Email send failed"),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Database(err) => {
                tracing::error!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Database operation failed", "error": err.to_string() }),
                )
            }
            AppError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized access: {}", msg);
                (StatusCode::UNAUTHORIZED, json!({ "message": msg }))
            }
            AppError::NotFound(msg) => {
                tracing::info!("Resource not found: {}", msg);
                (StatusCode::NOT_FOUND, json!({ "message": msg }))
            }
            AppError::Validation(msg) => {
                tracing::warn!("Validation error: {}", msg);
                (StatusCode::BAD_REQUEST, json!({ "message": msg }))
            }
            AppError::Forbidden(msg) => {
                tracing::warn!("Forbidden: {}", msg);
                (StatusCode::FORBIDDEN, json!({ "message": msg }))
            }
            AppError::UpdateFailed(detail) => {
                tracing::error!("Update failed: {}", detail);
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "message": "Update failed", "error": detail }),
                )
            }
            AppError::DeleteFailed { message, detail } => {
                tracing::error!("{}: {}", message, detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": message, "error": detail }),
                )
            }
            AppError::EmailFailed(detail) => {
                tracing::error!("Email send failed: {}", detail.as_deref().unwrap_or("provider rejected the message"));
                let body = match detail {
                    Some(detail) => json!({ "message": "Failed to send email", "error": detail }),
                    None => json!({ "message": "Failed to send email" }),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::Database(err)
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
