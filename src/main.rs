// ABOUTME: Main entry point for the Carelog account service
// ABOUTME: Sets up the web server, routes, and the profile/deletion/email handlers

use axum::{
    extract::State,
    http::HeaderMap,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use chrono::NaiveDate;
use regex::Regex;
use sea_orm::Set;
use serde_json::{json, Value};
use std::sync::{Arc, LazyLock};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

mod auth_helpers;
mod email;
mod entities;
mod error;
mod middleware;
mod migration;
mod session;
mod storage;
mod types;


use email::{BrevoMailer, Mailer};
use entities::user;
use error::AppError;
use session::TokenStore;
use storage::Storage;
use types::{DeleteUserRequest, ProfileResponse, TestEmailRequest, UpdateProfileRequest};

/// Shared secret gating the testing-only endpoints. Hardcoded upstream; a
/// known weakness on this staging surface.
const ADMIN_TEST_PASSWORD: &str = "testingAdmin";

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("valid name pattern"));

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Storage>,
    pub tokens: TokenStore,
    pub mailer: Arc<dyn Mailer>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carelog=info,tower_http=info".into()),
        )
        .init();

    let storage = Arc::new(Storage::new().await?);
    let tokens = TokenStore::new();
    let mailer: Arc<dyn Mailer> = Arc::new(BrevoMailer::from_env());

    let app_state = AppState {
        storage,
        tokens,
        mailer,
    };

    let app = build_router(app_state);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&bind_addr).await?;
    println!("🚀 Server running on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/profile", get(get_profile).put(update_profile))
        .route("/delete-account", delete(delete_account))
        .route("/delete-user-testing", delete(delete_user_testing))
        .route("/test-email", post(test_email))
        .layer(axum::middleware::from_fn(middleware::security_headers))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn index() -> &'static str {
    "Welcome to Carelog!"
}

async fn get_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> error::Result<Json<ProfileResponse>> {
    let user_id = auth_helpers::authenticate(&headers, &state.tokens)?;

    let user = state
        .storage
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(ProfileResponse::from(&user)))
}

async fn update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(update): Json<UpdateProfileRequest>,
) -> error::Result<Json<Value>> {
    let user_id = auth_helpers::authenticate(&headers, &state.tokens)?;

    let user = state
        .storage
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    // Every present key is validated and staged before the single UPDATE;
    // a failure anywhere leaves the stored profile untouched.
    let mut changes: user::ActiveModel = user.into();

    if let Some(first_name) = update.first_name {
        validate_name(first_name.as_deref(), "First name")?;
        changes.first_name = Set(first_name);
    }

    if let Some(last_name) = update.last_name {
        validate_name(last_name.as_deref(), "Last name")?;
        changes.last_name = Set(last_name);
    }

    if let Some(phone_number) = update.phone_number {
        changes.phone_number = Set(phone_number);
    }

    if let Some(date_of_birth) = update.date_of_birth {
        // An empty or null value is a no-op here; it does not clear the
        // stored date. Asymmetric with the other fields, kept as-is.
        if let Some(raw) = date_of_birth.filter(|value| !value.is_empty()) {
            let parsed = NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
                AppError::Validation("Invalid date format. Use YYYY-MM-DD".to_string())
            })?;
            changes.date_of_birth = Set(Some(parsed));
        }
    }

    if let Some(gender) = update.gender {
        changes.gender = Set(gender);
    }

    if let Some(medical_history) = update.medical_history {
        changes.medical_history = Set(medical_history);
    }

    if let Some(allergies) = update.allergies {
        changes.allergies = Set(allergies);
    }

    state
        .storage
        .update_user(changes)
        .await
        .map_err(|err| AppError::UpdateFailed(err.to_string()))?;

    Ok(Json(json!({ "message": "Profile updated successfully" })))
}

fn validate_name(value: Option<&str>, field: &str) -> error::Result<()> {
    match value {
        Some(name) if NAME_PATTERN.is_match(name) => Ok(()),
        _ => Err(AppError::Validation(format!(
            "{field} must contain only letters"
        ))),
    }
}

async fn delete_account(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> error::Result<Json<Value>> {
    let user_id = auth_helpers::authenticate(&headers, &state.tokens)?;

    let user = state
        .storage
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    // Captured before the row is deleted; the model is all we have afterwards.
    let deleted_id = user.id;
    let deleted_email = user.email;

    state
        .storage
        .delete_user_cascade(deleted_id, true)
        .await
        .map_err(|err| AppError::DeleteFailed {
            message: "Failed to delete account",
            detail: err.to_string(),
        })?;

    tracing::info!("Account {} deleted", deleted_id);

    Ok(Json(json!({
        "message": "Account deleted successfully",
        "deleted_user_id": deleted_id,
        "email": deleted_email,
    })))
}

async fn delete_user_testing(
    State(state): State<AppState>,
    Json(request): Json<DeleteUserRequest>,
) -> error::Result<Json<Value>> {
    let (user_id, admin_password) = match (request.user_id, request.admin_password) {
        (Some(user_id), Some(password)) if !password.is_empty() => (user_id, password),
        _ => {
            return Err(AppError::Validation(
                "user_id and admin_password are required".to_string(),
            ))
        }
    };

    // The password check precedes the lookup; a wrong password must not
    // reveal whether the user id exists.
    if admin_password != ADMIN_TEST_PASSWORD {
        return Err(AppError::Forbidden("Invalid admin password".to_string()));
    }

    let user = state
        .storage
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let deleted_id = user.id;
    let deleted_email = user.email;

    // Unlike self-service deletion, this path does not sweep the
    // additional_fields rows linked directly to the user.
    state
        .storage
        .delete_user_cascade(deleted_id, false)
        .await
        .map_err(|err| AppError::DeleteFailed {
            message: "Failed to delete user",
            detail: err.to_string(),
        })?;

    tracing::info!("User {} deleted via testing endpoint", deleted_id);

    Ok(Json(json!({
        "message": format!(
            "User {} (ID: {}) deleted successfully (TESTING MODE)",
            deleted_email, deleted_id
        ),
        "deleted_user_id": deleted_id,
        "deleted_email": deleted_email,
    })))
}

async fn test_email(
    State(state): State<AppState>,
    Json(request): Json<TestEmailRequest>,
) -> error::Result<Json<Value>> {
    let (Some(to_email), Some(subject), Some(body), Some(admin_password)) = (
        request.to_email,
        request.subject,
        request.body,
        request.admin_password,
    ) else {
        return Err(AppError::Validation(
            "All fields are required: to_email, subject, body, admin_password".to_string(),
        ));
    };

    if to_email.is_empty() || subject.is_empty() || body.is_empty() || admin_password.is_empty() {
        return Err(AppError::Validation(
            "All fields are required: to_email, subject, body, admin_password".to_string(),
        ));
    }

    if admin_password != ADMIN_TEST_PASSWORD {
        return Err(AppError::Forbidden("Invalid admin password".to_string()));
    }

    let html_content = email::render_test_email(&body);

    match state.mailer.send(&to_email, &subject, &html_content).await {
        Ok(true) => Ok(Json(json!({ "message": "Email sent successfully" }))),
        Ok(false) => Err(AppError::EmailFailed(None)),
        Err(err) => Err(AppError::EmailFailed(Some(err.to_string()))),
    }
}
