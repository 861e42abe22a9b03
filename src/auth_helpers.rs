// ABOUTME: Authentication helper functions for bearer token validation in endpoints
// ABOUTME: Extracts the Authorization header and resolves it to a caller user id

use axum::http::{header, HeaderMap};

use crate::error::{AppError, Result};
use crate::session::TokenStore;

pub fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Authorization header must use the Bearer scheme".to_string()))
}

pub fn authenticate(headers: &HeaderMap, tokens: &TokenStore) -> Result<i32> {
    let token = bearer_token(headers)?;

    tokens
        .verify(token)
        .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".to_string()))
}
