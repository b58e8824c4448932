use crate::errors::{ApiError, ServiceError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Validate request input, surfacing field level errors
pub fn validate_input<T: Validate>(input: &T) -> Result<(), ApiError> {
    input.validate().map_err(ApiError::from)
}

/// Map service errors to API errors
pub fn map_service_error(err: ServiceError) -> ApiError {
    ApiError::ServiceError(err)
}

/// 303 redirect carrying a success notice in the query string
pub fn redirect_with_notice(path: &str, notice: &str) -> Redirect {
    Redirect::to(&format!("{path}?kind=success&notice={notice}"))
}

/// 303 redirect carrying an error notice in the query string
pub fn redirect_with_error(path: &str, notice: &str) -> Redirect {
    Redirect::to(&format!("{path}?kind=error&notice={notice}"))
}

pub fn normalize_string(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

pub fn normalize_optional_string(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .and_then(|v| if v.is_empty() { None } else { Some(v) })
}

/// Parse an entity identifier from a path segment or form field.
/// A string that is not a well formed UUID can never name a stored
/// record, so it maps to NotFound rather than a validation error.
pub fn parse_identity(raw: &str, kind: &str) -> Result<Uuid, ServiceError> {
    let trimmed = raw.trim();
    Uuid::parse_str(trimmed).map_err(|_| ServiceError::NotFound(format!("{kind} {trimmed}")))
}

/// Reject a blank required form field
pub fn require_field(value: &str, field: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::ValidationError(format!("{field} is required")));
    }
    Ok(())
}

/// Parse a required integer form field
pub fn parse_required_i32(raw: Option<&str>, field: &str) -> Result<i32, ApiError> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(ApiError::ValidationError(format!("{field} is required")));
    }
    trimmed
        .parse::<i32>()
        .map_err(|_| ApiError::ValidationError(format!("{field} must be a whole number")))
}

/// Parse an optional integer form field, treating blank as absent
pub fn parse_optional_i32(raw: Option<&str>, field: &str) -> Result<Option<i32>, ApiError> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i32>()
        .map(Some)
        .map_err(|_| ApiError::ValidationError(format!("{field} must be a whole number")))
}

/// Parse an optional decimal form field, treating blank as absent
pub fn parse_optional_decimal(raw: Option<&str>, field: &str) -> Result<Option<Decimal>, ApiError> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<Decimal>()
        .map(Some)
        .map_err(|_| ApiError::ValidationError(format!("{field} must be a number")))
}

pub fn ensure_decimal_non_negative(value: &Decimal, field: &str) -> Result<(), ApiError> {
    if *value < Decimal::ZERO {
        Err(ApiError::ValidationError(format!(
            "{field} cannot be negative"
        )))
    } else {
        Ok(())
    }
}

pub fn ensure_i32_non_negative(value: i32, field: &str) -> Result<(), ApiError> {
    if value < 0 {
        Err(ApiError::ValidationError(format!(
            "{field} cannot be negative"
        )))
    } else {
        Ok(())
    }
}
