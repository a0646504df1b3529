use std::borrow::Cow;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::shared::types::ApiResponse;

/// PostgreSQL unique_violation
const PG_UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL foreign_key_violation
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// One `"field: message"` entry per failed rule
    #[error("Validation error: {}", .0.join("; "))]
    InvalidFields(Vec<String>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl AppError {
    /// Map constraint violations to the outcomes callers expect.
    ///
    /// Unique violations become `Conflict(conflict_message)`, foreign key
    /// violations become `BadRequest`, everything else stays a database error.
    pub fn from_db(e: sqlx::Error, conflict_message: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.code() == Some(Cow::Borrowed(PG_UNIQUE_VIOLATION)) {
                return AppError::Conflict(conflict_message.to_string());
            }
            if db_err.code() == Some(Cow::Borrowed(PG_FOREIGN_KEY_VIOLATION)) {
                return AppError::BadRequest("Referenced record does not exist".to_string());
            }
        }

        AppError::Database(e)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages = Vec::new();
        flatten_validation_errors("", &errors, &mut messages);
        messages.sort();
        AppError::InvalidFields(messages)
    }
}

/// Nested fields are reported as `ingredients[0].quantity`
fn flatten_validation_errors(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    out.push(format!("{}: {}", path, message));
                }
            }
            ValidationErrorsKind::Struct(inner) => flatten_validation_errors(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    flatten_validation_errors(&format!("{}[{}]", path, index), inner, out);
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                    None,
                )
            }
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Validation(ref msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
            ),
            AppError::InvalidFields(ref fields) => (
                StatusCode::BAD_REQUEST,
                "Validation failed".to_string(),
                Some(fields.clone()),
            ),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::Auth(ref msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
            AppError::Unauthorized(ref msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
            AppError::Forbidden(ref msg) => (StatusCode::FORBIDDEN, msg.clone(), None),
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, msg.clone(), None),
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT),
            (AppError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (AppError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[derive(Validate)]
    struct Line {
        #[validate(range(min = 0.0, message = "Quantity must not be negative"))]
        quantity: f64,
    }

    #[derive(Validate)]
    struct Dish {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[validate(range(min = 1))]
        servings: i32,
        #[validate(nested)]
        lines: Vec<Line>,
    }

    #[test]
    fn test_validation_errors_are_flattened_per_field() {
        let dish = Dish {
            name: String::new(),
            servings: -2,
            lines: vec![Line { quantity: 1.0 }, Line { quantity: -1.0 }],
        };

        let error = AppError::from(dish.validate().unwrap_err());
        let AppError::InvalidFields(fields) = &error else {
            panic!("expected field errors, got {:?}", error);
        };
        assert_eq!(
            fields,
            &vec![
                "lines[1].quantity: Quantity must not be negative".to_string(),
                "name: Name is required".to_string(),
                "servings: range".to_string(),
            ]
        );
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_from_db_passes_through_non_constraint_errors() {
        let error = AppError::from_db(sqlx::Error::RowNotFound, "duplicate");
        assert!(matches!(error, AppError::Database(_)));
    }
}
