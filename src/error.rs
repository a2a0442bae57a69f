//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every failure a resolver can surface (duplicate registration, bad credentials,
//! ownership violations, persistence failures) is a distinct variant with a stable
//! machine-readable code, so callers never have to match on message text.
//!
//! `AppError` implements `actix_web::error::ResponseError` for failures raised at the
//! HTTP layer (e.g. a rejected bearer token), and is turned into GraphQL errors with
//! an `extensions.code` entry by the `graphql` module.
//! `From` implementations for `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error` and `bcrypt::BcryptError` allow the `?` operator.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug, Error)]
pub enum AppError {
    /// The operation needs an authenticated caller and none was supplied.
    #[error("authentication required")]
    Unauthenticated,
    /// A user with the same email is already registered.
    #[error("user is already registered")]
    DuplicateUser,
    /// No user exists for the supplied email.
    #[error("user does not exist")]
    UserNotFound,
    /// The password does not match the stored hash.
    #[error("incorrect password")]
    InvalidCredentials,
    /// The referenced project or task does not exist. Carries the entity name.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// The caller is not the creator of the entity it tries to modify.
    #[error("you do not have permission to edit this resource")]
    Forbidden,
    /// Input failed validation.
    #[error("validation failed: {0}")]
    Validation(String),
    /// A bearer token was supplied but could not be verified.
    #[error("invalid token: {0}")]
    InvalidToken(String),
    /// The persistence layer failed.
    #[error("persistence failure: {0}")]
    Persistence(String),
    /// Process configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Unexpected server-side error (hashing, signing, task join failures).
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthenticated => "UNAUTHENTICATED",
            AppError::DuplicateUser => "DUPLICATE_USER",
            AppError::UserNotFound => "USER_NOT_FOUND",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Forbidden => "FORBIDDEN",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::InvalidToken(_) => "INVALID_TOKEN",
            AppError::Persistence(_) => "PERSISTENCE_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show to API clients.
    ///
    /// Server-side failures are reduced to a generic message; the details are
    /// expected to have been logged where the error was raised.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Persistence(_) | AppError::Configuration(_) | AppError::Internal(_) => {
                "internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated
            | AppError::InvalidToken(_)
            | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) | AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::DuplicateUser => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Persistence(_) | AppError::Configuration(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.public_message(),
            "code": self.code()
        }))
    }
}

/// Converts `sqlx::Error` into `AppError::Persistence`.
///
/// Unique-constraint violations only occur on the users email index, so they are
/// reported as `DuplicateUser`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match &error {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::DuplicateUser,
            _ => AppError::Persistence(error.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(error: sqlx::migrate::MigrateError) -> AppError {
        AppError::Persistence(format!("migration failed: {}", error))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

/// JWT processing failures (malformed, bad signature, expired) all mean the
/// caller presented an unusable token.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::InvalidToken(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(format!("password hashing failed: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_responses() {
        let error = AppError::InvalidToken("expired".into());
        assert_eq!(error.error_response().status(), 401);

        let error = AppError::Forbidden;
        assert_eq!(error.error_response().status(), 403);

        let error = AppError::NotFound("project");
        assert_eq!(error.error_response().status(), 404);

        let error = AppError::DuplicateUser;
        assert_eq!(error.error_response().status(), 409);

        let error = AppError::Validation("email".into());
        assert_eq!(error.error_response().status(), 422);

        let error = AppError::Persistence("connection reset".into());
        assert_eq!(error.error_response().status(), 500);
    }

    #[test]
    fn test_server_errors_hide_details() {
        let error = AppError::Persistence("connection refused at 10.0.0.3".into());
        assert_eq!(error.public_message(), "internal server error");
        assert_eq!(error.code(), "PERSISTENCE_ERROR");

        let error = AppError::NotFound("task");
        assert_eq!(error.public_message(), "task not found");
    }
}
