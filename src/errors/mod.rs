use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Failures raised by the account, cipher, metric and dashboard logic.
#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("Email address already exists")]
    DuplicateEmail,

    /// Ciphertext was tampered with or sealed under another key. Carries no detail on purpose.
    #[error("Unable to authenticate encrypted data")]
    Authentication,

    #[error("Invalid activity level: {0}")]
    InvalidActivityLevel(String),

    #[error("Invalid gender: {0}")]
    InvalidGender(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Sleep end must be after sleep start")]
    MalformedTimeRange,

    #[error("Unknown exercise type: {0}")]
    UnknownExercise(String),

    #[error("Stored data key is malformed")]
    InvalidKey,

    #[error("Password hashing failed")]
    CredentialHashing,
}

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Unauthorized(String),
    Forbidden(String),
    Conflict(String),
    InternalServerError(String),
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound(msg) => HttpResponse::NotFound().json(ErrorResponse { error: msg.clone() }),
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(ErrorResponse { error: msg.clone() }),
            AppError::Forbidden(msg) => HttpResponse::Forbidden().json(ErrorResponse { error: msg.clone() }),
            AppError::Conflict(msg) => HttpResponse::Conflict().json(ErrorResponse { error: msg.clone() }),
            AppError::InternalServerError(msg) => HttpResponse::InternalServerError().json(ErrorResponse { error: msg.clone() }),
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(ErrorResponse { error: msg.clone() }),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::DuplicateEmail => AppError::Conflict(err.to_string()),
            DomainError::Authentication | DomainError::InvalidKey => {
                AppError::InternalServerError("Unable to read account data".to_string())
            }
            DomainError::CredentialHashing => AppError::InternalServerError("Hashing failed".to_string()),
            DomainError::InvalidActivityLevel(_)
            | DomainError::InvalidGender(_)
            | DomainError::InvalidRole(_)
            | DomainError::MalformedTimeRange
            | DomainError::UnknownExercise(_) => AppError::BadRequest(err.to_string()),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        log::error!("Database error: {}", err);
        AppError::InternalServerError("Database error".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn duplicate_email_maps_to_conflict() {
        let err: AppError = DomainError::DuplicateEmail.into();
        assert_eq!(err.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn authentication_failure_is_generic() {
        let err: AppError = DomainError::Authentication.into();
        assert_eq!(err.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.to_string().to_lowercase().contains("key"));
        assert!(!err.to_string().to_lowercase().contains("cipher"));
    }

    #[test]
    fn validation_failures_map_to_bad_request() {
        for err in [
            DomainError::InvalidActivityLevel("Extreme".into()),
            DomainError::MalformedTimeRange,
            DomainError::UnknownExercise("Jousting".into()),
        ] {
            let app: AppError = err.into();
            assert_eq!(app.error_response().status(), StatusCode::BAD_REQUEST);
        }
    }
}
