// src/error/types.rs
use crate::domain::{DomainError, FieldViolation};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Deliberately silent about which half of the credential was wrong
    #[error("Invalid email or password")]
    Auth,

    #[error("Session changed while the request was in flight")]
    SessionSuperseded,

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    pub fn not_found(what: &str, id: impl std::fmt::Display) -> Self {
        AppError::NotFound(format!("{} {}", what, id))
    }

    /// Field violations carried by a validation failure, if this is one
    pub fn violations(&self) -> Option<&[FieldViolation]> {
        match self {
            AppError::Domain(DomainError::Validation(errors)) => Some(&errors.violations),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.violations().is_some()
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::Other(format!("UUID error: {}", err))
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::Other(format!("Date parse error: {}", err))
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValidationErrors;

    #[test]
    fn test_validation_exposes_violations() {
        let mut errors = ValidationErrors::new();
        errors.push("title", "Title is required");
        let err = AppError::from(DomainError::Validation(errors));

        assert!(err.is_validation());
        assert_eq!(err.violations().map(|v| v.len()), Some(1));
        assert!(AppError::Auth.violations().is_none());
    }

    #[test]
    fn test_auth_message_is_generic() {
        assert_eq!(AppError::Auth.to_string(), "Invalid email or password");
    }
}
