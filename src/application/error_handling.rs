// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → user-friendly responses
// - Provides consistent error format for UI
// - Never exposes internal implementation details
// - Logs errors for debugging

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, FieldViolation};
use crate::error::AppError;

/// Standard error response for UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    /// One entry per invalid form field; empty for every other error
    #[serde(default)]
    pub violations: Vec<FieldViolation>,
}

/// Error categories for UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Invalid input (400)
    Validation,

    /// Unknown id (404)
    NotFound,

    /// Duplicate email (409)
    Conflict,

    /// Bad credentials (401)
    Unauthorized,

    /// A login was overtaken by a later session change
    Stale,

    /// Saved state could not be written or read
    Persistence,

    /// Other/unknown error (500)
    Internal,
}

impl ErrorResponse {
    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::Domain(DomainError::Validation(errors)) => Self {
                success: false,
                error_type: ErrorType::Validation,
                message: "Please correct the highlighted fields".to_string(),
                violations: errors.violations,
            },

            AppError::NotFound(what) => Self::new(ErrorType::NotFound, format!("{} not found", what)),

            AppError::Conflict(message) => Self::new(ErrorType::Conflict, message),

            AppError::Auth => Self::new(ErrorType::Unauthorized, AppError::Auth.to_string()),

            AppError::SessionSuperseded => Self::new(
                ErrorType::Stale,
                "Your session changed while signing in. Please try again.".to_string(),
            ),

            AppError::Persistence(message) => {
                log::error!("Persistence error: {}", message);
                Self::new(ErrorType::Persistence, "Saved state could not be updated".to_string())
            }

            AppError::Database(db_error) => {
                // Log full error for debugging
                log::error!("Database error: {:?}", db_error);
                Self::new(ErrorType::Persistence, "Database operation failed".to_string())
            }

            AppError::Pool(pool_error) => {
                log::error!("Connection pool error: {}", pool_error);
                Self::new(ErrorType::Persistence, "Database connection failed".to_string())
            }

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);
                Self::new(ErrorType::Internal, "Data serialization failed".to_string())
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);
                Self::new(ErrorType::Internal, "File system operation failed".to_string())
            }

            AppError::Other(message) => {
                log::error!("Other error: {}", message);
                Self::new(ErrorType::Internal, message)
            }
        }
    }

    fn new(error_type: ErrorType, message: String) -> Self {
        Self {
            success: false,
            error_type,
            message,
            violations: Vec::new(),
        }
    }

    /// Create validation error for a single field
    pub fn invalid_field(field: &str, message: &str) -> Self {
        Self {
            success: false,
            error_type: ErrorType::Validation,
            message: message.to_string(),
            violations: vec![FieldViolation::new(field, message)],
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "Internal error".to_string())
    }
}

/// Helper trait to convert Results to ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, String>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, String> {
        self.map_err(|e| ErrorResponse::from_app_error(e).to_json())
    }
}
