// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file declares all domain modules and re-exports their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod content;
pub mod history;
pub mod user;
pub mod watchlist;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Content Domain
pub use content::{
    validate_content, validate_content_draft, ContentDraft, ContentId, ContentItem, ContentKind,
    ContentPatch,
};

// User / Session Domain
pub use user::{validate_credentials, validate_login, Session, User, UserRole};

// Watchlist Domain
pub use watchlist::WatchlistEntry;

// Watch History Domain
pub use history::{validate_position, WatchHistoryEntry};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single violated rule on a named input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Every violation found while validating one input.
/// Validators collect all of them instead of stopping at the first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.violations.push(FieldViolation::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Names of the violated fields, in the order they were checked
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// Append whatever another validation run reported
    pub fn merge(&mut self, result: DomainResult<()>) {
        if let Err(DomainError::Validation(other)) = result {
            self.violations.extend(other.violations);
        }
    }

    /// Ok when nothing was collected
    pub fn into_result(self) -> DomainResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self))
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .violations
            .iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
