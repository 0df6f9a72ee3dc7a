// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between UI and Services
// - Commands accept DTOs, return DTOs
// - Errors leave as a serialized `ErrorResponse`
// - Commands NEVER contain business logic

pub mod content_commands;
pub mod library_commands;
pub mod session_commands;

pub use content_commands::*;
pub use library_commands::*;
pub use session_commands::*;

use uuid::Uuid;

use crate::application::error_handling::ErrorResponse;

/// Ids arrive as strings from the UI
pub(crate) fn parse_id(field: &str, raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw)
        .map_err(|_| ErrorResponse::invalid_field(field, &format!("Invalid id: {}", raw)).to_json())
}
