// src/application/commands/content_commands.rs
//
// Catalog Command Handlers

use crate::application::error_handling::{ErrorResponse, ToErrorResponse};
use crate::application::{dto::*, state::AppState};
use crate::domain::ContentKind;
use crate::error::AppError;

use super::parse_id;

/// List the whole catalog
pub fn list_content(state: &AppState) -> Result<Vec<ContentDto>, String> {
    let contents = state.list_content().to_error_response()?;
    Ok(contents.into_iter().map(ContentDto::from).collect())
}

/// Get a single record by id
pub fn get_content(content_id: &str, state: &AppState) -> Result<Option<ContentDto>, String> {
    let id = parse_id("id", content_id)?;
    let content = state.find_content(id).to_error_response()?;
    Ok(content.map(ContentDto::from))
}

/// Create a record (admin form). Returns the new id.
pub fn create_content(dto: CreateContentDto, state: &AppState) -> Result<String, String> {
    let draft = dto.into_draft().map_err(AppError::Domain).to_error_response()?;

    let id = state.add_content(draft).to_error_response()?;
    Ok(id.to_string())
}

/// Partially update a record (admin form)
pub fn update_content(
    content_id: &str,
    dto: UpdateContentDto,
    state: &AppState,
) -> Result<ContentDto, String> {
    let id = parse_id("id", content_id)?;
    let current = state
        .find_content(id)
        .and_then(|found| found.ok_or_else(|| AppError::not_found("Content", id)))
        .to_error_response()?;
    let patch = dto
        .into_patch(&current)
        .map_err(AppError::Domain)
        .to_error_response()?;

    let updated = state.update_content(id, patch).to_error_response()?;
    Ok(ContentDto::from(updated))
}

pub fn delete_content(content_id: &str, state: &AppState) -> Result<(), String> {
    let id = parse_id("id", content_id)?;
    state.delete_content(id).to_error_response()
}

/// "Movies" or "Shows" row
pub fn list_content_by_kind(kind: &str, state: &AppState) -> Result<Vec<ContentDto>, String> {
    let kind = kind
        .parse::<ContentKind>()
        .map_err(|e| ErrorResponse::invalid_field("type", &e).to_json())?;

    let contents = state.by_kind(kind).to_error_response()?;
    Ok(contents.into_iter().map(ContentDto::from).collect())
}

pub fn list_content_by_genre(genre: &str, state: &AppState) -> Result<Vec<ContentDto>, String> {
    let contents = state.by_genre(genre).to_error_response()?;
    Ok(contents.into_iter().map(ContentDto::from).collect())
}

/// Detail page "More like this"
pub fn list_related_content(content_id: &str, state: &AppState) -> Result<Vec<ContentDto>, String> {
    let id = parse_id("id", content_id)?;
    let contents = state.related(id).to_error_response()?;
    Ok(contents.into_iter().map(ContentDto::from).collect())
}

pub fn list_genres(state: &AppState) -> Result<Vec<String>, String> {
    state.all_genres().to_error_response()
}
