// src/application/commands/library_commands.rs
//
// Watchlist, watch history and browse Command Handlers

use crate::application::error_handling::ToErrorResponse;
use crate::application::{dto::*, state::AppState};

use super::parse_id;

// ============================================================================
// WATCHLIST
// ============================================================================

pub fn add_to_watchlist(content_id: &str, state: &AppState) -> Result<(), String> {
    let id = parse_id("contentId", content_id)?;
    state.add_to_watchlist(id).to_error_response()
}

pub fn remove_from_watchlist(content_id: &str, state: &AppState) -> Result<(), String> {
    let id = parse_id("contentId", content_id)?;
    state.remove_from_watchlist(id).to_error_response()
}

pub fn is_in_watchlist(content_id: &str, state: &AppState) -> Result<bool, String> {
    let id = parse_id("contentId", content_id)?;
    state.is_in_watchlist(id).to_error_response()
}

pub fn list_watchlist(state: &AppState) -> Result<Vec<WatchlistEntryDto>, String> {
    let entries = state.watchlist().to_error_response()?;
    Ok(entries.into_iter().map(WatchlistEntryDto::from).collect())
}

/// Watchlist page: records still in the catalog, in watchlist order
pub fn list_watchlist_content(state: &AppState) -> Result<Vec<ContentDto>, String> {
    let contents = state.watchlist_items().to_error_response()?;
    Ok(contents.into_iter().map(ContentDto::from).collect())
}

// ============================================================================
// WATCH HISTORY
// ============================================================================

/// Called by the player on every time update
pub fn record_progress(dto: RecordProgressDto, state: &AppState) -> Result<WatchHistoryEntryDto, String> {
    let id = parse_id("contentId", &dto.content_id)?;
    let entry = state.record_progress(id, dto.position).to_error_response()?;
    Ok(WatchHistoryEntryDto::from(entry))
}

pub fn list_watch_history(state: &AppState) -> Result<Vec<WatchHistoryEntryDto>, String> {
    let entries = state.watch_history().to_error_response()?;
    Ok(entries.into_iter().map(WatchHistoryEntryDto::from).collect())
}

pub fn list_continue_watching(state: &AppState) -> Result<Vec<ContinueWatchingDto>, String> {
    let rows = state.continue_watching().to_error_response()?;
    Ok(rows.into_iter().map(ContinueWatchingDto::from).collect())
}

/// Player is closing or the user navigated away
pub fn flush_pending(state: &AppState) -> Result<bool, String> {
    state.flush_pending().to_error_response()
}

// ============================================================================
// BROWSE
// ============================================================================

pub fn filter_content(dto: QueryDto, state: &AppState) -> Result<Vec<ContentDto>, String> {
    let contents = state.filter(&dto.into()).to_error_response()?;
    Ok(contents.into_iter().map(ContentDto::from).collect())
}

pub fn set_search_query(text: Option<String>, state: &AppState) -> Result<(), String> {
    state.set_search_query(text).to_error_response()
}

pub fn set_selected_genre(genre: Option<String>, state: &AppState) -> Result<(), String> {
    state.set_selected_genre(genre).to_error_response()
}

pub fn get_query(state: &AppState) -> Result<QueryDto, String> {
    Ok(QueryDto::from(state.query().to_error_response()?))
}

/// Browse page under the current query
pub fn browse(state: &AppState) -> Result<Vec<ContentDto>, String> {
    let contents = state.browse().to_error_response()?;
    Ok(contents.into_iter().map(ContentDto::from).collect())
}
