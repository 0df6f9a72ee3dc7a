// src/application/commands/session_commands.rs
//
// Auth Command Handlers

use crate::application::error_handling::{ErrorResponse, ToErrorResponse};
use crate::application::{dto::*, state::AppState};
use crate::domain::validate_login;
use crate::error::AppError;

use super::parse_id;

pub fn signup(dto: SignupDto, state: &AppState) -> Result<SessionDto, String> {
    let session = state
        .signup(&dto.name, &dto.email, &dto.password)
        .to_error_response()?;
    Ok(SessionDto::from(session))
}

/// Form shape is checked here; a well-formed pair that does not match any
/// account comes back as `unauthorized`
pub async fn login(dto: LoginDto, state: &AppState) -> Result<SessionDto, String> {
    validate_login(&dto.email, &dto.password)
        .map_err(|e| ErrorResponse::from_app_error(AppError::Domain(e)).to_json())?;

    let session = state
        .login(&dto.email, &dto.password)
        .await
        .to_error_response()?;
    Ok(SessionDto::from(session))
}

pub fn logout(state: &AppState) -> Result<(), String> {
    state.logout().to_error_response()
}

pub fn get_current_session(state: &AppState) -> Result<Option<SessionDto>, String> {
    let session = state.current_session().to_error_response()?;
    Ok(session.map(SessionDto::from))
}

/// Admin user list
pub fn list_users(state: &AppState) -> Result<Vec<UserDto>, String> {
    let users = state.list_users().to_error_response()?;
    Ok(users.into_iter().map(UserDto::from).collect())
}

pub fn delete_user(user_id: &str, state: &AppState) -> Result<(), String> {
    let id = parse_id("id", user_id)?;
    state.remove_user(id).to_error_response()
}
