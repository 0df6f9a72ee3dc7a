// src/repositories/user_repository.rs
//
// The user directory

use std::sync::RwLock;

use uuid::Uuid;

use crate::domain::user::User;
use crate::error::AppResult;
use crate::repositories::poisoned;

pub trait UserRepository: Send + Sync {
    /// Replace the user with the same id, or append
    fn save(&self, user: &User) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
    /// Exact, case-sensitive match
    fn get_by_email(&self, email: &str) -> AppResult<Option<User>>;
    fn list_all(&self) -> AppResult<Vec<User>>;
    /// Returns the removed user, if any
    fn delete(&self, id: Uuid) -> AppResult<Option<User>>;
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn save(&self, user: &User) -> AppResult<()> {
        let mut users = self.users.write().map_err(poisoned)?;
        match users.iter_mut().find(|existing| existing.id == user.id) {
            Some(existing) => *existing = user.clone(),
            None => users.push(user.clone()),
        }
        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    fn list_all(&self) -> AppResult<Vec<User>> {
        Ok(self.users.read().map_err(poisoned)?.clone())
    }

    fn delete(&self, id: Uuid) -> AppResult<Option<User>> {
        let mut users = self.users.write().map_err(poisoned)?;
        Ok(users
            .iter()
            .position(|u| u.id == id)
            .map(|pos| users.remove(pos)))
    }
}
