// src/repositories/credential_repository.rs
//
// Email -> credential digest. Kept apart from `User` so a secret can never
// ride along with a directory record.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::AppResult;
use crate::repositories::poisoned;

pub trait CredentialRepository: Send + Sync {
    fn set(&self, email: &str, digest: &str) -> AppResult<()>;
    fn get(&self, email: &str) -> AppResult<Option<String>>;
    fn remove(&self, email: &str) -> AppResult<()>;
}

#[derive(Default)]
pub struct InMemoryCredentialRepository {
    digests: RwLock<HashMap<String, String>>,
}

impl InMemoryCredentialRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialRepository for InMemoryCredentialRepository {
    fn set(&self, email: &str, digest: &str) -> AppResult<()> {
        self.digests
            .write()
            .map_err(poisoned)?
            .insert(email.to_string(), digest.to_string());
        Ok(())
    }

    fn get(&self, email: &str) -> AppResult<Option<String>> {
        Ok(self.digests.read().map_err(poisoned)?.get(email).cloned())
    }

    fn remove(&self, email: &str) -> AppResult<()> {
        self.digests.write().map_err(poisoned)?.remove(email);
        Ok(())
    }
}
