// src/services/credentials.rs
//
// Credential checking seam. The in-process directory is one implementation;
// a remote identity backend can stand in without touching the session service.

use std::sync::Arc;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::domain::User;
use crate::error::AppResult;
use crate::repositories::{CredentialRepository, UserRepository};

/// Resolves an email/password pair to a directory user.
/// `Ok(None)` means the pair did not match; callers must not learn which half was wrong.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, email: &str, password: &str) -> AppResult<Option<User>>;
}

/// SHA-256 of the password, salted with the account email
pub fn digest_password(email: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.as_bytes());
    hasher.update([0u8]);
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Checks against the local user directory and credential map
pub struct DirectoryVerifier {
    user_repo: Arc<dyn UserRepository>,
    credential_repo: Arc<dyn CredentialRepository>,
}

impl DirectoryVerifier {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        credential_repo: Arc<dyn CredentialRepository>,
    ) -> Self {
        Self {
            user_repo,
            credential_repo,
        }
    }
}

#[async_trait]
impl CredentialVerifier for DirectoryVerifier {
    async fn verify(&self, email: &str, password: &str) -> AppResult<Option<User>> {
        let Some(user) = self.user_repo.get_by_email(email)? else {
            return Ok(None);
        };

        let matches = self
            .credential_repo
            .get(email)?
            .map(|stored| stored == digest_password(email, password))
            .unwrap_or(false);

        Ok(matches.then_some(user))
    }
}
