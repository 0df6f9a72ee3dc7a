// src/app/seed.rs
//
// Demo directory accounts installed on every start. The directory itself is
// not persisted, so these ids are derived from the email to stay stable and
// let a saved session find its user again.

use chrono::Utc;
use uuid::Uuid;

use crate::domain::user::{User, UserRole};
use crate::error::AppResult;
use crate::services::SessionService;

pub struct SeedAccount {
    pub name: &'static str,
    pub email: &'static str,
    pub password: &'static str,
    pub role: UserRole,
}

pub const SEED_ACCOUNTS: &[SeedAccount] = &[
    SeedAccount {
        name: "Admin User",
        email: "admin@streamflix.com",
        password: "admin123",
        role: UserRole::Admin,
    },
    SeedAccount {
        name: "Test User",
        email: "user@example.com",
        password: "password123",
        role: UserRole::User,
    },
];

pub fn account_id(email: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, format!("streamhub:user:{}", email).as_bytes())
}

impl SeedAccount {
    pub fn to_user(&self) -> User {
        User {
            id: account_id(self.email),
            name: self.name.to_string(),
            email: self.email.to_string(),
            role: self.role,
            created_at: Utc::now(),
        }
    }
}

/// Returns how many accounts were installed
pub fn seed_directory(session_service: &SessionService, accounts: &[SeedAccount]) -> AppResult<usize> {
    let mut installed = 0;
    for account in accounts {
        if session_service.seed_user(account.to_user(), account.password)? {
            installed += 1;
        }
    }
    log::info!("Seeded {} directory accounts", installed);
    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;

    #[test]
    fn test_account_ids_are_stable() {
        assert_eq!(account_id("user@example.com"), account_id("user@example.com"));
        assert_ne!(account_id("user@example.com"), account_id("admin@streamflix.com"));
    }

    #[tokio::test]
    async fn test_seeded_admin_can_log_in() {
        let fx = Fixture::new();
        assert_eq!(seed_directory(&fx.session, SEED_ACCOUNTS).unwrap(), 2);
        assert_eq!(seed_directory(&fx.session, SEED_ACCOUNTS).unwrap(), 0);

        let session = fx.session.login("admin@streamflix.com", "admin123").await.unwrap();
        assert!(session.user.is_admin());
        assert_eq!(session.user_id(), account_id("admin@streamflix.com"));
    }
}
