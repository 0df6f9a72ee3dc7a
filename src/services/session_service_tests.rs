// src/services/session_service_tests.rs
//
// Session lifecycle: signup, login, logout, directory removal, and the
// generation guard that discards logins overtaken by later session changes.

#[cfg(test)]
mod lifecycle_tests {
    use crate::error::AppError;
    use crate::test_support::Fixture;

    #[test]
    fn test_signup_opens_session() {
        let fx = Fixture::new();

        let session = fx.session.signup("Dana", "dana@example.com", "hunter22").unwrap();

        assert_eq!(session.user.email, "dana@example.com");
        assert!(!session.user.is_admin());
        assert_eq!(fx.session.current_session().unwrap(), Some(session));

        let events: Vec<String> = fx.bus.get_event_log().into_iter().map(|e| e.event_type).collect();
        assert_eq!(events, vec!["UserRegistered", "SessionOpened"]);
    }

    #[test]
    fn test_signup_reports_every_invalid_field() {
        let fx = Fixture::new();

        let err = fx.session.signup("D", "not-an-email", "123").unwrap_err();
        let fields: Vec<&str> = err
            .violations()
            .unwrap()
            .iter()
            .map(|v| v.field.as_str())
            .collect();

        assert_eq!(fields, vec!["name", "email", "password"]);
        assert!(fx.session.list_users().unwrap().is_empty());
        assert!(fx.session.current_session().unwrap().is_none());
    }

    #[test]
    fn test_duplicate_email_conflicts() {
        let fx = Fixture::new();
        fx.session.signup("Dana", "dana@example.com", "hunter22").unwrap();
        fx.session.logout().unwrap();

        let err = fx
            .session
            .signup("Other Dana", "dana@example.com", "different")
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        let matching = fx
            .session
            .list_users()
            .unwrap()
            .into_iter()
            .filter(|u| u.email == "dana@example.com")
            .count();
        assert_eq!(matching, 1);
        assert!(fx.session.current_session().unwrap().is_none());
    }

    #[test]
    fn test_password_is_never_stored_in_plain() {
        use crate::repositories::CredentialRepository;

        let fx = Fixture::new();
        fx.session.signup("Dana", "dana@example.com", "hunter22").unwrap();

        let stored = fx.credentials.get("dana@example.com").unwrap().unwrap();
        assert_ne!(stored, "hunter22");
        assert_eq!(stored.len(), 64);
    }

    #[tokio::test]
    async fn test_login_with_correct_credentials() {
        let fx = Fixture::new();
        let created = fx.session.signup("Dana", "dana@example.com", "hunter22").unwrap();
        fx.session.logout().unwrap();

        let session = fx.session.login("dana@example.com", "hunter22").await.unwrap();

        assert_eq!(session.user, created.user);
        assert_eq!(fx.session.current_session().unwrap(), Some(session));
    }

    #[tokio::test]
    async fn test_wrong_password_leaves_session_unchanged() {
        let fx = Fixture::new();
        let active = fx.session.signup("Dana", "dana@example.com", "hunter22").unwrap();
        fx.bus.clear_event_log();

        let err = fx.session.login("dana@example.com", "wrong-pass").await.unwrap_err();
        assert!(matches!(err, AppError::Auth));

        let unknown = fx.session.login("ghost@example.com", "hunter22").await.unwrap_err();
        assert_eq!(unknown.to_string(), err.to_string());

        assert_eq!(fx.session.current_session().unwrap(), Some(active));
        assert!(fx.bus.get_event_log().is_empty());
    }

    #[test]
    fn test_logout_is_idempotent() {
        let fx = Fixture::new();
        fx.session.signup("Dana", "dana@example.com", "hunter22").unwrap();
        fx.bus.clear_event_log();

        fx.session.logout().unwrap();
        fx.session.logout().unwrap();

        assert!(fx.session.current_session().unwrap().is_none());
        assert_eq!(fx.bus.get_event_log().len(), 1);
    }

    #[test]
    fn test_every_session_change_advances_generation() {
        let fx = Fixture::new();
        let g0 = fx.session.generation().unwrap();

        fx.session.signup("Dana", "dana@example.com", "hunter22").unwrap();
        let g1 = fx.session.generation().unwrap();
        fx.session.logout().unwrap();
        let g2 = fx.session.generation().unwrap();

        assert!(g0 < g1 && g1 < g2);
    }

    #[test]
    fn test_remove_user_clears_their_session() {
        let fx = Fixture::new();
        let session = fx.session.signup("Dana", "dana@example.com", "hunter22").unwrap();
        fx.bus.clear_event_log();

        fx.session.remove_user(session.user_id()).unwrap();
        fx.session.remove_user(session.user_id()).unwrap();

        assert!(fx.session.current_session().unwrap().is_none());
        assert!(fx.session.list_users().unwrap().is_empty());

        let events: Vec<String> = fx.bus.get_event_log().into_iter().map(|e| e.event_type).collect();
        assert_eq!(events, vec!["UserRemoved", "SessionClosed"]);
    }

    #[tokio::test]
    async fn test_removed_user_cannot_log_in() {
        let fx = Fixture::new();
        let session = fx.session.signup("Dana", "dana@example.com", "hunter22").unwrap();
        fx.session.remove_user(session.user_id()).unwrap();

        let err = fx.session.login("dana@example.com", "hunter22").await.unwrap_err();
        assert!(matches!(err, AppError::Auth));
    }

    #[tokio::test]
    async fn test_seeded_account_can_log_in() {
        use crate::domain::{User, UserRole};

        let fx = Fixture::new();
        let admin = User::with_role("Admin".into(), "admin@example.com".into(), UserRole::Admin);

        assert!(fx.session.seed_user(admin.clone(), "admin123").unwrap());
        assert!(!fx.session.seed_user(admin.clone(), "other").unwrap());

        let session = fx.session.login("admin@example.com", "admin123").await.unwrap();
        assert!(session.user.is_admin());
        assert_eq!(fx.session.list_users().unwrap(), vec![admin]);
    }
}

#[cfg(test)]
mod stale_login_tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use tokio::sync::{oneshot, Notify};

    use crate::domain::User;
    use crate::error::{AppError, AppResult};
    use crate::events::EventBus;
    use crate::repositories::{InMemoryCredentialRepository, InMemoryUserRepository};
    use crate::services::credentials::{CredentialVerifier, MockCredentialVerifier};
    use crate::services::{CommitGate, SessionService};

    /// Holds every verification until the test releases it
    struct GatedVerifier {
        entered: Notify,
        gate: Mutex<Option<oneshot::Receiver<Option<User>>>>,
    }

    impl GatedVerifier {
        fn new() -> (Arc<Self>, oneshot::Sender<Option<User>>) {
            let (tx, rx) = oneshot::channel();
            let verifier = Arc::new(Self {
                entered: Notify::new(),
                gate: Mutex::new(Some(rx)),
            });
            (verifier, tx)
        }
    }

    #[async_trait]
    impl CredentialVerifier for GatedVerifier {
        async fn verify(&self, _email: &str, _password: &str) -> AppResult<Option<User>> {
            let gate = self.gate.lock().unwrap().take();
            self.entered.notify_one();
            match gate {
                Some(rx) => Ok(rx.await.unwrap_or(None)),
                None => Ok(None),
            }
        }
    }

    fn service_with(verifier: Arc<dyn CredentialVerifier>) -> Arc<SessionService> {
        Arc::new(SessionService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryCredentialRepository::new()),
            verifier,
            Arc::new(CommitGate::new()),
            Arc::new(EventBus::new()),
        ))
    }

    fn someone() -> User {
        User::new("Dana".to_string(), "dana@example.com".to_string())
    }

    #[tokio::test]
    async fn test_login_resolving_after_logout_is_discarded() {
        let (verifier, release) = GatedVerifier::new();
        let service = service_with(verifier.clone());

        let pending = {
            let service = service.clone();
            tokio::spawn(async move { service.login("dana@example.com", "hunter22").await })
        };

        verifier.entered.notified().await;
        service.logout().unwrap();
        release.send(Some(someone())).unwrap();

        let result = pending.await.unwrap();
        assert!(matches!(result, Err(AppError::SessionSuperseded)));
        assert!(service.current_session().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_resolving_after_signup_is_discarded() {
        let (verifier, release) = GatedVerifier::new();
        let service = service_with(verifier.clone());

        let pending = {
            let service = service.clone();
            tokio::spawn(async move { service.login("dana@example.com", "hunter22").await })
        };

        verifier.entered.notified().await;
        let fresh = service.signup("Robin", "robin@example.com", "secret99").unwrap();
        release.send(Some(someone())).unwrap();

        assert!(matches!(pending.await.unwrap(), Err(AppError::SessionSuperseded)));
        assert_eq!(service.current_session().unwrap(), Some(fresh));
    }

    #[tokio::test]
    async fn test_uncontested_gated_login_commits() {
        let (verifier, release) = GatedVerifier::new();
        let service = service_with(verifier.clone());
        let user = someone();

        let pending = {
            let service = service.clone();
            tokio::spawn(async move { service.login("dana@example.com", "hunter22").await })
        };

        verifier.entered.notified().await;
        release.send(Some(user.clone())).unwrap();

        let session = pending.await.unwrap().unwrap();
        assert_eq!(session.user, user);
    }

    #[tokio::test]
    async fn test_verifier_failure_propagates_without_mutating() {
        let mut mock = MockCredentialVerifier::new();
        mock.expect_verify()
            .times(1)
            .returning(|_, _| Err(AppError::Other("backend unreachable".to_string())));

        let service = service_with(Arc::new(mock));
        let err = service.login("dana@example.com", "hunter22").await.unwrap_err();

        assert!(matches!(err, AppError::Other(_)));
        assert!(service.current_session().unwrap().is_none());
    }
}
