// src/services/session_service.rs
//
// Owns the user directory and the single active session.
//
// Every session-affecting operation advances `generation`. An asynchronous
// login remembers the generation it started under and commits only if
// nothing else moved it in the meantime.

use std::sync::{Arc, RwLock};

use uuid::Uuid;

use super::commit_gate::CommitGate;
use super::credentials::{digest_password, CredentialVerifier};
use crate::domain::user::{validate_credentials, Session, User};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, SessionClosed, SessionOpened, UserRegistered, UserRemoved};
use crate::repositories::{poisoned, CredentialRepository, UserRepository};

#[derive(Debug, Default)]
struct SessionState {
    current: Option<Session>,
    generation: u64,
}

pub struct SessionService {
    user_repo: Arc<dyn UserRepository>,
    credential_repo: Arc<dyn CredentialRepository>,
    verifier: Arc<dyn CredentialVerifier>,
    state: RwLock<SessionState>,
    gate: Arc<CommitGate>,
    event_bus: Arc<EventBus>,
}

impl SessionService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        credential_repo: Arc<dyn CredentialRepository>,
        verifier: Arc<dyn CredentialVerifier>,
        gate: Arc<CommitGate>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            user_repo,
            credential_repo,
            verifier,
            state: RwLock::new(SessionState::default()),
            gate,
            event_bus,
        }
    }

    /// Creates a `user`-role account and logs it in
    pub fn signup(&self, name: &str, email: &str, password: &str) -> AppResult<Session> {
        validate_credentials(name, email, password).map_err(AppError::Domain)?;

        if self.user_repo.get_by_email(email)?.is_some() {
            return Err(AppError::Conflict(format!(
                "An account with email {} already exists",
                email
            )));
        }

        let user = User::new(name.trim().to_string(), email.to_string());
        self.credential_repo
            .set(email, &digest_password(email, password))?;
        self.user_repo.save(&user)?;

        let session = Session::new(user.clone());
        let generation = self.open(session.clone())?;

        log::info!("User {} signed up", user.id);
        self.event_bus
            .emit(UserRegistered::new(user.id, user.email.clone()));
        self.event_bus.emit(SessionOpened::new(user.id, generation));

        Ok(session)
    }

    /// Checks the credentials through the verifier. If a logout, signup or
    /// another login lands while the check is pending, the result is discarded.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Session> {
        let ticket = {
            let mut state = self.state.write().map_err(poisoned)?;
            state.generation += 1;
            state.generation
        };

        let verdict = self.verifier.verify(email, password).await;

        let session = {
            let _commit = self.gate.commit()?;
            let mut state = self.state.write().map_err(poisoned)?;
            if state.generation != ticket {
                log::warn!(
                    "Discarding login result for generation {} (now {})",
                    ticket,
                    state.generation
                );
                return Err(AppError::SessionSuperseded);
            }

            let user = verdict?.ok_or(AppError::Auth)?;
            let session = Session::new(user);
            state.current = Some(session.clone());
            session
        };

        log::info!("User {} logged in", session.user_id());
        self.event_bus
            .emit(SessionOpened::new(session.user_id(), ticket));

        Ok(session)
    }

    /// Idempotent. Also invalidates any login still in flight.
    pub fn logout(&self) -> AppResult<()> {
        let closed = {
            let _commit = self.gate.commit()?;
            let mut state = self.state.write().map_err(poisoned)?;
            state.generation += 1;
            state.current.take()
        };

        if let Some(session) = closed {
            log::info!("User {} logged out", session.user_id());
            self.event_bus.emit(SessionClosed::new(session.user_id()));
        }
        Ok(())
    }

    pub fn current_session(&self) -> AppResult<Option<Session>> {
        Ok(self.state.read().map_err(poisoned)?.current.clone())
    }

    pub fn generation(&self) -> AppResult<u64> {
        Ok(self.state.read().map_err(poisoned)?.generation)
    }

    pub fn list_users(&self) -> AppResult<Vec<User>> {
        self.user_repo.list_all()
    }

    /// Removes a directory entry and its credential. Watchlist and history are untouched.
    pub fn remove_user(&self, user_id: Uuid) -> AppResult<()> {
        let Some(user) = self.user_repo.delete(user_id)? else {
            return Ok(());
        };
        self.credential_repo.remove(&user.email)?;

        let closed = {
            let _commit = self.gate.commit()?;
            let mut state = self.state.write().map_err(poisoned)?;
            let owned = state
                .current
                .as_ref()
                .map_or(false, |s| s.user_id() == user_id);
            if owned {
                state.generation += 1;
                state.current.take()
            } else {
                None
            }
        };

        self.event_bus.emit(UserRemoved::new(user_id));
        if let Some(session) = closed {
            self.event_bus.emit(SessionClosed::new(session.user_id()));
        }
        Ok(())
    }

    /// Installs a directory entry at startup. Returns false when the email is taken.
    pub fn seed_user(&self, user: User, password: &str) -> AppResult<bool> {
        if self.user_repo.get_by_email(&user.email)?.is_some() {
            log::warn!("Skipping seed account {}: email already registered", user.email);
            return Ok(false);
        }

        self.credential_repo
            .set(&user.email, &digest_password(&user.email, password))?;
        self.user_repo.save(&user)?;

        self.event_bus
            .emit(UserRegistered::new(user.id, user.email.clone()));
        Ok(true)
    }

    /// Reopens a session for a directory user while restoring saved state.
    /// An unknown user leaves the process logged out.
    /// Emits nothing; the restore announces itself. Caller holds the commit
    /// gate exclusively.
    pub(crate) fn resume(&self, user_id: Uuid) -> AppResult<Option<Session>> {
        let session = self.user_repo.get_by_id(user_id)?.map(Session::new);
        if session.is_none() {
            log::warn!("Saved session refers to unknown user {}", user_id);
        }
        self.replace_current(session.clone())?;
        Ok(session)
    }

    /// Drops the session without a notice (restore to defaults)
    pub(crate) fn reset(&self) -> AppResult<()> {
        self.replace_current(None)
    }

    fn replace_current(&self, session: Option<Session>) -> AppResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.generation += 1;
        state.current = session;
        Ok(())
    }

    fn open(&self, session: Session) -> AppResult<u64> {
        let _commit = self.gate.commit()?;
        let mut state = self.state.write().map_err(poisoned)?;
        state.generation += 1;
        state.current = Some(session);
        Ok(state.generation)
    }
}
