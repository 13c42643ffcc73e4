//! Authentication Module
//!
//! Owns the current session (operator identity + bearer token) and keeps
//! it in sync with persisted storage.
//!
//! Initialization rule: a session is restored from storage only when both
//! the `user` and the `token` entries are present and readable. A lone or
//! unreadable entry is discarded together with its pair. No round-trip to
//! the API is made, so a stale token is only discovered when the first
//! request comes back 401/403.

use std::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

use crate::models::Usuario;
use crate::storage::{SecureStorage, StorageError};

const USER_KEY: &str = "user";
const TOKEN_KEY: &str = "token";

/// Authenticated operator plus the token issued at login
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: Usuario,
    pub token: String,
}

/// Single source of truth for "who is logged in"
pub struct SessionStore {
    storage: SecureStorage,
    session: Mutex<Option<Session>>,
}

impl SessionStore {
    /// Build the store and restore any persisted session
    pub fn initialize(storage: SecureStorage) -> Self {
        let session = match Self::restore(&storage) {
            Ok(session) => session,
            Err(e) => {
                warn!("Discarding unreadable stored session: {}", e);
                None
            }
        };

        if session.is_none() {
            // Keep the pair consistent: never leave half a session behind
            clear_stored(&storage);
        } else {
            info!("Stored session restored");
        }

        Self {
            storage,
            session: Mutex::new(session),
        }
    }

    fn restore(storage: &SecureStorage) -> Result<Option<Session>, StorageError> {
        let user = storage.load::<Usuario>(USER_KEY)?;
        let token = storage.load::<String>(TOKEN_KEY)?;

        Ok(match (user, token) {
            (Some(user), Some(token)) if !token.is_empty() => Some(Session { user, token }),
            (None, None) => None,
            _ => {
                warn!("Stored session is incomplete");
                None
            }
        })
    }

    /// Record a successful authentication exchange.
    ///
    /// The in-memory session is set even when persisting fails; the error
    /// only means the session will not survive a restart.
    pub fn login(&self, user: Usuario, token: String) -> Result<(), StorageError> {
        let persisted = self
            .storage
            .save(USER_KEY, &user)
            .and_then(|_| self.storage.save(TOKEN_KEY, &token));

        if persisted.is_err() {
            clear_stored(&self.storage);
        }

        info!(user_id = user.id, "Session set");
        *self.lock() = Some(Session { user, token });
        persisted
    }

    /// Forget the session in memory and on disk. Safe to call repeatedly.
    pub fn logout(&self) {
        let previous = self.lock().take();

        clear_stored(&self.storage);

        if let Some(session) = previous {
            info!(user_id = session.user.id, "Session cleared");
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.lock().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.lock().as_ref().map(|s| s.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().is_some()
    }

    // A poisoned lock only means another thread panicked mid-update; the
    // Option inside is still a valid session or none.
    fn lock(&self) -> MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Remove both persisted entries, logging any failure
fn clear_stored(storage: &SecureStorage) {
    let user = storage.delete(USER_KEY);
    let token = storage.delete(TOKEN_KEY);
    if let Err(e) = user.and(token) {
        warn!("Failed to remove stored session: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64) -> Usuario {
        serde_json::from_value(serde_json::json!({"id": id, "email": "a@b.com"})).unwrap()
    }

    fn store(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::initialize(SecureStorage::open(dir.path()).unwrap())
    }

    #[test]
    fn login_persists_user_and_token() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = store(&dir);

        sessions.login(user(1), "T1".into()).unwrap();

        assert!(sessions.is_authenticated());
        assert_eq!(sessions.token().as_deref(), Some("T1"));

        let reloaded = store(&dir);
        assert_eq!(reloaded.current().map(|s| s.user.id), Some(1));
        assert_eq!(reloaded.token().as_deref(), Some("T1"));
    }

    #[test]
    fn logout_restores_empty_storage() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = store(&dir);
        let storage = SecureStorage::open(dir.path()).unwrap();

        sessions.login(user(1), "T1".into()).unwrap();
        sessions.logout();
        sessions.logout();

        assert!(!sessions.is_authenticated());
        assert!(!storage.exists(USER_KEY));
        assert!(!storage.exists(TOKEN_KEY));
        assert!(store(&dir).current().is_none());
    }

    #[test]
    fn lone_token_is_discarded_on_initialize() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SecureStorage::open(dir.path()).unwrap();
        storage.save(TOKEN_KEY, &"orphan".to_string()).unwrap();

        let sessions = store(&dir);

        assert!(!sessions.is_authenticated());
        assert!(!storage.exists(TOKEN_KEY));
    }

    #[test]
    fn unreadable_user_discards_both_entries() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SecureStorage::open(dir.path()).unwrap();
        storage.save(TOKEN_KEY, &"T1".to_string()).unwrap();
        std::fs::write(dir.path().join("user.dat"), b"garbage").unwrap();

        let sessions = store(&dir);

        assert!(sessions.current().is_none());
        assert!(!storage.exists(USER_KEY));
        assert!(!storage.exists(TOKEN_KEY));
    }

    #[test]
    fn failed_persist_keeps_memory_session_and_drops_stored_user() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = store(&dir);
        // A directory in place of the token entry makes its write fail
        std::fs::create_dir(dir.path().join("token.dat")).unwrap();

        let result = sessions.login(user(1), "T1".into());

        assert!(matches!(result, Err(StorageError::Io(_))));
        assert!(sessions.is_authenticated());
        assert_eq!(sessions.token().as_deref(), Some("T1"));
        assert!(!dir.path().join("user.dat").exists());
    }
}
