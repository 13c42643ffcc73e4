//! Exógena Admin Library
//!
//! Session handling, API access and the per-entity pages behind the
//! `exogena-admin` console.

pub mod auth;
pub mod commands;
pub mod config;
pub mod gateway;
pub mod guard;
pub mod logging;
pub mod models;
pub mod notify;
pub mod pages;
pub mod storage;

use std::sync::Arc;

use auth::SessionStore;
use gateway::{ApiError, ApiGateway};
use guard::{AccessGuard, Navigator, Route, SessionExpiryHandler};
use storage::SecureStorage;

/// Application state shared by every command
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub navigator: Arc<Navigator>,
    pub guard: AccessGuard,
    pub api: Arc<ApiGateway>,
}

impl AppState {
    /// Restore the session from `storage` and wire the gateway's
    /// authorization-failure observer.
    pub fn new(api_url: &str, storage: SecureStorage) -> Result<Self, ApiError> {
        let sessions = Arc::new(SessionStore::initialize(storage));
        let guard = AccessGuard::new(sessions.clone());
        let navigator = Arc::new(Navigator::new(guard.fallback()));

        let expiry = Arc::new(SessionExpiryHandler::new(sessions.clone(), navigator.clone()));
        let api = ApiGateway::new(api_url, sessions.clone())?.with_auth_observer(expiry);

        Ok(Self {
            sessions,
            navigator,
            guard,
            api: Arc::new(api),
        })
    }

    /// Run `route` through the guard and move there (or to the redirect)
    pub fn visit(&self, route: Route) -> guard::Navigation {
        self.guard.visit(&self.navigator, route)
    }
}
