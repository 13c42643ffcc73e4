//! Access Guard Module
//!
//! Route-level gate over the session: protected screens require a
//! session, and the login screen requires its absence. Also holds the
//! [`Navigator`] (current location) and the [`SessionExpiryHandler`] that
//! reacts to authorization failures reported by the gateway.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use reqwest::StatusCode;
use tracing::{debug, info};

use crate::auth::SessionStore;
use crate::gateway::AuthFailureObserver;

/// Screens of the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Clientes,
    Vendedores,
    Seriales,
    Ventas,
    VentaNueva,
    VentaEditar(i64),
    VentaDetalle(i64),
    Activaciones,
    GenerarClave,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".into(),
            Route::Dashboard => "/dashboard".into(),
            Route::Clientes => "/clientes".into(),
            Route::Vendedores => "/vendedores".into(),
            Route::Seriales => "/seriales".into(),
            Route::Ventas => "/ventas".into(),
            Route::VentaNueva => "/ventas/nueva".into(),
            Route::VentaEditar(id) => format!("/ventas/editar/{}", id),
            Route::VentaDetalle(id) => format!("/ventas/detalle/{}", id),
            Route::Activaciones => "/activaciones".into(),
            Route::GenerarClave => "/generar-clave".into(),
        }
    }

    /// Parse a location path. Unknown paths yield `None`.
    pub fn parse(path: &str) -> Option<Route> {
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        let route = match segments.as_slice() {
            ["login"] => Route::Login,
            ["dashboard"] => Route::Dashboard,
            ["clientes"] => Route::Clientes,
            ["vendedores"] => Route::Vendedores,
            ["seriales"] => Route::Seriales,
            ["ventas"] => Route::Ventas,
            ["ventas", "nueva"] => Route::VentaNueva,
            ["ventas", "editar", id] => Route::VentaEditar(id.parse().ok()?),
            ["ventas", "detalle", id] => Route::VentaDetalle(id.parse().ok()?),
            ["activaciones"] => Route::Activaciones,
            ["generar-clave"] => Route::GenerarClave,
            _ => return None,
        };
        Some(route)
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Unauthenticated,
    Authenticated,
}

/// Outcome of resolving a requested route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

/// Holds the current location and the trail of visited locations
pub struct Navigator {
    state: Mutex<NavState>,
}

struct NavState {
    current: Route,
    history: Vec<Route>,
}

impl Navigator {
    pub fn new(start: Route) -> Self {
        Self {
            state: Mutex::new(NavState {
                current: start,
                history: vec![start],
            }),
        }
    }

    pub fn current(&self) -> Route {
        self.lock().current
    }

    pub fn navigate(&self, route: Route) {
        debug!(%route, "Navigate");
        self.push(route);
    }

    /// Forced navigation issued by the guard or the expiry handler
    pub fn redirect(&self, route: Route) {
        info!(%route, "Redirect");
        self.push(route);
    }

    fn push(&self, route: Route) {
        let mut state = self.lock();
        state.current = route;
        state.history.push(route);
    }

    pub fn history(&self) -> Vec<Route> {
        self.lock().history.clone()
    }

    fn lock(&self) -> MutexGuard<'_, NavState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Gate between the session and the screens
pub struct AccessGuard {
    sessions: Arc<SessionStore>,
}

impl AccessGuard {
    pub fn new(sessions: Arc<SessionStore>) -> Self {
        Self { sessions }
    }

    pub fn state(&self) -> GuardState {
        if self.sessions.is_authenticated() {
            GuardState::Authenticated
        } else {
            GuardState::Unauthenticated
        }
    }

    /// Where unknown locations end up
    pub fn fallback(&self) -> Route {
        match self.state() {
            GuardState::Authenticated => Route::Dashboard,
            GuardState::Unauthenticated => Route::Login,
        }
    }

    pub fn resolve(&self, route: Route) -> Navigation {
        match (self.state(), route.is_public()) {
            (GuardState::Unauthenticated, false) => Navigation::Redirect(Route::Login),
            // A logged-in operator never sees the login form again
            (GuardState::Authenticated, true) => Navigation::Redirect(Route::Dashboard),
            _ => Navigation::Render(route),
        }
    }

    pub fn resolve_path(&self, path: &str) -> Navigation {
        match Route::parse(path) {
            Some(route) => self.resolve(route),
            None => Navigation::Redirect(self.fallback()),
        }
    }

    /// Resolve `route` and move the navigator accordingly
    pub fn visit(&self, navigator: &Navigator, route: Route) -> Navigation {
        let outcome = self.resolve(route);
        match outcome {
            Navigation::Render(to) => navigator.navigate(to),
            Navigation::Redirect(to) => navigator.redirect(to),
        }
        outcome
    }
}

/// Reaction to a 401/403: drop the session, then send the operator to the
/// login screen unless they are already there.
pub struct SessionExpiryHandler {
    sessions: Arc<SessionStore>,
    navigator: Arc<Navigator>,
}

impl SessionExpiryHandler {
    pub fn new(sessions: Arc<SessionStore>, navigator: Arc<Navigator>) -> Self {
        Self { sessions, navigator }
    }
}

impl AuthFailureObserver for SessionExpiryHandler {
    fn on_auth_failure(&self, status: StatusCode) {
        info!(%status, "Session invalid or expired, clearing");
        // Cleared before redirecting so the guard sees a logged-out state
        self.sessions.logout();

        if self.navigator.current() != Route::Login {
            self.navigator.redirect(Route::Login);
        }
    }
}
