//! Login screen: exchanges credentials for a session.

use tracing::{error, info};

use crate::gateway::ApiError;
use crate::guard::{Navigation, Route};
use crate::models::{LoginRequest, LoginResponse, Usuario};
use crate::notify::{Notification, Severity};
use crate::AppState;

use super::blank;

pub struct LoginPage<'a> {
    state: &'a AppState,
}

impl<'a> LoginPage<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Enter the login screen. An existing session redirects to the
    /// dashboard and the form must not be shown.
    pub fn open(&self) -> Navigation {
        self.state.visit(Route::Login)
    }

    /// Authenticate, start the session and move to the dashboard
    pub async fn submit(&self, email: &str, password: &str) -> Result<Usuario, ApiError> {
        if blank(email) || password.is_empty() {
            return Err(ApiError::validation("Ingresa usuario y contraseña"));
        }

        let response: LoginResponse = self
            .state
            .api
            .post("/auth/login", &LoginRequest { email, password })
            .await?;

        let (user, token) = match (response.usuario, response.token) {
            (Some(user), Some(token)) if !token.is_empty() => (user, token),
            _ => return Err(ApiError::Parse("No se recibió un token del servidor".into())),
        };

        info!(user_id = user.id, "Login successful");
        if let Err(e) = self.state.sessions.login(user.clone(), token) {
            error!("Failed to persist session: {}", e);
        }
        self.state.navigator.navigate(Route::Dashboard);

        Ok(user)
    }

    pub fn welcome(user: &Usuario) -> Notification {
        Notification::new(
            Severity::Success,
            "Bienvenido",
            format!("Hola, {}", user.display_name()),
        )
    }

    /// Server text when there is one, otherwise a generic credentials error
    pub fn error_notification(err: &ApiError) -> Notification {
        match err {
            ApiError::Validation(_) | ApiError::Network(_) => Notification::from_error("", err),
            _ => Notification::error(
                "Error de acceso",
                err.server_message().unwrap_or("Credenciales incorrectas"),
            ),
        }
    }
}
