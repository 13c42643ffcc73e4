//! Transient user-facing messages produced by page operations.

use std::fmt;

use crate::gateway::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warn,
    Error,
}

impl Severity {
    fn tag(self) -> &'static str {
        match self {
            Severity::Success => "OK",
            Severity::Info => "INFO",
            Severity::Warn => "AVISO",
            Severity::Error => "ERROR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
}

impl Notification {
    pub fn new(severity: Severity, summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    pub fn success(detail: impl Into<String>) -> Self {
        Self::new(Severity::Success, "Éxito", detail)
    }

    pub fn info(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(Severity::Info, summary, detail)
    }

    pub fn warn(detail: impl Into<String>) -> Self {
        Self::new(Severity::Warn, "Atención", detail)
    }

    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(Severity::Error, summary, detail)
    }

    /// Map a failed operation onto a message. `context` prefixes server
    /// errors ("Error al guardar"); the server text itself is kept verbatim.
    pub fn from_error(context: &str, err: &ApiError) -> Self {
        match err {
            ApiError::Validation(msg) => Self::warn(msg.as_str()),
            ApiError::Unauthorized { .. } => {
                Self::error("Sesión expirada", "Inicia sesión nuevamente")
            }
            ApiError::Server { message: Some(msg), .. } => {
                Self::error("Error", format!("{} {}", context, msg))
            }
            ApiError::Server { status, message: None } => {
                Self::error("Error", format!("{} (HTTP {})", context, status))
            }
            ApiError::Network(_) => Self::error(
                "Sin conexión",
                "No se pudo conectar con el servidor",
            ),
            ApiError::Parse(_) => {
                Self::error("Error", "Respuesta inesperada del servidor")
            }
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity.tag(), self.summary, self.detail)
    }
}
