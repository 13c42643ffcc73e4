//! License-key generator. The encoded serial goes to the API as typed;
//! all decoding and key derivation happen server-side.

use tracing::info;

use crate::gateway::{ApiError, ApiGateway};
use crate::models::{ClaveGenerada, GenerarClaveRequest};
use crate::notify::Notification;

use super::blank;

pub struct GenerarClavePage<'a> {
    api: &'a ApiGateway,
}

impl<'a> GenerarClavePage<'a> {
    pub fn new(api: &'a ApiGateway) -> Self {
        Self { api }
    }

    pub async fn generar(&self, serial: &str) -> Result<ClaveGenerada, ApiError> {
        if blank(serial) {
            return Err(ApiError::validation("Debes ingresar un serial Base64"));
        }

        let clave: ClaveGenerada = self
            .api
            .post("/generar-clave", &GenerarClaveRequest { serial })
            .await?;

        info!(serial_erp = %clave.serial_erp, "License key generated");
        Ok(clave)
    }

    pub fn error_notification(err: &ApiError) -> Notification {
        match err {
            ApiError::Validation(_) | ApiError::Network(_) => Notification::from_error("", err),
            _ => Notification::error(
                "No se pudo generar",
                err.server_message().unwrap_or("Error inesperado en el servidor"),
            ),
        }
    }
}
