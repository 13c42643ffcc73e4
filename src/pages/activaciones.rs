use tracing::info;

use crate::gateway::{ApiError, ApiGateway};
use crate::models::Activacion;
use crate::notify::Notification;

use super::Endpoint;

pub struct ActivacionesPage<'a> {
    activaciones: Endpoint<'a>,
}

impl<'a> ActivacionesPage<'a> {
    pub fn new(api: &'a ApiGateway) -> Self {
        Self {
            activaciones: Endpoint::new(api, "/activaciones"),
        }
    }

    pub async fn load(&self) -> Result<Vec<Activacion>, ApiError> {
        self.activaciones.list().await
    }

    pub async fn delete(&self, id: i64) -> Result<Notification, ApiError> {
        self.activaciones.remove(id).await?;
        info!(activacion_id = id, "Activation record deleted");
        Ok(Notification::success("Registro eliminado correctamente"))
    }

    pub fn search<'r>(activaciones: &'r [Activacion], query: &str) -> Vec<&'r Activacion> {
        activaciones.iter().filter(|a| a.matches(query)).collect()
    }
}
