use tracing::info;

use crate::gateway::{ApiError, ApiGateway};
use crate::models::{Vendedor, VendedorInput};
use crate::notify::Notification;

use super::{blank, Endpoint};

pub struct VendedoresPage<'a> {
    vendedores: Endpoint<'a>,
}

impl<'a> VendedoresPage<'a> {
    pub fn new(api: &'a ApiGateway) -> Self {
        Self {
            vendedores: Endpoint::new(api, "/vendedores"),
        }
    }

    pub async fn load(&self) -> Result<Vec<Vendedor>, ApiError> {
        self.vendedores.list().await
    }

    pub async fn get(&self, id: i64) -> Result<Vendedor, ApiError> {
        self.vendedores.get(id).await
    }

    pub async fn save(&self, form: &VendedorInput) -> Result<Notification, ApiError> {
        if blank(&form.nombre) {
            return Err(ApiError::validation("El nombre es obligatorio"));
        }

        match form.id {
            Some(id) => self.vendedores.update(id, form).await?,
            None => self.vendedores.create(form).await?,
        }
        info!(id = ?form.id, "Seller saved");
        Ok(Notification::success("Vendedor guardado"))
    }

    pub async fn delete(&self, id: i64) -> Result<Notification, ApiError> {
        self.vendedores.remove(id).await?;
        info!(vendedor_id = id, "Seller deleted");
        Ok(Notification::success("Vendedor eliminado"))
    }
}
