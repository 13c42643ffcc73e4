use tracing::info;

use crate::gateway::{ApiError, ApiGateway};
use crate::models::{Cliente, ClienteOption, SerialErp, SerialInput};
use crate::notify::Notification;

use super::{blank, Endpoint};

#[derive(Debug, Clone, Default)]
pub struct SerialesData {
    pub seriales: Vec<SerialErp>,
    /// Client selector entries, `"{nit} - {razon_social}"`
    pub clientes: Vec<ClienteOption>,
}

impl SerialesData {
    pub fn search(&self, query: &str) -> Vec<&SerialErp> {
        self.seriales.iter().filter(|s| s.matches(query)).collect()
    }
}

pub struct SerialesPage<'a> {
    api: &'a ApiGateway,
    seriales: Endpoint<'a>,
    clientes: Endpoint<'a>,
}

impl<'a> SerialesPage<'a> {
    pub fn new(api: &'a ApiGateway) -> Self {
        Self {
            api,
            seriales: Endpoint::new(api, "/seriales"),
            clientes: Endpoint::new(api, "/clientes"),
        }
    }

    pub async fn load(&self) -> Result<SerialesData, ApiError> {
        let (seriales, clientes) =
            tokio::try_join!(self.seriales.list(), self.clientes.list::<Cliente>())?;

        Ok(SerialesData {
            seriales,
            clientes: clientes.iter().map(ClienteOption::from).collect(),
        })
    }

    pub async fn get(&self, id: i64) -> Result<SerialErp, ApiError> {
        self.seriales.get(id).await
    }

    /// Serials licensed to one client
    pub async fn por_cliente(&self, cliente_id: i64) -> Result<Vec<SerialErp>, ApiError> {
        self.api.get(&format!("/seriales/cliente/{}", cliente_id)).await
    }

    pub async fn save(&self, form: &SerialInput) -> Result<Notification, ApiError> {
        if blank(&form.serial_erp) || form.cliente_id.is_none() || blank(&form.nombre_software) {
            return Err(ApiError::validation("Campos obligatorios"));
        }

        match form.id {
            Some(id) => {
                self.seriales.update(id, form).await?;
                info!(serial_id = id, "Serial updated");
                Ok(Notification::success("Serial actualizado"))
            }
            None => {
                self.seriales.create(form).await?;
                info!(serial = %form.serial_erp, "Serial registered");
                Ok(Notification::success("Serial registrado"))
            }
        }
    }

    pub async fn delete(&self, id: i64) -> Result<Notification, ApiError> {
        self.seriales.remove(id).await?;
        info!(serial_id = id, "Serial deleted");
        Ok(Notification::success("Serial eliminado"))
    }
}
