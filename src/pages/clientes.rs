use tracing::info;

use crate::gateway::{ApiError, ApiGateway};
use crate::models::{Cliente, ClienteInput, Vendedor};
use crate::notify::{Notification, Severity};

use super::{blank, Endpoint};

/// Client list plus the sellers offered in the client form
#[derive(Debug, Clone, Default)]
pub struct ClientesData {
    pub clientes: Vec<Cliente>,
    pub vendedores: Vec<Vendedor>,
}

impl ClientesData {
    pub fn search(&self, query: &str) -> Vec<&Cliente> {
        self.clientes.iter().filter(|c| c.matches(query)).collect()
    }
}

pub struct ClientesPage<'a> {
    clientes: Endpoint<'a>,
    vendedores: Endpoint<'a>,
}

impl<'a> ClientesPage<'a> {
    pub fn new(api: &'a ApiGateway) -> Self {
        Self {
            clientes: Endpoint::new(api, "/clientes"),
            vendedores: Endpoint::new(api, "/vendedores"),
        }
    }

    /// Both lists are fetched concurrently; either failure fails the load
    pub async fn load(&self) -> Result<ClientesData, ApiError> {
        let (clientes, vendedores) =
            tokio::try_join!(self.clientes.list(), self.vendedores.list())?;
        Ok(ClientesData { clientes, vendedores })
    }

    pub async fn get(&self, id: i64) -> Result<Cliente, ApiError> {
        self.clientes.get(id).await
    }

    pub async fn save(&self, form: &ClienteInput) -> Result<Notification, ApiError> {
        if blank(&form.nit) || blank(&form.razon_social) {
            return Err(ApiError::validation("NIT y Razón Social son obligatorios"));
        }

        match form.id {
            Some(id) => {
                self.clientes.update(id, form).await?;
                info!(cliente_id = id, "Client updated");
                Ok(Notification::success("Cliente actualizado"))
            }
            None => {
                self.clientes.create(form).await?;
                info!(nit = %form.nit, "Client created");
                Ok(Notification::success("Cliente creado"))
            }
        }
    }

    pub async fn delete(&self, id: i64) -> Result<Notification, ApiError> {
        self.clientes.remove(id).await?;
        info!(cliente_id = id, "Client deleted");
        Ok(Notification::new(Severity::Success, "Eliminado", "Cliente borrado"))
    }
}
