//! One module per console screen. Each page wraps the gateway calls,
//! form validation and search for its entity; presentation is left to
//! the caller.

pub mod activaciones;
pub mod clientes;
pub mod dashboard;
pub mod generar_clave;
pub mod login;
pub mod pagos;
pub mod seriales;
pub mod vendedores;
pub mod ventas;

pub use activaciones::ActivacionesPage;
pub use clientes::ClientesPage;
pub use dashboard::DashboardPage;
pub use generar_clave::GenerarClavePage;
pub use login::LoginPage;
pub use pagos::PagosSeccion;
pub use seriales::SerialesPage;
pub use vendedores::VendedoresPage;
pub use ventas::{VentaForm, VentasPage};

use serde::{de::DeserializeOwned, de::IgnoredAny, Serialize};

use crate::gateway::{ApiError, ApiGateway};

/// List/get/create/update/delete conventions of one REST collection
#[derive(Clone, Copy)]
pub(crate) struct Endpoint<'a> {
    api: &'a ApiGateway,
    path: &'static str,
}

impl<'a> Endpoint<'a> {
    pub(crate) fn new(api: &'a ApiGateway, path: &'static str) -> Self {
        Self { api, path }
    }

    pub(crate) async fn list<T: DeserializeOwned>(&self) -> Result<Vec<T>, ApiError> {
        self.api.get(self.path).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, id: i64) -> Result<T, ApiError> {
        self.api.get(&format!("{}/{}", self.path, id)).await
    }

    pub(crate) async fn create<B: Serialize>(&self, body: &B) -> Result<(), ApiError> {
        self.api.post::<_, IgnoredAny>(self.path, body).await.map(|_| ())
    }

    pub(crate) async fn update<B: Serialize>(&self, id: i64, body: &B) -> Result<(), ApiError> {
        self.api
            .put::<_, IgnoredAny>(&format!("{}/{}", self.path, id), body)
            .await
            .map(|_| ())
    }

    pub(crate) async fn remove(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete(&format!("{}/{}", self.path, id)).await
    }
}

/// Blank or whitespace-only form fields count as missing
pub(crate) fn blank(value: &str) -> bool {
    value.trim().is_empty()
}
