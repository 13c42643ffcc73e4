//! Sales list (filtered by year) and the sale form.

use chrono::{DateTime, Datelike, Utc};
use tracing::info;

use crate::gateway::{ApiError, ApiGateway};
use crate::guard::{Navigator, Route};
use crate::models::{Cliente, SerialErp, Vendedor, Venta, VentaInput};
use crate::notify::Notification;

use super::Endpoint;

/// First year offered by the year selector
pub const PRIMER_ANO: i32 = 2022;
const ANOS_OFRECIDOS: i32 = 10;

pub struct VentasPage<'a> {
    api: &'a ApiGateway,
}

impl<'a> VentasPage<'a> {
    pub fn new(api: &'a ApiGateway) -> Self {
        Self { api }
    }

    /// Sales registered for tax year `ano`
    pub async fn load(&self, ano: i32) -> Result<Vec<Venta>, ApiError> {
        if !Self::anos_disponibles().any(|a| a == ano) {
            return Err(ApiError::validation(format!(
                "Año gravable fuera de rango ({}-{})",
                PRIMER_ANO,
                PRIMER_ANO + ANOS_OFRECIDOS - 1
            )));
        }
        self.api.get_with_query("/ventas", &[("ano", ano)]).await
    }

    pub async fn get(&self, id: i64) -> Result<Venta, ApiError> {
        self.api.get(&format!("/ventas/{}", id)).await
    }

    pub fn anos_disponibles() -> impl Iterator<Item = i32> {
        PRIMER_ANO..PRIMER_ANO + ANOS_OFRECIDOS
    }

    pub fn ano_actual(now: DateTime<Utc>) -> i32 {
        now.year()
    }

    pub fn search<'r>(ventas: &'r [Venta], query: &str) -> Vec<&'r Venta> {
        ventas.iter().filter(|v| v.matches(query)).collect()
    }
}

/// Everything the sale form needs to render
#[derive(Debug, Clone)]
pub struct VentaFormData {
    pub clientes: Vec<Cliente>,
    pub vendedores: Vec<Vendedor>,
    /// Serials of the selected client
    pub seriales: Vec<SerialErp>,
    pub venta: VentaInput,
}

impl VentaFormData {
    /// Whether the selected serial is one of the loaded client's serials.
    /// No selection counts as available; `save` rejects it separately.
    pub fn serial_disponible(&self) -> bool {
        match self.venta.serial_erp_id {
            Some(id) => self.seriales.iter().any(|s| s.id == id),
            None => true,
        }
    }
}

/// Create (`id == None`) or edit form for one sale
pub struct VentaForm<'a> {
    api: &'a ApiGateway,
    ventas: Endpoint<'a>,
    id: Option<i64>,
}

impl<'a> VentaForm<'a> {
    pub fn new(api: &'a ApiGateway, id: Option<i64>) -> Self {
        Self {
            api,
            ventas: Endpoint::new(api, "/ventas"),
            id,
        }
    }

    pub fn for_route(api: &'a ApiGateway, route: Route) -> Option<Self> {
        match route {
            Route::VentaNueva => Some(Self::new(api, None)),
            Route::VentaEditar(id) => Some(Self::new(api, Some(id))),
            _ => None,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    /// Catalogs first (concurrently); when editing, the sale and then the
    /// serials of its client so the serial selector is populated.
    pub async fn load(&self, now: DateTime<Utc>) -> Result<VentaFormData, ApiError> {
        let (clientes, vendedores) = tokio::try_join!(
            self.api.get::<Vec<Cliente>>("/clientes"),
            self.api.get::<Vec<Vendedor>>("/vendedores"),
        )?;

        let (venta, seriales) = match self.id {
            Some(id) => {
                let venta: Venta = self.ventas.get(id).await?;
                let seriales = self.seriales_for(venta.cliente_id).await?;
                (VentaInput::from(&venta), seriales)
            }
            None => (VentaInput::nueva(now), Vec::new()),
        };

        Ok(VentaFormData {
            clientes,
            vendedores,
            seriales,
            venta,
        })
    }

    /// Reload the serial options after the client selection changes
    pub async fn seriales_for(&self, cliente_id: i64) -> Result<Vec<SerialErp>, ApiError> {
        self.api.get(&format!("/seriales/cliente/{}", cliente_id)).await
    }

    /// Switch the sale to another client: the serial selection is cleared
    /// and the options reloaded for the new client.
    pub async fn seleccionar_cliente(
        &self,
        data: &mut VentaFormData,
        cliente_id: i64,
    ) -> Result<(), ApiError> {
        data.venta.cliente_id = Some(cliente_id);
        data.venta.serial_erp_id = None;
        data.seriales = self.seriales_for(cliente_id).await?;
        Ok(())
    }

    pub async fn save(&self, form: &VentaInput, navigator: &Navigator) -> Result<Notification, ApiError> {
        if form.cliente_id.is_none() || form.serial_erp_id.is_none() || !(form.valor_total > 0.0) {
            return Err(ApiError::validation("Campos obligatorios incompletos"));
        }

        match self.id {
            Some(id) => self.ventas.update(id, form).await?,
            None => self.ventas.create(form).await?,
        }
        info!(venta_id = ?self.id, valor = form.valor_total, "Sale saved");

        navigator.navigate(Route::Ventas);
        Ok(Notification::success("Guardado correctamente"))
    }
}
