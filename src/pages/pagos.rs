//! Payment history of a single sale.
//!
//! The section can be torn down while its history request is still in
//! flight; a result that arrives after [`PagosSeccion::unmount`] is
//! dropped instead of being applied.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};

use crate::gateway::{ApiError, ApiGateway};
use crate::models::{NuevoPago, Pago, PagoInput};
use crate::notify::Notification;

#[derive(Clone)]
pub struct PagosSeccion {
    api: Arc<ApiGateway>,
    /// `None` for a sale that has not been saved yet
    venta_id: Option<i64>,
    pagos: Arc<Mutex<Vec<Pago>>>,
    mounted: Arc<AtomicBool>,
}

impl PagosSeccion {
    pub fn new(api: Arc<ApiGateway>, venta_id: Option<i64>) -> Self {
        Self {
            api,
            venta_id,
            pagos: Arc::new(Mutex::new(Vec::new())),
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Fetch the history. Returns `Ok(false)` when the section was
    /// unmounted before the response arrived and the result was dropped.
    pub async fn load(&self) -> Result<bool, ApiError> {
        let Some(venta_id) = self.venta_id else {
            self.lock().clear();
            return Ok(true);
        };

        let pagos: Vec<Pago> = self.api.get(&format!("/pagos/venta/{}", venta_id)).await?;

        if !self.is_mounted() {
            debug!(venta_id, "Discarding payment history for unmounted section");
            return Ok(false);
        }

        *self.lock() = pagos;
        Ok(true)
    }

    /// Record a payment against the sale, then refresh the history. The
    /// payment is already stored once the POST succeeds, so a failed
    /// refresh is logged and the registration still reports success.
    pub async fn registrar(&self, pago: &PagoInput) -> Result<Notification, ApiError> {
        let Some(venta_id) = self.venta_id else {
            return Err(ApiError::validation("Guarda la venta antes de registrar pagos"));
        };
        if !(pago.monto_pagado > 0.0) {
            return Err(ApiError::validation("Por favor ingrese un monto válido"));
        }

        self.api
            .post::<_, serde::de::IgnoredAny>("/pagos", &NuevoPago { pago, venta_id })
            .await?;
        info!(venta_id, monto = pago.monto_pagado, "Payment registered");

        if let Err(e) = self.load().await {
            warn!(venta_id, "Payment history refresh failed: {}", e);
        }
        Ok(Notification::success("Pago registrado"))
    }

    pub fn pagos(&self) -> Vec<Pago> {
        self.lock().clone()
    }

    pub fn total_pagado(&self) -> f64 {
        self.lock().iter().map(|p| p.monto_pagado).sum()
    }

    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Pago>> {
        self.pagos.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
