//! Sales, their payments and the activations issued against them.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::{ClienteRef, VendedorRef};
use super::{date, id, matches_any, money, nullable};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SerialRef {
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub serial_erp: String,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub nombre_software: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResumenFinanciero {
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub esta_paga: bool,
    #[serde(default, deserialize_with = "money::deserialize")]
    pub saldo_pendiente: f64,
    #[serde(default, deserialize_with = "money::deserialize")]
    pub total_pagado: f64,
}

/// Collection status tag shown for each sale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstadoFinanciero {
    Pagado,
    SaldoCero,
    Pendiente,
}

impl EstadoFinanciero {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pagado => "PAGADO",
            Self::SaldoCero => "SALDO $0",
            Self::Pendiente => "PENDIENTE",
        }
    }
}

impl std::fmt::Display for EstadoFinanciero {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Venta {
    #[serde(deserialize_with = "id::deserialize")]
    pub id: i64,
    #[serde(deserialize_with = "id::deserialize")]
    pub cliente_id: i64,
    #[serde(default, deserialize_with = "id::option")]
    pub vendedor_id: Option<i64>,
    #[serde(default, deserialize_with = "id::option")]
    pub serial_erp_id: Option<i64>,
    #[serde(default)]
    pub ano_gravable: Option<i32>,
    #[serde(default)]
    pub ano_venta: Option<i32>,
    #[serde(default, deserialize_with = "date::option")]
    pub fecha_venta: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "money::deserialize")]
    pub valor_total: f64,
    #[serde(default)]
    pub observaciones: Option<String>,
    #[serde(default)]
    pub clientes: Option<ClienteRef>,
    #[serde(default)]
    pub vendedores: Option<VendedorRef>,
    #[serde(default)]
    pub seriales_erp: Option<SerialRef>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub resumen_financiero: ResumenFinanciero,
}

impl Venta {
    pub fn estado(&self) -> EstadoFinanciero {
        let resumen = &self.resumen_financiero;
        if resumen.esta_paga {
            EstadoFinanciero::Pagado
        } else if resumen.saldo_pendiente <= 0.0 {
            EstadoFinanciero::SaldoCero
        } else {
            EstadoFinanciero::Pendiente
        }
    }

    pub fn matches(&self, query: &str) -> bool {
        let cliente = self.clientes.as_ref();
        matches_any(
            query,
            [
                cliente.map(|c| c.razon_social.as_str()),
                cliente.map(|c| c.nit.as_str()),
                self.seriales_erp.as_ref().map(|s| s.serial_erp.as_str()),
                self.vendedores.as_ref().map(|v| v.nombre.as_str()),
            ],
        )
    }
}

/// Form payload for registering or editing a sale
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VentaInput {
    pub cliente_id: Option<i64>,
    pub vendedor_id: Option<i64>,
    pub serial_erp_id: Option<i64>,
    pub ano_gravable: i32,
    pub ano_venta: i32,
    pub fecha_venta: DateTime<Utc>,
    pub valor_total: f64,
    pub observaciones: String,
}

impl VentaInput {
    /// Blank form for a new sale, dated `now`
    pub fn nueva(now: DateTime<Utc>) -> Self {
        Self {
            cliente_id: None,
            vendedor_id: None,
            serial_erp_id: None,
            ano_gravable: now.year(),
            ano_venta: now.year(),
            fecha_venta: now,
            valor_total: 0.0,
            observaciones: String::new(),
        }
    }
}

impl From<&Venta> for VentaInput {
    fn from(v: &Venta) -> Self {
        let fecha = v.fecha_venta.unwrap_or_else(Utc::now);
        Self {
            cliente_id: Some(v.cliente_id),
            vendedor_id: v.vendedor_id,
            serial_erp_id: v.serial_erp_id,
            ano_gravable: v.ano_gravable.unwrap_or_else(|| fecha.year()),
            ano_venta: v.ano_venta.unwrap_or_else(|| fecha.year()),
            fecha_venta: fecha,
            valor_total: v.valor_total,
            observaciones: v.observaciones.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Pago {
    #[serde(deserialize_with = "id::deserialize")]
    pub id: i64,
    #[serde(default, deserialize_with = "id::option")]
    pub venta_id: Option<i64>,
    #[serde(default, deserialize_with = "money::deserialize")]
    pub monto_pagado: f64,
    #[serde(default, deserialize_with = "date::option")]
    pub fecha_pago: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub metodo_pago: String,
}

/// Payment form; `metodo_pago` defaults to a bank transfer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagoInput {
    pub monto_pagado: f64,
    pub fecha_pago: DateTime<Utc>,
    pub metodo_pago: String,
}

impl PagoInput {
    pub const METODO_POR_DEFECTO: &'static str = "transferencia";

    pub fn new(monto_pagado: f64, fecha_pago: DateTime<Utc>) -> Self {
        Self {
            monto_pagado,
            fecha_pago,
            metodo_pago: Self::METODO_POR_DEFECTO.to_string(),
        }
    }
}

/// Body of `POST /pagos`
#[derive(Debug, Serialize)]
pub struct NuevoPago<'a> {
    #[serde(flatten)]
    pub pago: &'a PagoInput,
    pub venta_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VentaRef {
    #[serde(default)]
    pub clientes: Option<ClienteRef>,
    #[serde(default)]
    pub seriales_erp: Option<SerialRef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Activacion {
    #[serde(deserialize_with = "id::deserialize")]
    pub id: i64,
    #[serde(default, deserialize_with = "date::option")]
    pub fecha_activacion: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ip_origen: Option<String>,
    #[serde(default)]
    pub nombre_equipo: Option<String>,
    #[serde(default)]
    pub mac_servidor: Option<String>,
    #[serde(default)]
    pub ventas: Option<VentaRef>,
}

impl Activacion {
    pub fn cliente(&self) -> Option<&ClienteRef> {
        self.ventas.as_ref().and_then(|v| v.clientes.as_ref())
    }

    pub fn serial(&self) -> Option<&SerialRef> {
        self.ventas.as_ref().and_then(|v| v.seriales_erp.as_ref())
    }

    pub fn matches(&self, query: &str) -> bool {
        matches_any(
            query,
            [
                self.nombre_equipo.as_deref(),
                self.mac_servidor.as_deref(),
                self.cliente().map(|c| c.razon_social.as_str()),
                self.serial().map(|s| s.serial_erp.as_str()),
                self.ip_origen.as_deref(),
            ],
        )
    }
}
