//! Dashboard: headline figures for clients, billing and collection.

use crate::gateway::{ApiError, ApiGateway};
use crate::models::DashboardStats;

pub struct DashboardPage<'a> {
    api: &'a ApiGateway,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
    pub detail: String,
}

impl<'a> DashboardPage<'a> {
    pub fn new(api: &'a ApiGateway) -> Self {
        Self { api }
    }

    pub async fn load(&self) -> Result<DashboardStats, ApiError> {
        self.api.get("/dashboard/stats").await
    }

    pub fn cards(stats: &DashboardStats) -> Vec<StatCard> {
        let finanzas = &stats.finanzas;
        vec![
            StatCard {
                label: "CLIENTES ACTIVOS",
                value: stats.resumen.clientes.to_string(),
                detail: format!("{} Vendedores", stats.resumen.vendedores),
            },
            StatCard {
                label: "FACTURACIÓN TOTAL",
                value: format_cop(finanzas.total_facturado),
                detail: "Ventas registradas".into(),
            },
            StatCard {
                label: "RECAUDO",
                value: format_cop(finanzas.total_recaudado),
                detail: format!("{:.1}% de efectividad", finanzas.porcentaje_recaudo),
            },
            StatCard {
                label: "CARTERA PENDIENTE",
                value: format_cop(finanzas.cartera_pendiente),
                detail: "Cobros por realizar".into(),
            },
        ]
    }
}

impl DashboardPage<'_> {
    pub const VENTAS_POR_ANO: &'static str = "Ventas por Año Gravable";

    /// Summary line of the sales-per-year panel, from the first year the
    /// API reports: `Datos del 2024: $ 1.500.000`
    pub fn ventas_por_ano(stats: &DashboardStats) -> String {
        let first = stats.graficas.ventas_por_ano.first();
        let ano = first
            .and_then(|v| v.ano_gravable)
            .map(|a| a.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let total = first.map(|v| v.sum.valor_total).unwrap_or_default();
        format!("Datos del {}: {}", ano, format_cop(total))
    }
}

/// Colombian peso, no decimals, `.` as thousands separator: `$ 1.234.567`
pub fn format_cop(value: f64) -> String {
    let value = if value.is_finite() { value.round() } else { 0.0 };
    let digits = format!("{}", value.abs() as u64);

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if value < 0.0 {
        format!("-$ {}", grouped)
    } else {
        format!("$ {}", grouped)
    }
}
