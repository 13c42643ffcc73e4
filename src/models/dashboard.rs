use serde::Deserialize;

use super::{id, money, nullable};

/// Totals behind the dashboard cards. Missing figures read as zero.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub resumen: Resumen,
    pub finanzas: Finanzas,
    pub graficas: Graficas,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Resumen {
    pub clientes: u64,
    pub vendedores: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Finanzas {
    #[serde(deserialize_with = "money::deserialize")]
    pub total_facturado: f64,
    #[serde(deserialize_with = "money::deserialize")]
    pub total_recaudado: f64,
    #[serde(deserialize_with = "money::deserialize")]
    pub porcentaje_recaudo: f64,
    #[serde(deserialize_with = "money::deserialize")]
    pub cartera_pendiente: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Graficas {
    #[serde(deserialize_with = "nullable::deserialize")]
    pub ventas_por_ano: Vec<VentasPorAno>,
}

/// Billed total grouped by tax year
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VentasPorAno {
    #[serde(deserialize_with = "id::option")]
    pub ano_gravable: Option<i64>,
    #[serde(rename = "_sum", deserialize_with = "nullable::deserialize")]
    pub sum: SumaVentas,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SumaVentas {
    #[serde(deserialize_with = "money::deserialize")]
    pub valor_total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_payload_defaults_to_zero() {
        let stats: DashboardStats =
            serde_json::from_str(r#"{"resumen": {"clientes": 12}}"#).unwrap();

        assert_eq!(stats.resumen.clientes, 12);
        assert_eq!(stats.resumen.vendedores, 0);
        assert_eq!(stats.finanzas, Finanzas::default());
        assert!(stats.graficas.ventas_por_ano.is_empty());
    }

    #[test]
    fn reads_sales_per_tax_year() {
        let stats: DashboardStats = serde_json::from_str(
            r#"{"graficas": {"ventas_por_ano": [
                {"ano_gravable": 2024, "_sum": {"valor_total": "1500000.00"}},
                {"ano_gravable": 2023, "_sum": {"valor_total": 200}}
            ]}}"#,
        )
        .unwrap();

        let first = &stats.graficas.ventas_por_ano[0];
        assert_eq!(first.ano_gravable, Some(2024));
        assert_eq!(first.sum.valor_total, 1_500_000.0);
    }
}
