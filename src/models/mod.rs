//! Records exchanged with the Exógena API.
//!
//! Identifiers are `i64` everywhere. The API is not consistent about
//! sending them as numbers or as numeric strings, so every id and foreign
//! key goes through [`id`] when deserialized. Amounts go through [`money`]
//! for the same reason, and text fields the API may send as `null` go
//! through [`nullable`].

pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod keys;
pub mod sales;

pub use auth::{LoginRequest, LoginResponse, Usuario};
pub use catalog::{Cliente, ClienteInput, ClienteOption, SerialErp, SerialInput, Vendedor, VendedorInput};
pub use dashboard::DashboardStats;
pub use keys::{ClaveGenerada, GenerarClaveRequest};
pub use sales::{Activacion, EstadoFinanciero, NuevoPago, Pago, PagoInput, Venta, VentaInput};

/// Lenient identifier deserialization: `7` and `"7"` both yield `7`.
pub mod id {
    use serde::{de::Error, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Num(i64),
        Text(String),
    }

    fn coerce<E: Error>(raw: RawId) -> Result<Option<i64>, E> {
        match raw {
            RawId::Num(n) => Ok(Some(n)),
            RawId::Text(s) if s.trim().is_empty() => Ok(None),
            RawId::Text(s) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| E::custom(format!("invalid identifier: {s:?}"))),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        coerce(RawId::deserialize(d)?)?.ok_or_else(|| D::Error::custom("empty identifier"))
    }

    /// `null`, a missing field and `""` all map to `None`.
    pub fn option<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        match Option::<RawId>::deserialize(d)? {
            Some(raw) => coerce(raw),
            None => Ok(None),
        }
    }
}

/// `null` reads as the field's default, the same as a missing key.
pub mod nullable {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(d: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
    }
}

/// Amounts come as numbers or as decimal strings (`"350000.00"`).
/// `null` and `""` read as zero.
pub mod money {
    use serde::{de::Error, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Num(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        match Option::<RawAmount>::deserialize(d)? {
            None => Ok(0.0),
            Some(RawAmount::Num(n)) => Ok(n),
            Some(RawAmount::Text(s)) if s.trim().is_empty() => Ok(0.0),
            Some(RawAmount::Text(s)) => s
                .trim()
                .parse()
                .map_err(|_| D::Error::custom(format!("invalid amount: {s:?}"))),
        }
    }
}

/// Timestamps arrive either as RFC 3339 or as a bare `YYYY-MM-DD`.
pub mod date {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{de::Error, Deserialize, Deserializer};

    pub fn parse(s: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }

    pub fn option<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(d)? {
            None => Ok(None),
            Some(s) if s.is_empty() => Ok(None),
            Some(s) => parse(&s)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid date: {s:?}"))),
        }
    }
}

/// Case-insensitive "contains" match across a record's searchable fields.
pub(crate) fn matches_any<'a>(query: &str, fields: impl IntoIterator<Item = Option<&'a str>>) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "id::deserialize")]
        id: i64,
        #[serde(default, deserialize_with = "id::option")]
        parent: Option<i64>,
    }

    #[test]
    fn ids_accept_numbers_and_numeric_strings() {
        let row: Row = serde_json::from_str(r#"{"id": "12", "parent": 3}"#).unwrap();
        assert_eq!(row.id, 12);
        assert_eq!(row.parent, Some(3));

        let row: Row = serde_json::from_str(r#"{"id": 4, "parent": ""}"#).unwrap();
        assert_eq!(row.id, 4);
        assert_eq!(row.parent, None);

        let row: Row = serde_json::from_str(r#"{"id": 5}"#).unwrap();
        assert_eq!(row.parent, None);
    }

    #[derive(Deserialize)]
    struct Line {
        #[serde(default, deserialize_with = "money::deserialize")]
        monto: f64,
        #[serde(default, deserialize_with = "nullable::deserialize")]
        nota: String,
    }

    #[test]
    fn amounts_accept_decimal_strings_and_nulls() {
        let line: Line = serde_json::from_str(r#"{"monto": "350000.00", "nota": null}"#).unwrap();
        assert_eq!(line.monto, 350000.0);
        assert_eq!(line.nota, "");

        let line: Line = serde_json::from_str(r#"{"monto": 1200}"#).unwrap();
        assert_eq!(line.monto, 1200.0);

        let line: Line = serde_json::from_str(r#"{"monto": null}"#).unwrap();
        assert_eq!(line.monto, 0.0);

        assert!(serde_json::from_str::<Line>(r#"{"monto": "mucho"}"#).is_err());
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        assert!(serde_json::from_str::<Row>(r#"{"id": "abc"}"#).is_err());
    }

    #[test]
    fn dates_accept_rfc3339_and_plain_days() {
        let full = date::parse("2025-03-01T15:30:00.000Z").unwrap();
        assert_eq!(full.to_rfc3339(), "2025-03-01T15:30:00+00:00");

        let day = date::parse("2025-03-01").unwrap();
        assert_eq!(day.format("%d/%m/%Y").to_string(), "01/03/2025");

        assert!(date::parse("01/03/2025").is_none());
    }

    #[test]
    fn search_is_case_insensitive_and_skips_missing_fields() {
        assert!(matches_any("acme", [None, Some("ACME S.A.S")]));
        assert!(!matches_any("zeta", [Some("acme"), None]));
        assert!(matches_any("  ", [None]));
    }
}
