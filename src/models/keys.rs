use serde::{Deserialize, Serialize};

/// Body of `POST /generar-clave`; the serial is forwarded untouched
#[derive(Debug, Serialize)]
pub struct GenerarClaveRequest<'a> {
    pub serial: &'a str,
}

/// License key computed by the API for an encoded serial
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaveGenerada {
    #[serde(rename = "serialERP", default, deserialize_with = "super::nullable::deserialize")]
    pub serial_erp: String,
    #[serde(default)]
    pub ano_medios: serde_json::Value,
    #[serde(default, deserialize_with = "super::nullable::deserialize")]
    pub mac_servidor: String,
    pub clave_generada: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_camel_case_result() {
        let json = r#"{
            "serialERP": "SER-1", "anoMedios": 2025,
            "macServidor": "AA:BB", "claveGenerada": "KEY-123"
        }"#;
        let clave: ClaveGenerada = serde_json::from_str(json).unwrap();

        assert_eq!(clave.serial_erp, "SER-1");
        assert_eq!(clave.ano_medios, 2025);
        assert_eq!(clave.mac_servidor, "AA:BB");
        assert_eq!(clave.clave_generada, "KEY-123");
    }
}
