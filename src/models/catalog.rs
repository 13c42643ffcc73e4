//! Clients, sellers and the ERP serials licensed to each client.

use serde::{Deserialize, Serialize};

use super::{id, matches_any, nullable};

/// Seller name as embedded in client and sale records
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VendedorRef {
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub nombre: String,
}

/// Client identification as embedded in serial, sale and activation records
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ClienteRef {
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub razon_social: String,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub nit: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Cliente {
    #[serde(deserialize_with = "id::deserialize")]
    pub id: i64,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub nit: String,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub razon_social: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default, deserialize_with = "id::option")]
    pub vendedor_id: Option<i64>,
    #[serde(default = "active", deserialize_with = "nullable::deserialize")]
    pub activo: bool,
    #[serde(default)]
    pub vendedores: Option<VendedorRef>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub seriales_erp: Vec<serde_json::Value>,
}

impl Cliente {
    pub fn vendedor_nombre(&self) -> Option<&str> {
        self.vendedores.as_ref().map(|v| v.nombre.as_str())
    }

    pub fn serial_count(&self) -> usize {
        self.seriales_erp.len()
    }

    pub fn matches(&self, query: &str) -> bool {
        matches_any(
            query,
            [
                Some(self.nit.as_str()),
                Some(self.razon_social.as_str()),
                self.email.as_deref(),
                self.vendedor_nombre(),
            ],
        )
    }
}

/// Form payload for creating or editing a client
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClienteInput {
    #[serde(skip)]
    pub id: Option<i64>,
    pub nit: String,
    pub razon_social: String,
    pub email: String,
    pub telefono: String,
    pub direccion: String,
    pub vendedor_id: Option<i64>,
    pub activo: bool,
}

impl Default for ClienteInput {
    fn default() -> Self {
        Self {
            id: None,
            nit: String::new(),
            razon_social: String::new(),
            email: String::new(),
            telefono: String::new(),
            direccion: String::new(),
            vendedor_id: None,
            activo: true,
        }
    }
}

impl From<&Cliente> for ClienteInput {
    fn from(c: &Cliente) -> Self {
        Self {
            id: Some(c.id),
            nit: c.nit.clone(),
            razon_social: c.razon_social.clone(),
            email: c.email.clone().unwrap_or_default(),
            telefono: c.telefono.clone().unwrap_or_default(),
            direccion: c.direccion.clone().unwrap_or_default(),
            vendedor_id: c.vendedor_id,
            activo: c.activo,
        }
    }
}

/// Entry of a client selector: `"{nit} - {razon_social}"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClienteOption {
    pub label: String,
    pub value: i64,
}

impl From<&Cliente> for ClienteOption {
    fn from(c: &Cliente) -> Self {
        Self {
            label: format!("{} - {}", c.nit, c.razon_social),
            value: c.id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ClientCount {
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub clientes: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Vendedor {
    #[serde(deserialize_with = "id::deserialize")]
    pub id: i64,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub nombre: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default = "active", deserialize_with = "nullable::deserialize")]
    pub activo: bool,
    #[serde(default, rename = "_count", deserialize_with = "nullable::deserialize")]
    pub count: ClientCount,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendedorInput {
    #[serde(skip)]
    pub id: Option<i64>,
    pub nombre: String,
    pub email: String,
    pub telefono: String,
    pub activo: bool,
}

impl Default for VendedorInput {
    fn default() -> Self {
        Self {
            id: None,
            nombre: String::new(),
            email: String::new(),
            telefono: String::new(),
            activo: true,
        }
    }
}

impl From<&Vendedor> for VendedorInput {
    fn from(v: &Vendedor) -> Self {
        Self {
            id: Some(v.id),
            nombre: v.nombre.clone(),
            email: v.email.clone().unwrap_or_default(),
            telefono: v.telefono.clone().unwrap_or_default(),
            activo: v.activo,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SerialErp {
    #[serde(deserialize_with = "id::deserialize")]
    pub id: i64,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub serial_erp: String,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub nombre_software: String,
    #[serde(default, deserialize_with = "id::option")]
    pub cliente_id: Option<i64>,
    #[serde(default = "active", deserialize_with = "nullable::deserialize")]
    pub activo: bool,
    #[serde(default)]
    pub clientes: Option<ClienteRef>,
}

impl SerialErp {
    pub fn matches(&self, query: &str) -> bool {
        let cliente = self.clientes.as_ref();
        matches_any(
            query,
            [
                Some(self.serial_erp.as_str()),
                Some(self.nombre_software.as_str()),
                cliente.map(|c| c.razon_social.as_str()),
                cliente.map(|c| c.nit.as_str()),
            ],
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SerialInput {
    #[serde(skip)]
    pub id: Option<i64>,
    pub serial_erp: String,
    pub nombre_software: String,
    pub cliente_id: Option<i64>,
    pub activo: bool,
}

impl Default for SerialInput {
    fn default() -> Self {
        Self {
            id: None,
            serial_erp: String::new(),
            nombre_software: String::new(),
            cliente_id: None,
            activo: true,
        }
    }
}

impl From<&SerialErp> for SerialInput {
    fn from(s: &SerialErp) -> Self {
        Self {
            id: Some(s.id),
            serial_erp: s.serial_erp.clone(),
            nombre_software: s.nombre_software.clone(),
            cliente_id: s.cliente_id,
            activo: s.activo,
        }
    }
}

fn active() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_edit_form_coerces_string_seller_id() {
        let json = r#"{
            "id": "3", "nit": "900123", "razon_social": "Acme",
            "vendedor_id": "8", "activo": false,
            "vendedores": {"nombre": "Laura"},
            "seriales_erp": [{}, {}]
        }"#;
        let cliente: Cliente = serde_json::from_str(json).unwrap();
        let form = ClienteInput::from(&cliente);

        assert_eq!(form.id, Some(3));
        assert_eq!(form.vendedor_id, Some(8));
        assert!(!form.activo);
        assert_eq!(cliente.serial_count(), 2);
        assert!(cliente.matches("laura"));
    }

    #[test]
    fn input_payload_omits_id() {
        let form = ClienteInput {
            id: Some(3),
            nit: "1".into(),
            razon_social: "X".into(),
            ..Default::default()
        };
        let body = serde_json::to_value(&form).unwrap();
        assert!(body.get("id").is_none());
        assert_eq!(body["activo"], true);
    }

    #[test]
    fn client_option_label() {
        let cliente: Cliente =
            serde_json::from_str(r#"{"id": 1, "nit": "900", "razon_social": "Acme"}"#).unwrap();
        let option = ClienteOption::from(&cliente);
        assert_eq!(option.label, "900 - Acme");
        assert_eq!(option.value, 1);
    }

    #[test]
    fn seller_reads_client_count() {
        let v: Vendedor =
            serde_json::from_str(r#"{"id": 2, "nombre": "Laura", "_count": {"clientes": 4}}"#).unwrap();
        assert_eq!(v.count.clientes, 4);
        assert!(v.activo);
    }
}
