use serde::{Deserialize, Serialize};

/// Identity of the logged-in operator as returned by `/auth/login`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Usuario {
    #[serde(deserialize_with = "super::id::deserialize")]
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Anything else the API sends (role, flags, ...) is kept as-is
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Usuario {
    /// Name shown in greetings, falling back to a generic label
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|n| !n.is_empty()).unwrap_or("Usuario")
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// `token` is optional on the wire; its absence is a failed login
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub usuario: Option<Usuario>,
    pub token: Option<String>,
}
