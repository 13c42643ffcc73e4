//! Runtime configuration, read from the environment (and `.env`).

use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const API_URL_VAR: &str = "EXOGENA_API_URL";
pub const DATA_DIR_VAR: &str = "EXOGENA_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    /// Holds the session entries and the `logs/` directory
    pub data_dir: PathBuf,
}

impl Config {
    /// Load `.env` if present, then read the environment
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup(API_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let data_dir = lookup(DATA_DIR_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        Self { api_url, data_dir }
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Exogena")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_api_url_falls_back_to_local_development() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.data_dir.ends_with("Exogena"));
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = Config::from_lookup(|key| match key {
            API_URL_VAR => Some("https://api.example.test/api".into()),
            DATA_DIR_VAR => Some("/tmp/exogena".into()),
            _ => None,
        });
        assert_eq!(config.api_url, "https://api.example.test/api");
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/exogena/logs"));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = Config::from_lookup(|_| Some("  ".into()));
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }
}
