//! Server configuration from the environment.
//!
//! - `HOST` (default `0.0.0.0`) and `PORT` (default `8080`): bind address.
//! - `DATA_FILE`: JSON snapshot path; unset keeps state in memory only.
//! - `STATIC_DIR`: directory served at `/` (e.g. a built admin/display front-end).

use std::path::PathBuf;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_file: Option<PathBuf>,
    pub static_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_file: None,
            static_dir: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid PORT {raw:?}, using {}", default_port());
                default_port()
            }),
            None => default_port(),
        };
        Self {
            host: get("HOST").unwrap_or_else(default_host),
            port,
            data_file: get("DATA_FILE").map(PathBuf::from),
            static_dir: get("STATIC_DIR").map(PathBuf::from),
        }
    }
}
