//! Environment configuration for the API binary.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const HOST_VAR: &str = "STOCKBOOK_HOST";
pub const PORT_VAR: &str = "STOCKBOOK_PORT";
pub const DATA_FILE_VAR: &str = "STOCKBOOK_DATA_FILE";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_FILE: &str = "stockbook.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse {key}: {details}")]
    Parse { key: String, details: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Where the JSON snapshot lives.
    pub data_file: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var(HOST_VAR).unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let port = match std::env::var(PORT_VAR) {
            Ok(raw) => raw.trim().parse().map_err(|e| ConfigError::Parse {
                key: PORT_VAR.to_string(),
                details: format!("{e}"),
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let data_file = std::env::var(DATA_FILE_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_FILE));

        Ok(Self {
            host,
            port,
            data_file,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::Parse {
                key: HOST_VAR.to_string(),
                details: format!("{e}"),
            })
    }
}
