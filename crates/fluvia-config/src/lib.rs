//! YAML configuration for the Fluvia daemon.
//!
//! ```yaml
//! ipfix:
//!   address: "203.0.113.10"
//!   port: 4739
//!   ingress-interface: "eth0"
//!   interval: 10
//! ```

pub mod error;

use std::path::Path;

use serde::Deserialize;

pub use error::{ConfigError, Result};

fn default_interval() -> u64 {
    10
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    pub ipfix: IpfixConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IpfixConfig {
    pub address: String,
    pub port: u16,
    #[serde(rename = "ingress-interface")]
    pub ingress_interface: String,
    /// Export interval in seconds. The upstream daemon hardcodes this; we
    /// make it configurable and default to its value.
    #[serde(default = "default_interval")]
    pub interval: u64,
}

impl Config {
    /// Reads and decodes a configuration file. Any failure here is fatal
    /// at startup.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }
}
