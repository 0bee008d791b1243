//! Server configuration via `firetest.toml`
//!
//! Every field is optional; an empty file yields the defaults, which bind an
//! ephemeral loopback port.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

use crate::ServerError;

/// Config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "firetest.toml";

/// Server configuration loaded from `firetest.toml`.
///
/// # Example
///
/// ```toml
/// bind = "127.0.0.1:0"
/// fallback_bind = "[::1]:0"
/// log_filter = "firetest=info"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Primary listen address.
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
    /// Address tried when the primary bind fails. `None` disables the retry.
    #[serde(default = "default_fallback_bind")]
    pub fallback_bind: Option<SocketAddr>,
    /// Filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 0))
}

fn default_fallback_bind() -> Option<SocketAddr> {
    Some(SocketAddr::from((std::net::Ipv6Addr::LOCALHOST, 0)))
}

fn default_log_filter() -> String {
    "firetest=info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            fallback_bind: default_fallback_bind(),
            log_filter: default_log_filter(),
        }
    }
}

impl ServerConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Firetest server configuration
#
# Primary listen address. Port 0 picks a free ephemeral port.
bind = "127.0.0.1:0"

# Tried when the primary address cannot be bound (e.g. no IPv4 loopback).
fallback_bind = "[::1]:0"

# Log filter used when RUST_LOG is not set.
log_filter = "firetest=info"
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ServerError> {
        let content = std::fs::read_to_string(path).map_err(|e| ServerError::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ServerError::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<(), ServerError> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| ServerError::Config {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Load `path`, creating it with the default content first if missing.
    pub fn load_or_init(path: &Path) -> Result<Self, ServerError> {
        Self::write_default_if_missing(path)?;
        Self::from_file(path)
    }
}
