//! Configuration for the TWS client.
//!
//! Three layers, later ones winning: built-in defaults, then either a TOML
//! file or the environment, then command-line flags (applied in `main`).
//!
//! Environment variables:
//!
//! - `TWS_HOST`       (default: "127.0.0.1")
//! - `TWS_PORT`       (default: "7496")
//! - `TWS_CLIENT_ID`  (default: "0")
//! - `TWS_EXTRA_AUTH` (default: "false")
//!
//! Protocol thresholds (client version, minimum server version) are
//! constants of `tws-protocol`, not settings.

use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Deserialize;
use tws_protocol::SessionConfig;

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Host running TWS or the gateway.
    pub host: String,

    /// API port.
    pub port: u16,

    /// Identifies this client among those connected to the same server.
    pub client_id: i32,

    /// Hold the start request back until the server verifies the API.
    pub extra_auth: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "127.0.0.1".to_string(),
            port: 7496,
            client_id: 0,
            extra_auth: false,
        }
    }
}

impl Config {
    /// Construct a `Config` from environment variables, falling back
    /// to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] over any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        Ok(Config {
            host: lookup("TWS_HOST").unwrap_or(defaults.host),
            port: read_or_default(&lookup, "TWS_PORT", defaults.port)?,
            client_id: read_or_default(&lookup, "TWS_CLIENT_ID", defaults.client_id)?,
            extra_auth: read_or_default(&lookup, "TWS_EXTRA_AUTH", defaults.extra_auth)?,
        })
    }

    /// Load a TOML file. Keys it leaves out keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Convenience: `host:port` socket string.
    pub fn socket_addr_string(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Session settings derived from this config.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            client_id: self.client_id,
            extra_auth: self.extra_auth,
            ..SessionConfig::default()
        }
    }
}

fn read_or_default<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(val) => val
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {key}: {val:?}")),
        None => Ok(default),
    }
}
