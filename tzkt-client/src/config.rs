//! Configuration loading and default template generation.
//!
//! - [`Config`] — Request settings and per-network endpoint overrides.
//! - [`load_config`] — Reads and parses a TOML configuration file.
//! - [`generate_default_config`] — Produces a commented TOML template.
//!
//! # Configuration File Format
//!
//! ```toml
//! timeout_secs = 30
//!
//! [endpoints]
//! ghostnet = "http://localhost:5000/v1"
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;
use crate::network::NetworkId;

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Per-request timeout in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
    /// `User-Agent` header sent with every request.
    #[serde(default)]
    user_agent: Option<String>,
    /// Endpoint overrides keyed by network name or chain id.
    #[serde(default)]
    endpoints: BTreeMap<NetworkId, Url>,
}

const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            endpoints: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `User-Agent` header value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    /// Endpoint overrides.
    #[must_use]
    pub const fn endpoints(&self) -> &BTreeMap<NetworkId, Url> {
        &self.endpoints
    }
}

/// Load configuration from a TOML file at the given path.
///
/// # Errors
///
/// Returns [`Error::Config`] if the file cannot be resolved, read, or parsed.
pub fn load_config(path: &Path) -> Result<Config, Error> {
    let config_path = path.canonicalize().map_err(|e| {
        Error::config_with(
            format!("failed to resolve config path '{}'", path.display()),
            e,
        )
    })?;
    let content = std::fs::read_to_string(&config_path).map_err(|e| {
        Error::config_with(
            format!("failed to read config file '{}'", config_path.display()),
            e,
        )
    })?;
    toml::from_str(&content).map_err(|e| {
        Error::config_with(
            format!("failed to parse TOML config '{}'", config_path.display()),
            e,
        )
    })
}

/// Load the file at `path` if it exists, otherwise fall back to defaults.
///
/// # Errors
///
/// Returns [`Error::Config`] if an existing file cannot be read or parsed.
pub fn load_config_or_default(path: &Path) -> Result<Config, Error> {
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        Ok(Config::default())
    }
}

/// Generate a default TOML configuration template.
#[must_use]
pub fn generate_default_config() -> String {
    let mut config = String::from(
        r"# TzKT indexer client configuration
# https://api.tzkt.io

# Per-request timeout in seconds.
timeout_secs = 30

# User-Agent header sent with every request.
",
    );
    config.push_str(&format!("# user_agent = \"{DEFAULT_USER_AGENT}\"\n"));
    config.push_str(
        r#"
# ── Endpoint overrides ──────────────────────────────────────────────
# Keys are network names or chain ids; unlisted networks use the public
# TzKT deployment.

[endpoints]
# mainnet = "https://api.tzkt.io/v1"
# ghostnet = "https://api.ghostnet.tzkt.io/v1"
# "NetXooyhiru73tk" = "https://explorer.tlnt.net:8001/v1"
"#,
    );
    config
}
