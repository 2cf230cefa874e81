//! Configuration for the Outlook provider.
//!
//! Settings are layered, later sources winning:
//!   built-in defaults
//!   ~/.config/calbridge/outlook.toml
//!   AZURE_* environment variables (the names the Azure SDKs read)
//!   CALBRIDGE_* environment variables

use anyhow::{Context, Result};
use config::{Config, Environment, File, Map};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_GRAPH_ENDPOINT: &str = "https://graph.microsoft.com/v1.0";
pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

fn default_graph_endpoint() -> String {
    DEFAULT_GRAPH_ENDPOINT.to_string()
}

fn default_authority_host() -> String {
    DEFAULT_AUTHORITY_HOST.to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OutlookConfig {
    #[serde(default = "default_graph_endpoint")]
    pub graph_endpoint: String,

    #[serde(default = "default_authority_host")]
    pub authority_host: String,

    #[serde(default)]
    pub tenant_id: Option<String>,

    #[serde(default)]
    pub client_id: Option<String>,

    #[serde(default)]
    pub client_secret: Option<String>,

    /// Pre-acquired bearer token. Takes priority over client credentials.
    #[serde(default)]
    pub access_token: Option<String>,
}

impl Default for OutlookConfig {
    fn default() -> Self {
        OutlookConfig {
            graph_endpoint: default_graph_endpoint(),
            authority_host: default_authority_host(),
            tenant_id: None,
            client_id: None,
            client_secret: None,
            access_token: None,
        }
    }
}

impl OutlookConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Could not determine config directory")?
            .join("calbridge")
            .join("outlook.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path` (optional) plus the process environment.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::load_layered(path, None)
    }

    /// Layer `path` under the environment. `env` replaces the process
    /// environment when given.
    fn load_layered(path: &Path, env: Option<Map<String, String>>) -> Result<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("AZURE").source(env.clone()))
            .add_source(Environment::with_prefix("CALBRIDGE").source(env))
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?
            .try_deserialize()
            .context("Invalid configuration")
    }
}
