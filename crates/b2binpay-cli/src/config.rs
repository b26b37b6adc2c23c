/*
[INPUT]:  YAML configuration file and B2BINPAY_* environment variables
[OUTPUT]: Parsed CLI configuration and adapter client settings
[POS]:    Configuration layer - client setup
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use b2binpay_adapter::{ClientConfig, Environment};
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Prefix of environment variables that override file values
pub const ENV_PREFIX: &str = "B2BINPAY";

/// Top-level configuration for the command line client
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    /// API key (login)
    #[serde(default)]
    pub key: Option<String>,
    /// API secret (password)
    #[serde(default)]
    pub secret: Option<String>,
    /// Talk to the sandbox gateway instead of production
    #[serde(default)]
    pub sandbox: bool,
    /// Explicit base URL, overrides `sandbox`
    #[serde(default)]
    pub api_url: Option<String>,
    /// Where the session snapshot is kept between runs
    #[serde(default)]
    pub session_file: Option<PathBuf>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            key: None,
            secret: None,
            sandbox: false,
            api_url: None,
            session_file: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CliConfig {
    /// Load the optional YAML file, then apply `B2BINPAY_*` overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::build(path, config::Environment::with_prefix(ENV_PREFIX))
    }

    pub(crate) fn build(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            let path_str = path.to_str().context("config path must be valid utf-8")?;
            builder = builder.add_source(File::new(path_str, FileFormat::Yaml));
        }
        builder = builder.add_source(env.try_parsing(true));

        builder
            .build()
            .context("read configuration sources")?
            .try_deserialize()
            .context("parse configuration")
    }

    /// Adapter client settings derived from this configuration
    pub fn client_config(&self) -> ClientConfig {
        let environment = if self.sandbox {
            Environment::Sandbox
        } else {
            Environment::Production
        };

        ClientConfig {
            environment,
            api_url: self.api_url.clone(),
            timeout: std::time::Duration::from_secs(self.timeout_secs),
            ..ClientConfig::default()
        }
    }

    /// Key/secret pair, if both are configured
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.key.as_deref(), self.secret.as_deref()) {
            (Some(key), Some(secret)) => Some((key, secret)),
            _ => None,
        }
    }
}
