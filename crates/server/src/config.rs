use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File as ConfigFile};
use serde::Deserialize;

pub const ENV_PREFIX: &str = "VISKOM";

const LOG_FORMATS: &[&str] = &["pretty", "compact"];

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: String,
    #[serde(default)]
    pub frontend_dist: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            frontend_dist: None,
        }
    }
}

impl ServerConfig {
    /// Layers defaults, an optional TOML file and `VISKOM_*` variables.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_format", defaults.log_format)?;

        if let Some(path) = config_path {
            if !path.exists() {
                bail!(
                    "Configuration file {} not found (specified via --config)",
                    path.display()
                );
            }
            builder = builder.add_source(ConfigFile::from(path));
        }

        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        let config: Self = builder
            .build()?
            .try_deserialize()
            .context("invalid server configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            bail!("port must be non-zero");
        }
        if !LOG_FORMATS.contains(&self.log_format.as_str()) {
            bail!(
                "unknown log format '{}' (expected one of {})",
                self.log_format,
                LOG_FORMATS.join(", ")
            );
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
