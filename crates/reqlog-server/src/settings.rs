//! Configuracion del servidor.
//!
//! Sources, from lowest to highest precedence:
//! 1. built-in defaults
//! 2. an optional file (`reqlog.toml`, or the path in `REQLOG_CONFIG`)
//! 3. `REQLOG_*` environment variables (`REQLOG_SKIP_PATHS` is comma separated)

use std::net::SocketAddr;

use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;

use crate::error::ServerError;

const ENV_PREFIX: &str = "REQLOG";
const CONFIG_PATH_VAR: &str = "REQLOG_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "reqlog";

/// Output format of the process logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Logger settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub format: LogFormat,
}

/// Server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    /// Paths that bypass request logging.
    pub skip_paths: Vec<String>,
}

impl Settings {
    /// Loads settings from defaults, the config file and the environment.
    pub fn load() -> Result<Self, ServerError> {
        let path =
            std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let config = defaults()?
            .add_source(File::with_name(&path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("skip_paths"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Loads settings from defaults overlaid with a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ServerError> {
        let config = defaults()?
            .add_source(File::from_str(content, config::FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Returns the socket address to listen on.
    pub fn address(&self) -> Result<SocketAddr, ServerError> {
        let address = format!("{}:{}", self.host, self.port);
        address
            .parse()
            .map_err(|source| ServerError::InvalidAddress { address, source })
    }

    /// Returns the logger settings.
    pub fn log(&self) -> LogSettings {
        LogSettings {
            level: self.log_level.clone(),
            format: self.log_format,
        }
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ServerError> {
    Ok(Config::builder()
        .set_default("host", "0.0.0.0")?
        .set_default("port", 3000_i64)?
        .set_default("log_level", "debug")?
        .set_default("log_format", "json")?
        .set_default("skip_paths", Vec::<String>::new())?)
}
