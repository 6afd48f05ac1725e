use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::simulation::{ParameterError, SimulationParameters};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Extract(#[from] Box<figment::Error>),
    #[error("invalid [pv_sim] parameters: {0}")]
    Parameters(#[from] ParameterError),
}

/// Config file used when `PVSIM_CONFIG` is not set
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub redis: RedisConfig,
    pub pv_sim: PvSimConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub db: i64,
    #[serde(default)]
    pub password: Option<String>,
}

impl RedisConfig {
    pub fn url(&self) -> String {
        match self.password.as_deref().filter(|p| !p.is_empty()) {
            Some(password) => format!(
                "redis://:{}@{}:{}/{}",
                password, self.host, self.port, self.db
            ),
            None => format!("redis://{}:{}/{}", self.host, self.port, self.db),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PvSimConfig {
    pub input_stream: String,
    pub output_stream: String,
    #[serde(flatten)]
    pub parameters: SimulationParameters,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceConfig {
    /// Emit a liveness line this often while waiting for input; off when unset
    #[serde(default)]
    pub idle_log_seconds: Option<u64>,
}

impl ServiceConfig {
    pub fn idle_log_interval(&self) -> Option<Duration> {
        self.idle_log_seconds
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path =
            std::env::var("PVSIM_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let figment = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("PVSIM__").split("__"));
        Self::from_figment(figment).with_context(|| format!("loading configuration from {path}"))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let cfg: Config = figment.extract().map_err(Box::new)?;
        cfg.pv_sim.parameters.validate()?;
        Ok(cfg)
    }
}
