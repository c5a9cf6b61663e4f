//! Forecaster configuration

use anyhow::Result;
use serde::Deserialize;

/// Forecaster configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ForecasterConfig {
    /// Instance name used in structured log events
    #[serde(default = "default_instance_name")]
    pub instance_name: String,

    /// HTTP API port
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Baseline demand fed to the synthetic exogenous source
    #[serde(default = "default_base_demand")]
    pub base_demand: f64,
}

fn default_instance_name() -> String {
    std::env::var("HOSTNAME").unwrap_or_else(|_| "forecaster".to_string())
}

fn default_api_port() -> u16 {
    8080
}

fn default_base_demand() -> f64 {
    100.0
}

impl ForecasterConfig {
    /// Load configuration from the environment
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("FORECASTER"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_else(|_| ForecasterConfig {
            instance_name: default_instance_name(),
            api_port: default_api_port(),
            base_demand: default_base_demand(),
        }))
    }
}
