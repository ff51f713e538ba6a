use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// JSON-RPC endpoint of the node the gateway reads from.
#[derive(Debug, Deserialize, Clone)]
pub struct RpcSettings {
    pub url: String,
}

/// Gateway behaviour.
#[derive(Debug, Deserialize, Clone)]
pub struct GatewaySettings {
    /// Network label stamped on every snapshot
    #[serde(default = "default_network")]
    pub network: String,
    /// Deadline for one pool fetch, covering every sub-call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_network() -> String {
    "mainnet".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            network: default_network(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl GatewaySettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Root application configuration.
///
/// Sources, later ones winning:
/// - an optional `config.{yaml,toml,json}` file
/// - `POOLGATE__`-prefixed environment variables, e.g. `POOLGATE__RPC__URL`
/// - `ETH_RPC_URL`, which overrides `rpc.url`
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub rpc: RpcSettings,
    #[serde(default)]
    pub gateway: GatewaySettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_file("config")
    }

    /// Load settings using `name` as the base name of the config file.
    pub fn from_file(name: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name(name).required(false))
            .add_source(
                Environment::with_prefix("POOLGATE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override_option("rpc.url", std::env::var("ETH_RPC_URL").ok())?
            .build()?;

        let settings: Settings = s.try_deserialize()?;

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn parse(yaml: &str) -> Result<Settings, ConfigError> {
        Config::builder()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_gateway_defaults() {
        let settings = parse("rpc:\n  url: http://localhost:8545\n").unwrap();

        assert_eq!(settings.rpc.url, "http://localhost:8545");
        assert_eq!(settings.gateway.network, "mainnet");
        assert_eq!(settings.gateway.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_gateway_overrides() {
        let settings = parse(
            "rpc:\n  url: http://node:8545\ngateway:\n  network: sepolia\n  request_timeout_secs: 5\n",
        )
        .unwrap();

        assert_eq!(settings.gateway.network, "sepolia");
        assert_eq!(settings.gateway.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_rpc_url_is_required() {
        assert!(parse("gateway:\n  network: mainnet\n").is_err());
    }
}
