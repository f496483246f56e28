//! Configuration management for the Agora backend

use serde::Deserialize;
use std::env;
use std::fs;

use crate::error::{AgoraError, Result};

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub chain: ChainConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct ChainConfig {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
        }
    }
}

fn default_port() -> u16 {
    5000
}

fn default_rpc_url() -> String {
    "https://mainnet.infura.io/v3/YOUR_INFURA_KEY".to_string()
}

/// Load configuration from `config.toml` (optional), then apply environment
/// overrides: `PORT` for the HTTP server, `AGORA_RPC_URL` for the chain
/// endpoint. A `PORT` value that does not parse as u16 is ignored.
pub fn load_config() -> Result<Config> {
    let config_str = fs::read_to_string("config.toml").unwrap_or_default();
    let mut config: Config = if config_str.is_empty() {
        Config {
            server: ServerConfig::default(),
            chain: ChainConfig::default(),
        }
    } else {
        toml::from_str(&config_str)
            .map_err(|e| AgoraError::Config(format!("config.toml: {}", e)))?
    };

    if let Some(port) = env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        config.server.port = port;
    }
    if let Ok(url) = env::var("AGORA_RPC_URL") {
        config.chain.rpc_url = url;
    }

    // Validate critical values
    if config.chain.rpc_url.is_empty() {
        return Err(AgoraError::Config(
            "chain.rpc_url must be set in config.toml".to_string(),
        ));
    }
    if !config.chain.rpc_url.starts_with("http://") && !config.chain.rpc_url.starts_with("https://")
    {
        return Err(AgoraError::Config(format!(
            "chain.rpc_url must be an http(s) URL, got {}",
            config.chain.rpc_url
        )));
    }

    Ok(config)
}
