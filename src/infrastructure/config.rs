// src/infrastructure/config.rs
use crate::constants::{
    DEFAULT_BIND_ADDRESS, DEFAULT_COMPLETION_ENDPOINT, DEFAULT_MODEL, DEFAULT_PORT,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// TOML configuration for the flashgen service
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CompletionConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Usually supplied through `OPENAI_API_KEY` rather than the file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

// Default value functions
fn default_bind() -> String { DEFAULT_BIND_ADDRESS.to_string() }
fn default_port() -> u16 { DEFAULT_PORT }
fn default_endpoint() -> String { DEFAULT_COMPLETION_ENDPOINT.to_string() }
fn default_model() -> String { DEFAULT_MODEL.to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            organization: None,
            project: None,
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Create default configuration file at path
    pub fn create_default(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit path must exist. Without one, the file under the user config
    /// directory is used when present, otherwise the defaults. Environment
    /// variables are applied last.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => {
                debug!(?path, "Using provided config file");
                Self::load(path)?
            }
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => {
                    debug!(?path, "Using config file from user config directory");
                    Self::load(&path)?
                }
                None => {
                    info!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Override settings from environment-style lookups.
    ///
    /// Empty values are ignored; a port that does not parse keeps the previous value.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = var("OPENAI_API_KEY") {
            self.completion.api_key = Some(key);
        }
        if let Some(org) = var("OPENAI_ORG") {
            self.completion.organization = Some(org);
        }
        if let Some(project) = var("OPENAI_PROJECT") {
            self.completion.project = Some(project);
        }
        if let Some(model) = var("FLASHGEN_MODEL") {
            self.completion.model = model;
        }
        if let Some(endpoint) = var("FLASHGEN_ENDPOINT") {
            self.completion.endpoint = endpoint;
        }
        if let Some(bind) = var("FLASHGEN_BIND") {
            self.server.bind = bind;
        }
        if let Some(port) = var("FLASHGEN_PORT") {
            if let Some(port) = parse_or_warn("FLASHGEN_PORT", &port) {
                self.server.port = port;
            }
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.server.bind, self.server.port)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("flashgen").join("config.toml"))
}

fn parse_or_warn<T: FromStr>(key: &str, value: &str) -> Option<T>
where
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value '{value}': {e}, keeping previous setting");
        })
        .ok()
}
