//! Configuration management for `issue_tracker`.
//!
//! Configuration sources and precedence (highest wins):
//! 1. CLI overrides
//! 2. Environment variables (`ISSUES_*`)
//! 3. Config file (`--config <path>`, else `./issue-tracker.yaml`)
//! 4. Defaults

use crate::error::{Result, TrackerError};
use crate::logging::LogFormat;
use crate::validation::DEFAULT_MAX_PAGE_SIZE;
use serde::Serialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILENAME: &str = "issue-tracker.yaml";
/// Environment variable prefix.
pub const ENV_PREFIX: &str = "ISSUES_";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;

/// A flat key/value configuration layer. Keys are normalized to kebab-case
/// and sectioned YAML aliases (`server.port`) fold into their flat names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLayer {
    pub values: HashMap<String, String>,
}

impl ConfigLayer {
    /// Set a key, normalizing it first.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(normalize_key(key), value.into());
    }

    /// Merge another layer on top of this one (higher precedence wins).
    pub fn merge_from(&mut self, other: &Self) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Merge multiple layers in precedence order (lowest to highest).
    #[must_use]
    pub fn merge_layers(layers: &[Self]) -> Self {
        let mut merged = Self::default();
        for layer in layers {
            merged.merge_from(layer);
        }
        merged
    }

    /// Build a layer from a YAML file path. Missing files return empty config.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn from_yaml(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Build a layer from YAML text. Nested mappings flatten with `.`.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid YAML.
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(contents)?;
        let mut flat = HashMap::new();
        flatten_yaml(&value, "", &mut flat);

        let mut layer = Self::default();
        for (key, value) in flat {
            layer.set(&key, value);
        }
        Ok(layer)
    }

    /// Build a layer from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_vars(env::vars())
    }

    /// Build a layer from `ISSUES_*` variables, e.g. `ISSUES_MAX_PAGE_SIZE`
    /// becomes `max-page-size`.
    #[must_use]
    pub fn from_env_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut layer = Self::default();
        for (key, value) in vars {
            if let Some(stripped) = key.strip_prefix(ENV_PREFIX) {
                layer.set(stripped, value);
            }
        }
        layer
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&normalize_key(key)).map(String::as_str)
    }
}

/// CLI overrides for config loading (optional).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub no_seed: Option<bool>,
    pub max_page_size: Option<i64>,
}

impl CliOverrides {
    #[must_use]
    pub fn as_layer(&self) -> ConfigLayer {
        let mut layer = ConfigLayer::default();

        if let Some(host) = &self.host {
            layer.set("host", host.clone());
        }
        if let Some(port) = self.port {
            layer.set("port", port.to_string());
        }
        if self.no_seed == Some(true) {
            layer.set("seed", "false");
        }
        if let Some(max_page_size) = self.max_page_size {
            layer.set("max-page-size", max_page_size.to_string());
        }

        layer
    }
}

/// Default config layer (lowest precedence).
#[must_use]
pub fn default_config_layer() -> ConfigLayer {
    let mut layer = ConfigLayer::default();
    layer.set("host", DEFAULT_HOST);
    layer.set("port", DEFAULT_PORT.to_string());
    layer.set("seed", "true");
    layer.set("max-page-size", DEFAULT_MAX_PAGE_SIZE.to_string());
    layer.set("log-format", LogFormat::default().as_str());
    layer
}

/// Load configuration with the documented precedence order.
///
/// An explicit `config_path` must exist; the default file is optional.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or parsed.
pub fn load_config(config_path: Option<&Path>, cli: &CliOverrides) -> Result<ConfigLayer> {
    let file_layer = match config_path {
        Some(path) => {
            if !path.exists() {
                return Err(TrackerError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            ConfigLayer::from_yaml(path)?
        }
        None => ConfigLayer::from_yaml(&PathBuf::from(DEFAULT_CONFIG_FILENAME))?,
    };

    Ok(ConfigLayer::merge_layers(&[
        default_config_layer(),
        file_layer,
        ConfigLayer::from_env(),
        cli.as_layer(),
    ]))
}

/// Resolved service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Load the sample issues before serving.
    pub seed: bool,
    /// Largest `pageSize` accepted by `GET /issues`.
    pub max_page_size: i64,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            seed: true,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            log_format: LogFormat::default(),
        }
    }
}

impl ServerConfig {
    /// Load and resolve configuration in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or a value is invalid.
    pub fn load(config_path: Option<&Path>, cli: &CliOverrides) -> Result<Self> {
        let layer = load_config(config_path, cli)?;
        Self::from_layer(&layer)
    }

    /// Resolve typed settings from a merged layer. Unset keys keep defaults.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Config` if any value fails to parse.
    pub fn from_layer(layer: &ConfigLayer) -> Result<Self> {
        let mut config = Self::default();

        if let Some(host) = layer.get("host") {
            let host = host.trim();
            if host.is_empty() {
                return Err(TrackerError::Config("host cannot be empty".to_string()));
            }
            config.host = host.to_string();
        }
        if let Some(port) = layer.get("port") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| TrackerError::Config(format!("invalid port: {port}")))?;
        }
        if let Some(seed) = layer.get("seed") {
            config.seed = parse_bool(seed)
                .ok_or_else(|| TrackerError::Config(format!("invalid boolean for seed: {seed}")))?;
        }
        if let Some(size) = layer.get("max-page-size") {
            config.max_page_size = size
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|size| *size >= 1)
                .ok_or_else(|| TrackerError::Config(format!("invalid max-page-size: {size}")))?;
        }
        if let Some(format) = layer.get("log-format") {
            config.log_format = format.parse()?;
        }

        Ok(config)
    }

    /// `host:port` suitable for binding.
    #[must_use]
    pub fn bind_address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

fn normalize_key(key: &str) -> String {
    let key = key.trim().to_lowercase().replace('_', "-");
    match key.as_str() {
        "server.host" => "host".to_string(),
        "server.port" => "port".to_string(),
        "server.seed" => "seed".to_string(),
        "server.max-page-size" => "max-page-size".to_string(),
        "logging.format" => "log-format".to_string(),
        _ => key,
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

fn flatten_yaml(value: &serde_yaml::Value, prefix: &str, out: &mut HashMap<String, String>) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (key, value) in map {
                let Some(key_str) = key.as_str() else {
                    continue;
                };
                let next_prefix = if prefix.is_empty() {
                    key_str.to_string()
                } else {
                    format!("{prefix}.{key_str}")
                };
                flatten_yaml(value, &next_prefix, out);
            }
        }
        _ => {
            if let Some(value) = yaml_scalar_to_string(value) {
                out.insert(prefix.to_string(), value);
            }
        }
    }
}

fn yaml_scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Bool(v) => Some(v.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Null
        | serde_yaml::Value::Sequence(_)
        | serde_yaml::Value::Mapping(_) => None,
        serde_yaml::Value::Tagged(tagged) => yaml_scalar_to_string(&tagged.value),
    }
}
