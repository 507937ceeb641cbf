use crate::units::{System, DEFAULT_PRECISION};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// File looked up in the working directory when no --config is given
pub const DEFAULT_CONFIG_FILE: &str = "rupantaran.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    // Decimal places used when a command gets no --precision
    #[serde(default = "default_precision")]
    pub precision: i32,

    #[serde(default)]
    pub output: OutputFormat,

    // System used by `mixed format` when --system is omitted
    #[serde(default)]
    pub default_system: Option<System>,
}

fn default_precision() -> i32 {
    DEFAULT_PRECISION
}

impl Default for Config {
    fn default() -> Self {
        Self::empty()
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::load_from_str(&content)
    }

    pub fn load_from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn empty() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            output: OutputFormat::Text,
            default_system: None,
        }
    }

    /// Load `path` if given, else `rupantaran.toml` when present, else defaults
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::load_from_file(fallback)
                } else {
                    Ok(Self::empty())
                }
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.precision < 0 {
            return Err(ConfigError::Invalid(format!(
                "precision must be non-negative, got {}",
                self.precision
            )));
        }
        Ok(())
    }
}
