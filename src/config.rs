//! Configuration for SecureStego.
//!
//! Stored in `~/.securestego/config.toml`. Every field has a default, so a
//! missing file or a partial file is fine.
//!
//! ```toml
//! [embed]
//! format = "png"            # or "jpeg"
//! jpeg_quality = 75
//! resize_filter = "catmull-rom"
//! password_bytes = 12
//!
//! [keys]
//! bits = 2048
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crypto::{DEFAULT_KEY_BITS, DEFAULT_PASSWORD_BYTES, MIN_KEY_BITS};
use crate::encoder::EncoderConfig;

pub use crate::stego::{OutputFormat, ResizeFilter};

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config directory not found. Unable to determine home directory.")]
    NoConfigDir,

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),
}

/// Settings for key generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeySettings {
    /// RSA modulus size in bits.
    pub bits: usize,
}

impl Default for KeySettings {
    fn default() -> Self {
        Self {
            bits: DEFAULT_KEY_BITS,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub embed: EncoderConfig,
    pub keys: KeySettings,
}

impl Config {
    /// Load the configuration from the default location.
    ///
    /// Returns defaults if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load the configuration from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check value ranges that serde can't express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.embed.jpeg_quality) {
            return Err(ConfigError::Invalid(format!(
                "embed.jpeg_quality must be 1-100, got {}",
                self.embed.jpeg_quality
            )));
        }
        if self.embed.password_bytes < DEFAULT_PASSWORD_BYTES {
            return Err(ConfigError::Invalid(format!(
                "embed.password_bytes must be at least {}, got {}",
                DEFAULT_PASSWORD_BYTES, self.embed.password_bytes
            )));
        }
        if self.keys.bits < MIN_KEY_BITS {
            return Err(ConfigError::Invalid(format!(
                "keys.bits must be at least {}, got {}",
                MIN_KEY_BITS, self.keys.bits
            )));
        }
        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(get_config_dir()?.join("config.toml"))
    }
}

/// Get the SecureStego config directory (`~/.securestego`).
pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(".securestego"))
        .ok_or(ConfigError::NoConfigDir)
}
