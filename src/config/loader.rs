//!
//! Configuration loading for chatmorph.
//!
//! Builds a [`Config`] from defaults, configuration files and environment
//! variables. Files are read as partial layers so that only the keys a file
//! actually sets override the layers below it.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use std::collections::BTreeMap;
use std::env;
use std::path::Path;

use serde::Deserialize;

use crate::config::{Config, LogLevel, paths};
use crate::error::{ConvertError, Result};
use crate::format::ImageDetail;

/* --- types ----------------------------------------------------------------------------------- */

///
/// Configuration loader implementing the Builder pattern.
///
/// Each `with_*` call applies one layer on top of the previous ones, so the
/// call order is the precedence order.
pub struct ConfigLoader {
    /// Current configuration being built
    config: Config,
    /// Environment variable overrides collected
    env_overrides: BTreeMap<String, String>,
    /// Whether defaults have been applied
    defaults_applied: bool,
}

/// One configuration file; absent keys leave lower layers untouched
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigLayer {
    logging: LoggingLayer,
    conversion: ConversionLayer,
    output: OutputLayer,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoggingLayer {
    level: Option<LogLevel>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConversionLayer {
    image_detail: Option<ImageDetail>,
    strict_tools: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OutputLayer {
    pretty: Option<bool>,
}

/* --- constants ------------------------------------------------------------------------------ */

/** prefix of every environment variable the loader reads */
const ENV_PREFIX: &str = "CHATMORPH_";

/* --- implementations --------------------------------------------------------------------- */

impl ConfigLoader {
    ///
    /// Create a new configuration loader.
    ///
    /// # Examples
    /// ```rust,no_run
    /// use chatmorph::config::loader::ConfigLoader;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = ConfigLoader::new()
    ///     .with_defaults()
    ///     .with_user_config()?
    ///     .with_env_vars()?
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new() -> Self {
        Self { config: Config::default(), env_overrides: BTreeMap::new(), defaults_applied: false }
    }

    /// Apply built-in default values
    pub fn with_defaults(mut self) -> Self {
        self.config = Config::default();
        self.defaults_applied = true;
        self
    }

    ///
    /// Load the system-wide configuration file if it exists.
    ///
    /// # Returns
    ///  * `Ok(Self)` - system config loaded or skipped (file not found)
    ///  * `Err(ConvertError)` - system config exists but failed to load
    pub fn with_system_config(mut self) -> Result<Self> {
        let system_config_path = paths::system_config_file()?;

        if system_config_path.exists() {
            tracing::debug!("Loading system config from: {}", system_config_path.display());
            self.load_config_file(&system_config_path)?;
        } else {
            tracing::trace!("System config not found at: {}", system_config_path.display());
        }

        Ok(self)
    }

    ///
    /// Load the user configuration file if it exists.
    ///
    /// A missing home directory is treated like a missing file.
    pub fn with_user_config(mut self) -> Result<Self> {
        let user_config_path = match paths::user_config_file() {
            Ok(path) => path,
            Err(e) => {
                tracing::debug!("Skipping user config: {}", e);
                return Ok(self);
            }
        };

        if user_config_path.exists() {
            tracing::debug!("Loading user config from: {}", user_config_path.display());
            self.load_config_file(&user_config_path)?;
        } else {
            tracing::trace!("User config not found at: {}", user_config_path.display());
        }

        Ok(self)
    }

    ///
    /// Load configuration from a specific file.
    ///
    /// Unlike the system and user layers, the file must exist.
    ///
    /// # Arguments
    ///  * `path` - configuration file to load
    ///
    /// # Returns
    ///  * `Ok(Self)` - config loaded successfully
    ///  * `ConvertError::Config` - missing, unreadable or invalid file
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConvertError::Config(format!(
                "Configuration file '{}' does not exist or is not a regular file",
                path.display()
            )));
        }

        tracing::debug!("Loading custom config from: {}", path.display());
        self.load_config_file(path)?;
        Ok(self)
    }

    ///
    /// Apply environment variable overrides.
    ///
    /// Supported environment variables:
    /// - CHATMORPH_LOG_LEVEL
    /// - CHATMORPH_IMAGE_DETAIL
    /// - CHATMORPH_STRICT_TOOLS
    /// - CHATMORPH_OUTPUT_PRETTY
    ///
    /// # Returns
    ///  * `Ok(Self)` - environment variables applied
    ///  * `ConvertError::Config` - invalid environment variable values
    pub fn with_env_vars(mut self) -> Result<Self> {
        tracing::debug!("Loading configuration from environment variables");

        for (key, value) in env::vars() {
            if key.starts_with(ENV_PREFIX) {
                self.env_overrides.insert(key, value);
            }
        }

        self.apply_env_overrides()?;
        Ok(self)
    }

    ///
    /// Build the final configuration.
    ///
    /// # Returns
    ///  * `Ok(Config)` - fully-loaded configuration
    ///  * `ConvertError::Config` - `with_defaults()` was never called
    pub fn build(self) -> Result<Config> {
        if !self.defaults_applied {
            return Err(ConvertError::Config(
                "Configuration loader must call with_defaults() before build()".to_string(),
            ));
        }

        tracing::debug!(
            "Final config: logging.level={:?}, conversion.image_detail={}, conversion.strict_tools={}, output.pretty={}",
            self.config.logging.level,
            self.config.conversion.image_detail,
            self.config.conversion.strict_tools,
            self.config.output.pretty
        );

        Ok(self.config)
    }

    /* --- private methods ----------------------------------------------------------------- */

    /// Load and merge one TOML layer
    fn load_config_file(&mut self, path: &Path) -> Result<()> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ConvertError::Config(format!(
                "Failed to read configuration file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let layer: ConfigLayer = toml::from_str(&contents).map_err(|e| {
            ConvertError::Config(format!(
                "Failed to parse TOML configuration file '{}': {}\n\
                 \n\
                 Run 'chatmorph config example' to see the expected layout.",
                path.display(),
                e
            ))
        })?;

        self.merge_layer(layer);
        tracing::debug!("Successfully loaded config from: {}", path.display());
        Ok(())
    }

    fn merge_layer(&mut self, layer: ConfigLayer) {
        if let Some(level) = layer.logging.level {
            self.config.logging.level = level;
        }
        if let Some(image_detail) = layer.conversion.image_detail {
            self.config.conversion.image_detail = image_detail;
        }
        if let Some(strict_tools) = layer.conversion.strict_tools {
            self.config.conversion.strict_tools = strict_tools;
        }
        if let Some(pretty) = layer.output.pretty {
            self.config.output.pretty = pretty;
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        for (key, value) in &self.env_overrides {
            match key.as_str() {
                "CHATMORPH_LOG_LEVEL" => {
                    self.config.logging.level = value.parse()?;
                }
                "CHATMORPH_IMAGE_DETAIL" => {
                    self.config.conversion.image_detail = value.parse()?;
                }
                "CHATMORPH_STRICT_TOOLS" => {
                    self.config.conversion.strict_tools = parse_bool_env(value, key)?;
                }
                "CHATMORPH_OUTPUT_PRETTY" => {
                    self.config.output.pretty = parse_bool_env(value, key)?;
                }
                _ => {
                    tracing::debug!("Ignoring unknown environment variable: {}", key);
                }
            }
        }

        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/* --- utility functions ------------------------------------------------------------------- */

/// Parse boolean value from environment variable
fn parse_bool_env(value: &str, var_name: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" | "enabled" => Ok(true),
        "false" | "no" | "0" | "off" | "disabled" => Ok(false),
        _ => Err(ConvertError::Config(format!(
            "Invalid boolean value for {}: '{}'\n\
             Valid values: true/false, yes/no, 1/0, on/off, enabled/disabled",
            var_name, value
        ))),
    }
}

/* --- tests ------------------------------------------------------------------------------- */
