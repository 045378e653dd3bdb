//!
//! Configuration management for chatmorph.
//!
//! Configuration is layered, lowest priority first:
//! 1. Built-in defaults
//! 2. System config file (/etc/chatmorph/config.toml)
//! 3. User config file (~/.config/chatmorph/config.toml)
//! 4. Explicit `--config` file
//! 5. `CHATMORPH_*` environment variables
//!
//! - `loader.rs` - layer loading and merging
//! - `paths.rs` - platform-native path resolution
//! - `validation.rs` - configuration checks
//! - `cli.rs` - `chatmorph config` commands
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- modules --------------------------------------------------------------------------------- */

pub mod cli;
pub mod loader;
pub mod paths;
pub mod validation;

/* --- uses ------------------------------------------------------------------------------------ */

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};
use crate::format::{ConvertOptions, ImageDetail};

pub use validation::{ValidationIssue, ValidationSeverity};

/* --- types ----------------------------------------------------------------------------------- */

///
/// Main application configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Diagnostic logging configuration
    pub logging: LoggingConfig,
    /// Defaults for conversion options
    pub conversion: ConversionConfig,
    /// JSON output configuration
    pub output: OutputConfig,
}

///
/// Diagnostic logging configuration.
///
/// Logs always go to stderr; `RUST_LOG` overrides the level when set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level written to stderr
    pub level: LogLevel,
}

///
/// Conversion defaults, overridable per invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Detail hint for images produced in OpenAI format
    pub image_detail: ImageDetail,
    /// `strict` flag for tool definitions produced in OpenAI format
    pub strict_tools: bool,
}

///
/// JSON output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    pub pretty: bool,
}

///
/// Logging level enumeration.
///
/// Defines available log levels compatible with the tracing crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/* --- implementations --------------------------------------------------------------------- */

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: LogLevel::Warn }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl Config {
    ///
    /// Load configuration from the standard hierarchy.
    ///
    /// # Arguments
    ///  * `explicit` - optional config file given on the command line; `~` and
    ///    environment variables are expanded
    ///
    /// # Returns
    ///  * `Ok(Config)` - merged configuration
    ///  * `ConvertError::Config` - a present layer failed to load
    ///
    /// # Examples
    /// ```rust,no_run
    /// use chatmorph::config::Config;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = Config::load(None)?;
    /// println!("image detail: {}", config.conversion.image_detail);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut loader =
            loader::ConfigLoader::new().with_defaults().with_system_config()?.with_user_config()?;

        if let Some(path) = explicit {
            loader = loader.with_config_file(paths::expand_path(path)?)?;
        }

        loader.with_env_vars()?.build()
    }

    /// Conversion options carried by this configuration
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions::default()
            .with_image_detail(self.conversion.image_detail)
            .with_strict_tools(self.conversion.strict_tools)
    }

    ///
    /// Validate the current configuration.
    ///
    /// # Returns
    ///  * all issues found, most severe first; empty when everything looks fine
    pub fn validate(&self) -> Vec<ValidationIssue> {
        validation::ConfigValidator::new(self).validate()
    }

    /// Serialize as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ConvertError::Config(format!("Failed to serialize configuration: {}", e)))
    }

    ///
    /// Get a documented example configuration file.
    pub fn example_toml() -> &'static str {
        r#"# chatmorph configuration
# This file should be placed at:
#   Linux/Unix: ~/.config/chatmorph/config.toml
#   macOS: ~/Library/Application Support/com.SkyCorp.chatmorph/config.toml
#   Windows: %APPDATA%/SkyCorp/chatmorph/config/config.toml

[logging]
# Logging level written to stderr: trace, debug, info, warn, error (default: warn)
# RUST_LOG takes precedence when set.
level = "warn"

[conversion]
# Detail hint for images converted to OpenAI format: auto, low, high (default: auto)
image_detail = "auto"

# Value of the OpenAI "strict" flag on converted tool definitions (default: false)
strict_tools = false

[output]
# Pretty-print JSON output (default: true)
pretty = true

# Every setting can also come from the environment (including a .env file):
# CHATMORPH_LOG_LEVEL=debug
# CHATMORPH_IMAGE_DETAIL=high
# CHATMORPH_STRICT_TOOLS=true
# CHATMORPH_OUTPUT_PRETTY=false
"#
    }
}

impl LogLevel {
    /// Lowercase name, usable as an `EnvFilter` directive
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = ConvertError;

    /// Parse from string (case-insensitive)
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConvertError::Config(format!(
                "Invalid log level '{}'. Valid levels are: trace, debug, info, warn, error",
                s
            ))),
        }
    }
}

/* --- tests ----------------------------------------------------------------------------------- */
