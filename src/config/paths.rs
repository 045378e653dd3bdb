//!
//! Platform-native path resolution for chatmorph configuration.
//!
//! - Linux/Unix: XDG Base Directory Specification (~/.config/chatmorph)
//! - macOS: ~/Library/Application Support/chatmorph
//! - Windows: %APPDATA%/chatmorph
//!
//! Nothing here creates directories; a converter run should not touch the
//! filesystem beyond reading its inputs.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{ConvertError, Result};

/* --- constants ------------------------------------------------------------------------------- */

/// Application name for directory resolution
const APP_NAME: &str = "chatmorph";
/// Organization qualifier for directory resolution
const ORGANIZATION: &str = "com";
/// Organization name for directory resolution
const ORG_NAME: &str = "SkyCorp";
/// File name of every configuration layer
const CONFIG_FILE_NAME: &str = "config.toml";

/* --- start of code -------------------------------------------------------------------------- */

///
/// Get the user configuration directory.
///
/// # Returns
///  * `Ok(PathBuf)` - path to the user configuration directory
///  * `ConvertError::Config` - no home directory could be determined
pub fn user_config_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().to_path_buf())
}

/// Get the system-wide configuration directory
pub fn system_config_dir() -> Result<PathBuf> {
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        Ok(PathBuf::from("/etc").join(APP_NAME))
    }

    #[cfg(target_os = "macos")]
    {
        Ok(PathBuf::from("/Library/Preferences").join(APP_NAME))
    }

    #[cfg(windows)]
    {
        std::env::var("PROGRAMDATA").map(|path| PathBuf::from(path).join(APP_NAME)).map_err(|_| {
            ConvertError::Config("PROGRAMDATA environment variable not found".to_string())
        })
    }
}

/// Path of the user configuration file
pub fn user_config_file() -> Result<PathBuf> {
    Ok(user_config_dir()?.join(CONFIG_FILE_NAME))
}

/// Path of the system configuration file
pub fn system_config_file() -> Result<PathBuf> {
    Ok(system_config_dir()?.join(CONFIG_FILE_NAME))
}

///
/// Expand `~` and environment variables in a path.
///
/// # Arguments
///  * `path` - path that may contain `~`, `$VAR` or `${VAR}`
///
/// # Returns
///  * `Ok(PathBuf)` - expanded path
///  * `ConvertError::Config` - a referenced variable is not set
///
/// # Examples
/// ```rust
/// let expanded = chatmorph::config::paths::expand_path("/etc/chatmorph/config.toml")?;
/// assert_eq!(expanded, std::path::PathBuf::from("/etc/chatmorph/config.toml"));
/// # Ok::<(), chatmorph::ConvertError>(())
/// ```
pub fn expand_path<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path_str = path.as_ref().to_string_lossy();

    let expanded = shellexpand::full(&path_str).map_err(|e| {
        ConvertError::Config(format!("Failed to expand path '{}': {}", path_str, e))
    })?;

    Ok(PathBuf::from(expanded.as_ref()))
}

///
/// Get all configuration file paths in precedence order.
///
/// # Returns
///  * paths from highest to lowest priority: user file, then system file
pub fn config_file_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(user_config) = user_config_file() {
        paths.push(user_config);
    }

    if let Ok(system_config) = system_config_file() {
        paths.push(system_config);
    }

    paths
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(ORGANIZATION, ORG_NAME, APP_NAME).ok_or_else(|| {
        ConvertError::Config(
            "Unable to determine user directories. Please ensure your user account has a \
             valid home directory."
                .to_string(),
        )
    })
}

/* --- tests ----------------------------------------------------------------------------------- */
