//!
//! CLI configuration commands for chatmorph.
//!
//! - `config show` - display the effective configuration
//! - `config path` - list configuration file locations
//! - `config example` - print a documented example file
//! - `config validate` - check files and values
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::validation::{self, ValidationIssue, ValidationSeverity};
use crate::config::{Config, paths};
use crate::error::Result;

/* --- types ----------------------------------------------------------------------------------- */

///
/// CLI configuration command handler.
///
/// Every command writes to the given writer so the output can be captured.
pub struct ConfigCli;

/* --- implementations --------------------------------------------------------------------- */

impl ConfigCli {
    ///
    /// Handle the `config show` command.
    ///
    /// Prints the effective configuration after merging all sources as TOML,
    /// followed by the files that were considered.
    pub fn show<W: Write>(out: &mut W, explicit: Option<&Path>) -> Result<()> {
        let config = Config::load(explicit)?;

        writeln!(out, "# Effective chatmorph configuration")?;
        writeln!(out)?;
        write!(out, "{}", config.to_toml()?)?;
        writeln!(out)?;
        writeln!(out, "# Configuration sources (highest priority first):")?;
        writeln!(out, "#   environment variables (CHATMORPH_*)")?;
        for path in Self::candidate_files(explicit)? {
            let status = if path.exists() { "found" } else { "not found" };
            writeln!(out, "#   {} ({})", path.display(), status)?;
        }

        Ok(())
    }

    ///
    /// Handle the `config path` command.
    ///
    /// Prints one configuration file location per line, highest priority
    /// first.
    pub fn path<W: Write>(out: &mut W) -> Result<()> {
        for path in paths::config_file_paths() {
            writeln!(out, "{}", path.display())?;
        }
        Ok(())
    }

    /// Handle the `config example` command
    pub fn example<W: Write>(out: &mut W) -> Result<()> {
        write!(out, "{}", Config::example_toml())?;
        Ok(())
    }

    ///
    /// Handle the `config validate` command.
    ///
    /// Checks every configuration file that exists, then the merged values.
    ///
    /// # Returns
    ///  * `Ok(true)` - no errors were found (warnings are allowed)
    ///  * `Ok(false)` - at least one error was found
    ///  * `Err(ConvertError)` - the report could not be written
    pub fn validate<W: Write>(out: &mut W, explicit: Option<&Path>) -> Result<bool> {
        let mut issues: Vec<ValidationIssue> = Self::candidate_files(explicit)?
            .iter()
            .flat_map(validation::validate_config_file)
            .collect();

        if let Some(path) = explicit {
            let expanded = paths::expand_path(path)?;
            if !expanded.exists() {
                issues.push(ValidationIssue {
                    field: expanded.display().to_string(),
                    severity: ValidationSeverity::Error,
                    message: "configuration file given with --config does not exist".to_string(),
                    suggestion: None,
                });
            }
        }

        // values are only meaningful once every file parses
        if !issues.iter().any(ValidationIssue::is_error) {
            match Config::load(explicit) {
                Ok(config) => issues.extend(config.validate()),
                Err(e) => issues.push(ValidationIssue {
                    field: "environment".to_string(),
                    severity: ValidationSeverity::Error,
                    message: e.to_string(),
                    suggestion: Some("Check the CHATMORPH_* environment variables".to_string()),
                }),
            }
        }

        Self::report(out, &issues)?;
        Ok(!issues.iter().any(ValidationIssue::is_error))
    }

    /* --- private helper methods ---------------------------------------------------------- */

    fn candidate_files(explicit: Option<&Path>) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        if let Some(path) = explicit {
            files.push(paths::expand_path(path)?);
        }
        files.extend(paths::config_file_paths());
        Ok(files)
    }

    fn report<W: Write>(out: &mut W, issues: &[ValidationIssue]) -> Result<()> {
        if issues.is_empty() {
            writeln!(out, "[OK] Configuration is valid")?;
            return Ok(());
        }

        for issue in issues {
            writeln!(out, "[{}] {}: {}", issue.severity, issue.field, issue.message)?;
            if let Some(suggestion) = &issue.suggestion {
                writeln!(out, "    [TIP] {}", suggestion)?;
            }
        }

        let errors = issues.iter().filter(|issue| issue.is_error()).count();
        if errors == 0 {
            writeln!(out, "[OK] Configuration has {} note(s) but is valid", issues.len())?;
        } else {
            writeln!(out, "[ERROR] Configuration has {} error(s)", errors)?;
        }
        Ok(())
    }
}

/* --- tests ----------------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_example_output() {
        let mut out = Vec::new();
        ConfigCli::example(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[conversion]"));
        assert!(text.contains("CHATMORPH_STRICT_TOOLS"));
    }

    #[test]
    fn test_validate_reports_broken_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("broken.toml");
        fs::write(&file, "[logging]\nlevel = \n").unwrap();

        let mut out = Vec::new();
        let valid = ConfigCli::validate(&mut out, Some(&file)).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(!valid);
        assert!(text.contains("[ERROR]"));
        assert!(text.contains("broken.toml"));
    }

    #[test]
    fn test_validate_reports_missing_explicit_file() {
        let mut out = Vec::new();
        let valid =
            ConfigCli::validate(&mut out, Some(Path::new("/non/existent/chatmorph.toml"))).unwrap();
        assert!(!valid);
        assert!(String::from_utf8(out).unwrap().contains("does not exist"));
    }
}
