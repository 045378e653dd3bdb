//!
//! Configuration validation for chatmorph.
//!
//! Checks loaded values and configuration files and reports every finding as
//! a [`ValidationIssue`] instead of stopping at the first one. Whether an
//! issue is fatal is left to the caller.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use std::path::Path;

use crate::config::{Config, LogLevel};
use crate::format::ImageDetail;

/* --- types ----------------------------------------------------------------------------------- */

///
/// Configuration validation issue.
///
/// Represents a single problem found during a configuration check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Configuration field or file the issue is about
    pub field: String,
    /// Severity of the issue
    pub severity: ValidationSeverity,
    /// Description of the issue
    pub message: String,
    /// Optional suggestion for fixing the issue
    pub suggestion: Option<String>,
}

///
/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    /// Error - configuration is invalid and will cause failures
    Error,
    /// Warning - configuration works but has potential issues
    Warning,
    /// Info - informational note about configuration
    Info,
}

///
/// Collects validation issues for one configuration.
pub struct ConfigValidator<'a> {
    /// Configuration to validate
    config: &'a Config,
    /// Issues found so far
    issues: Vec<ValidationIssue>,
}

/* --- start of code -------------------------------------------------------------------------- */

impl ValidationIssue {
    fn new(field: &str, severity: ValidationSeverity, message: String) -> Self {
        Self { field: field.to_string(), severity, message, suggestion: None }
    }

    fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestion = Some(suggestion.to_string());
        self
    }

    /// True for issues that make the configuration unusable
    pub fn is_error(&self) -> bool {
        self.severity == ValidationSeverity::Error
    }
}

impl std::fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ValidationSeverity::Error => "ERROR",
            ValidationSeverity::Warning => "WARNING",
            ValidationSeverity::Info => "INFO",
        };
        f.write_str(label)
    }
}

impl<'a> ConfigValidator<'a> {
    ///
    /// Create a new configuration validator.
    ///
    /// # Arguments
    ///  * `config` - configuration to validate
    pub fn new(config: &'a Config) -> Self {
        Self { config, issues: Vec::new() }
    }

    ///
    /// Check every configuration section.
    ///
    /// # Returns
    ///  * all issues found, most severe first
    pub fn validate(mut self) -> Vec<ValidationIssue> {
        self.validate_logging();
        self.validate_conversion();

        self.issues.sort_by_key(|issue| issue.severity);
        tracing::debug!(issues = self.issues.len(), "configuration validation completed");
        self.issues
    }

    fn validate_logging(&mut self) {
        if self.config.logging.level == LogLevel::Trace {
            self.issues.push(
                ValidationIssue::new(
                    "logging.level",
                    ValidationSeverity::Info,
                    "trace logging reports every message expansion on stderr".to_string(),
                )
                .with_suggestion("Use \"warn\" or \"info\" for everyday use"),
            );
        }
    }

    fn validate_conversion(&mut self) {
        let conversion = &self.config.conversion;

        if conversion.strict_tools {
            self.issues.push(
                ValidationIssue::new(
                    "conversion.strict_tools",
                    ValidationSeverity::Warning,
                    "strict tool definitions are rejected by OpenAI unless every schema sets \
                     additionalProperties to false and marks all properties as required"
                        .to_string(),
                )
                .with_suggestion("Leave strict_tools = false unless your tool schemas are strict-ready"),
            );
        }

        if conversion.image_detail == ImageDetail::High {
            self.issues.push(
                ValidationIssue::new(
                    "conversion.image_detail",
                    ValidationSeverity::Info,
                    "high image detail costs more input tokens per image".to_string(),
                )
                .with_suggestion("Use \"auto\" to let the model decide"),
            );
        }
    }
}

///
/// Check that a configuration file can be read and parsed.
///
/// Missing files are not reported; every layer of the configuration is
/// optional.
///
/// # Arguments
///  * `path` - configuration file to check
///
/// # Returns
///  * issues found for the file, empty when the file is usable or absent
pub fn validate_config_file<P: AsRef<Path>>(path: P) -> Vec<ValidationIssue> {
    let path = path.as_ref();
    let field = path.display().to_string();

    if !path.exists() {
        return Vec::new();
    }

    if !path.is_file() {
        return vec![ValidationIssue::new(
            &field,
            ValidationSeverity::Error,
            "configuration path exists but is not a regular file".to_string(),
        )];
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            return vec![
                ValidationIssue::new(
                    &field,
                    ValidationSeverity::Error,
                    format!("configuration file cannot be read: {}", e),
                )
                .with_suggestion("Check the file permissions, e.g. chmod 644"),
            ];
        }
    };

    match toml::from_str::<toml::Table>(&contents) {
        Ok(table) => unknown_sections(&field, &table),
        Err(e) => vec![
            ValidationIssue::new(
                &field,
                ValidationSeverity::Error,
                format!("configuration file is not valid TOML: {}", e),
            )
            .with_suggestion("Run 'chatmorph config example' to see the expected layout"),
        ],
    }
}

fn unknown_sections(field: &str, table: &toml::Table) -> Vec<ValidationIssue> {
    const SECTIONS: [&str; 3] = ["logging", "conversion", "output"];

    table
        .keys()
        .filter(|key| !SECTIONS.contains(&key.as_str()))
        .map(|key| {
            ValidationIssue::new(
                field,
                ValidationSeverity::Warning,
                format!("unknown section '{}' is ignored", key),
            )
            .with_suggestion("Known sections are [logging], [conversion] and [output]")
        })
        .collect()
}

/* --- tests ----------------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_has_no_issues() {
        let issues = ConfigValidator::new(&Config::default()).validate();
        assert!(issues.is_empty(), "unexpected issues: {:?}", issues);
    }

    #[test]
    fn test_strict_tools_is_warned_about() {
        let mut config = Config::default();
        config.conversion.strict_tools = true;
        config.conversion.image_detail = ImageDetail::High;

        let issues = ConfigValidator::new(&config).validate();

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].field, "conversion.strict_tools");
        assert_eq!(issues[0].severity, ValidationSeverity::Warning);
        assert_eq!(issues[1].severity, ValidationSeverity::Info);
        assert!(!issues.iter().any(ValidationIssue::is_error));
    }

    #[test]
    fn test_missing_file_is_not_an_issue() {
        assert!(validate_config_file("/non/existent/chatmorph.toml").is_empty());
    }

    #[test]
    fn test_invalid_toml_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("config.toml");
        fs::write(&file, "[conversion\nstrict_tools = true\n").unwrap();

        let issues = validate_config_file(&file);

        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert!(issues[0].message.contains("not valid TOML"));
    }

    #[test]
    fn test_directory_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let issues = validate_config_file(temp_dir.path());
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
    }

    #[test]
    fn test_unknown_section_is_a_warning() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("config.toml");
        fs::write(&file, "[server]\nport = 3000\n").unwrap();

        let issues = validate_config_file(&file);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, ValidationSeverity::Warning);
        assert!(issues[0].message.contains("server"));
    }
}
