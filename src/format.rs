//!
//! Wire format identifiers and caller-supplied conversion options.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};

/* --- types ----------------------------------------------------------------------------------- */

///
/// Supported chat payload formats.
///
/// Tags are case-sensitive: only `"openai"` and `"anthropic"` parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// OpenAI chat-completions shape
    OpenAi,
    /// Anthropic messages shape
    Anthropic,
}

///
/// Image detail hint attached to OpenAI `image_url` parts.
///
/// Anthropic images carry no equivalent, so the value is configured by the
/// caller rather than derived from the payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageDetail {
    #[default]
    Auto,
    Low,
    High,
}

///
/// Options that fill in fields one format has and the other lacks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /** detail hint for images produced in OpenAI format */
    #[serde(default)]
    pub image_detail: ImageDetail,
    /** value of the `strict` flag on tool definitions produced in OpenAI format */
    #[serde(default)]
    pub strict_tools: bool,
}

/* --- start of code -------------------------------------------------------------------------- */

impl Format {
    /// The wire tag for this format
    pub fn as_str(self) -> &'static str {
        match self {
            Format::OpenAi => "openai",
            Format::Anthropic => "anthropic",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "openai" => Ok(Format::OpenAi),
            "anthropic" => Ok(Format::Anthropic),
            _ => Err(ConvertError::InvalidFormat(s.to_string())),
        }
    }
}

impl ImageDetail {
    /// The wire value for this hint
    pub fn as_str(self) -> &'static str {
        match self {
            ImageDetail::Auto => "auto",
            ImageDetail::Low => "low",
            ImageDetail::High => "high",
        }
    }
}

impl fmt::Display for ImageDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageDetail {
    type Err = ConvertError;

    /// Parse from string (case-insensitive)
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ImageDetail::Auto),
            "low" => Ok(ImageDetail::Low),
            "high" => Ok(ImageDetail::High),
            _ => Err(ConvertError::Config(format!(
                "Invalid image detail '{}'. Valid values are: auto, low, high",
                s
            ))),
        }
    }
}

impl ConvertOptions {
    pub fn with_image_detail(mut self, image_detail: ImageDetail) -> Self {
        self.image_detail = image_detail;
        self
    }

    pub fn with_strict_tools(mut self, strict_tools: bool) -> Self {
        self.strict_tools = strict_tools;
        self
    }
}

/* --- tests ----------------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tags_are_case_sensitive() {
        assert_eq!("openai".parse::<Format>().unwrap(), Format::OpenAi);
        assert_eq!("anthropic".parse::<Format>().unwrap(), Format::Anthropic);
        assert!(matches!("OpenAI".parse::<Format>(), Err(ConvertError::InvalidFormat(_))));
        assert!(matches!("claude".parse::<Format>(), Err(ConvertError::InvalidFormat(_))));
    }

    #[test]
    fn test_image_detail_parsing() {
        assert_eq!("HIGH".parse::<ImageDetail>().unwrap(), ImageDetail::High);
        assert_eq!(ImageDetail::default(), ImageDetail::Auto);
        assert!("medium".parse::<ImageDetail>().is_err());
    }

    #[test]
    fn test_default_options() {
        let options = ConvertOptions::default();
        assert_eq!(options.image_detail, ImageDetail::Auto);
        assert!(!options.strict_tools);
    }
}
