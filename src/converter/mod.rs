//!
//! Format conversion between OpenAI and Anthropic request shapes.
//!
//! Each direction lives in its own module and implements [`FormatConverter`].
//! Callers obtain a converter through [`select`] and never name the concrete
//! types. The `schema` and `content` modules hold the per-entry mappings both
//! directions share.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- modules --------------------------------------------------------------------------------- */

pub mod anthropic_to_openai;
pub mod content;
pub mod openai_to_anthropic;
pub mod schema;

/* --- uses ------------------------------------------------------------------------------------ */

use serde_json::Value;
use tracing::debug;

use crate::error::{ConvertError, Result};
use crate::format::{ConvertOptions, Format};
use crate::types::AnthropicTool;

pub use anthropic_to_openai::AnthropicToOpenAiConverter;
pub use openai_to_anthropic::OpenAiToAnthropicConverter;

/* --- types ----------------------------------------------------------------------------------- */

///
/// A converter for one direction between the two formats.
///
/// Implementations are stateless apart from their options, so a single
/// instance can be shared across threads.
pub trait FormatConverter: Send + Sync {
    /// Format the converter reads
    fn source(&self) -> Format;

    /// Format the converter produces
    fn target(&self) -> Format;

    ///
    /// Convert a whole request payload.
    ///
    /// # Arguments
    ///  * `request` - request JSON object in the source format
    ///
    /// # Returns
    ///  * request JSON object in the target format
    fn convert_request(&self, request: &Value) -> Result<Value>;

    ///
    /// Convert a single message.
    ///
    /// One source message can expand into several target messages, so the
    /// result is always a list.
    fn convert_message(&self, message: &Value) -> Result<Vec<Value>>;

    /// Convert a single tool definition
    fn convert_tool_schema(&self, tool: &Value) -> Result<Value>;
}

///
/// Format-neutral tool description used by [`format_tool_schemas`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToolSpec {
    /** tool name, must not be empty */
    pub name: String,
    /** human readable description */
    pub description: Option<String>,
    /** JSON schema of the tool input */
    pub schema: Option<Value>,
}

/* --- start of code -------------------------------------------------------------------------- */

///
/// Select the converter for a direction, using default options.
///
/// # Arguments
///  * `source` - source format name, `"openai"` or `"anthropic"`
///  * `target` - target format name, `"openai"` or `"anthropic"`
///
/// # Returns
///  * converter for the direction
///  * `ConvertError::UnsupportedDirection` for any other pair
pub fn select(source: &str, target: &str) -> Result<Box<dyn FormatConverter>> {
    select_with_options(source, target, ConvertOptions::default())
}

///
/// Select the converter for a direction with explicit options.
///
/// Format names are matched case-sensitively.
///
/// # Arguments
///  * `source` - source format name
///  * `target` - target format name
///  * `options` - options handed to the converter
///
/// # Returns
///  * converter for the direction
///  * `ConvertError::UnsupportedDirection` for any other pair
pub fn select_with_options(
    source: &str,
    target: &str,
    options: ConvertOptions,
) -> Result<Box<dyn FormatConverter>> {
    let converter: Box<dyn FormatConverter> =
        match (source.parse::<Format>(), target.parse::<Format>()) {
            (Ok(Format::OpenAi), Ok(Format::Anthropic)) => {
                Box::new(OpenAiToAnthropicConverter::new())
            }
            (Ok(Format::Anthropic), Ok(Format::OpenAi)) => {
                Box::new(AnthropicToOpenAiConverter::new(options))
            }
            _ => {
                return Err(ConvertError::UnsupportedDirection {
                    from: source.to_string(),
                    to: target.to_string(),
                });
            }
        };

    debug!(source = %converter.source(), target = %converter.target(), "selected converter");
    Ok(converter)
}

///
/// Render format-neutral tool descriptions as tool definitions of one format.
///
/// # Arguments
///  * `target` - format name of the output, `"openai"` or `"anthropic"`
///  * `tools` - tools to render
///  * `options` - supplies the OpenAI `strict` flag
///
/// # Returns
///  * one tool definition per input, in order
///  * `ConvertError::InvalidFormat` for an unknown target
///  * `ConvertError::SchemaMissingName` if a tool has no name
pub fn format_tool_schemas(
    target: &str,
    tools: &[ToolSpec],
    options: &ConvertOptions,
) -> Result<Vec<Value>> {
    let target: Format = target.parse()?;

    tools
        .iter()
        .map(|spec| -> Result<Value> {
            let tool = AnthropicTool {
                name: spec.name.clone(),
                description: spec.description.clone(),
                input_schema: spec.schema.clone(),
            };
            let rendered = match target {
                Format::OpenAi => {
                    serde_json::to_value(schema::anthropic_to_openai(&tool, options.strict_tools)?)?
                }
                Format::Anthropic => serde_json::to_value(schema::complete_anthropic_tool(&tool)?)?,
            };
            Ok(rendered)
        })
        .collect()
}

/* --- tests ----------------------------------------------------------------------------------- */
