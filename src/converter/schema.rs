//!
//! Tool definition conversion between OpenAI and Anthropic formats.
//!
//! OpenAI wraps each tool in a `{type: "function", function: {...}}` envelope
//! and names the schema `parameters`; Anthropic keeps the tool flat and names
//! the schema `input_schema`. The OpenAI-only `strict` flag is supplied by the
//! caller on the way in and dropped on the way out.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use serde_json::{Value, json};

use crate::error::{ConvertError, Result};
use crate::types::{AnthropicTool, OpenAiFunctionDef, OpenAiTool};

/* --- start of code -------------------------------------------------------------------------- */

///
/// Schema used when a tool definition carries none.
pub fn default_schema() -> Value {
    json!({"type": "object", "properties": {}})
}

///
/// Convert an Anthropic tool definition to an OpenAI one.
///
/// # Arguments
///  * `tool` - Anthropic tool definition
///  * `strict` - value for the OpenAI `strict` flag
///
/// # Returns
///  * OpenAI tool definition
///  * `ConvertError::SchemaMissingName` if the tool has no name
pub fn anthropic_to_openai(tool: &AnthropicTool, strict: bool) -> Result<OpenAiTool> {
    let tool = complete_anthropic_tool(tool)?;
    Ok(OpenAiTool::function(OpenAiFunctionDef {
        name: tool.name,
        description: tool.description,
        parameters: tool.input_schema,
        strict: Some(strict),
    }))
}

///
/// Convert an OpenAI tool definition to an Anthropic one.
///
/// # Arguments
///  * `tool` - OpenAI tool definition
///
/// # Returns
///  * Anthropic tool definition
///  * `ConvertError::SchemaMissingName` if the function has no name
pub fn openai_to_anthropic(tool: &OpenAiTool) -> Result<AnthropicTool> {
    let function = &tool.function;
    require_name(&function.name)?;
    Ok(AnthropicTool {
        name: function.name.clone(),
        description: function.description.clone(),
        input_schema: Some(function.parameters.clone().unwrap_or_else(default_schema)),
    })
}

///
/// Check the name and fill in the default schema of an Anthropic tool.
pub fn complete_anthropic_tool(tool: &AnthropicTool) -> Result<AnthropicTool> {
    require_name(&tool.name)?;
    Ok(AnthropicTool {
        name: tool.name.clone(),
        description: tool.description.clone(),
        input_schema: Some(tool.input_schema.clone().unwrap_or_else(default_schema)),
    })
}

fn require_name(name: &str) -> Result<()> {
    if name.is_empty() { Err(ConvertError::SchemaMissingName) } else { Ok(()) }
}

/* --- tests ----------------------------------------------------------------------------------- */
