//!
//! Anthropic messages wire types.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::types::common::{MessageContent, Role, content_kind, unknown_kind};

/* --- types ----------------------------------------------------------------------------------- */

///
/// Anthropic messages request structure.
///
/// System instructions live in a request-level `system` field instead of in
/// the message list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicRequest {
    /** conversation messages, in conversation order */
    pub messages: Vec<Value>,
    /** request-level system prompt */
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<Value>,
    /** tool definitions available to the model */
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Value>>,
    /** every other request parameter, untouched */
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

///
/// Anthropic message structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicMessage {
    /** message role: user or assistant */
    pub role: Role,
    /** message content, string or content blocks */
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<MessageContent>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

///
/// Anthropic content block.
///
/// Supports text, image, tool usage and tool result blocks with proper
/// tagging for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicContentBlock {
    /** text content block */
    Text {
        /** the text content */
        text: String,
    },
    /** inline image block */
    Image {
        /** image source information */
        source: ImageSource,
    },
    /** tool usage block for function calls */
    ToolUse {
        /** tool call identifier */
        id: String,
        /** function name */
        name: String,
        /** function input arguments as a JSON object */
        input: Value,
    },
    /** tool result block for function responses */
    ToolResult {
        /** corresponding tool use identifier */
        tool_use_id: String,
        /** tool execution result, copied verbatim */
        #[serde(default = "empty_result")]
        content: Value,
    },
}

///
/// Image source information for Anthropic image blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSource {
    /** source type identifier, "base64" for inline data */
    #[serde(rename = "type")]
    pub source_type: String,
    /** MIME type such as image/png */
    #[serde(default)]
    pub media_type: String,
    /** base64 encoded image bytes */
    #[serde(default)]
    pub data: String,
}

///
/// Anthropic tool definition for function calling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnthropicTool {
    /** function name */
    #[serde(default)]
    pub name: String,
    /** function description */
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /** function input schema */
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<Value>,
}

/* --- constants ------------------------------------------------------------------------------ */

/** content block kinds the converters understand */
const BLOCK_KINDS: [&str; 4] = ["text", "image", "tool_use", "tool_result"];

/* --- start of code -------------------------------------------------------------------------- */

fn empty_result() -> Value {
    Value::String(String::new())
}

impl AnthropicMessage {
    /// Message whose content is a list of already-encoded blocks
    pub fn with_blocks(role: Role, blocks: Vec<Value>) -> Self {
        Self { role, content: Some(MessageContent::Entries(blocks)), extra: Map::new() }
    }

    /// Message with plain string content
    pub fn with_text(role: Role, text: String) -> Self {
        Self { role, content: Some(MessageContent::Text(text)), extra: Map::new() }
    }
}

impl AnthropicContentBlock {
    ///
    /// Decode a raw content block, rejecting kinds this crate does not model.
    ///
    /// # Arguments
    ///  * `entry` - raw JSON content block
    ///  * `role` - role of the enclosing message, used in the error
    pub fn decode(entry: &Value, role: &Role) -> Result<Self> {
        let kind = content_kind(entry);
        if !BLOCK_KINDS.contains(&kind) {
            return Err(unknown_kind(role, kind));
        }
        Ok(Self::deserialize(entry)?)
    }

    /// The wire tag of this block
    pub fn kind(&self) -> &'static str {
        match self {
            AnthropicContentBlock::Text { .. } => "text",
            AnthropicContentBlock::Image { .. } => "image",
            AnthropicContentBlock::ToolUse { .. } => "tool_use",
            AnthropicContentBlock::ToolResult { .. } => "tool_result",
        }
    }
}

/* --- tests ----------------------------------------------------------------------------------- */
