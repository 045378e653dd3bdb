//!
//! OpenAI chat-completions wire types.
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
/// OpenAI chat completion request structure.
///
/// Only the keys the converters act on are typed. Model, sampling controls,
/// token limits and anything else ride along in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiRequest {
    /** conversation messages, in conversation order */
    pub messages: Vec<Value>,
    /** tool definitions available to the model */
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Value>>,
    /** number of completions to generate */
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<Value>,
    /** whether to stream the response */
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<Value>,
    /** every other request parameter, untouched */
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

///
/// OpenAI message structure within a chat completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiMessage {
    /** message role: system, user, assistant, or tool */
    pub role: Role,
    /** message content, string or content parts */
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<MessageContent>,
    /** tool calls made by the assistant */
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<OpenAiToolCall>>,
    /** tool call ID for tool response messages */
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

///
/// OpenAI structured content part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OpenAiContentPart {
    Text {
        text: String,
    },
    ImageUrl {
        image_url: ImageUrl,
    },
}

///
/// Image reference inside an `image_url` content part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    /** the image URL, a base64 data URI for inline images */
    pub url: String,
    /** resolution hint: auto, low or high */
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

///
/// OpenAI tool call structure for function invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiToolCall {
    /** unique identifier for this tool call */
    pub id: String,
    /** tool call type, always "function" */
    #[serde(rename = "type", default = "function_type")]
    pub call_type: String,
    /** function call details */
    pub function: OpenAiFunctionCall,
}

///
/// OpenAI function call details within a tool call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiFunctionCall {
    /** function name to call */
    pub name: String,
    /** JSON-encoded arguments string */
    pub arguments: Value,
}

///
/// OpenAI tool definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiTool {
    /** tool type, always "function" */
    #[serde(rename = "type", default = "function_type")]
    pub tool_type: String,
    /** function definition and schema */
    pub function: OpenAiFunctionDef,
}

///
/// OpenAI function definition within a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiFunctionDef {
    /** function name */
    #[serde(default)]
    pub name: String,
    /** function description */
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /** JSON schema for function parameters */
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
    /** strict schema adherence flag */
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

/* --- constants ------------------------------------------------------------------------------ */

/** content part kinds the converters understand */
const PART_KINDS: [&str; 2] = ["text", "image_url"];

/* --- start of code -------------------------------------------------------------------------- */

fn function_type() -> String {
    "function".to_string()
}

impl OpenAiMessage {
    fn new(role: Role) -> Self {
        Self { role, content: None, tool_calls: None, tool_call_id: None, extra: Map::new() }
    }

    /// Assistant message with plain string content
    pub fn assistant_text(text: String) -> Self {
        Self { content: Some(MessageContent::Text(text)), ..Self::new(Role::Assistant) }
    }

    /// Assistant message carrying exactly one tool call
    pub fn assistant_tool_call(call: OpenAiToolCall) -> Self {
        Self { tool_calls: Some(vec![call]), ..Self::new(Role::Assistant) }
    }

    /// User message built from already-encoded content parts
    pub fn user_parts(parts: Vec<Value>) -> Self {
        Self { content: Some(MessageContent::Entries(parts)), ..Self::new(Role::User) }
    }

    ///
    /// Tool response message.
    ///
    /// The payload is kept as raw JSON since tool results may be strings or
    /// arrays and are copied verbatim.
    pub fn tool_result(tool_call_id: String, content: Value) -> Self {
        Self {
            content: Some(MessageContent::from(content)),
            tool_call_id: Some(tool_call_id),
            ..Self::new(Role::Tool)
        }
    }
}

impl OpenAiContentPart {
    ///
    /// Decode a raw content part, rejecting kinds this crate does not model.
    ///
    /// # Arguments
    ///  * `entry` - raw JSON content part
    ///  * `role` - role of the enclosing message, used in the error
    pub fn decode(entry: &Value, role: &Role) -> Result<Self> {
        let kind = content_kind(entry);
        if !PART_KINDS.contains(&kind) {
            return Err(unknown_kind(role, kind));
        }
        Ok(Self::deserialize(entry)?)
    }
}

impl OpenAiToolCall {
    pub fn new(id: String, name: String, arguments: String) -> Self {
        Self {
            id,
            call_type: function_type(),
            function: OpenAiFunctionCall { name, arguments: Value::String(arguments) },
        }
    }
}

impl OpenAiTool {
    pub fn function(function: OpenAiFunctionDef) -> Self {
        Self { tool_type: function_type(), function }
    }
}

/* --- tests ----------------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use serde_json::json;

    #[test]
    fn test_request_keeps_unknown_parameters() {
        let request: OpenAiRequest = serde_json::from_value(json!({
            "model": "gpt-4o",
            "messages": [],
            "temperature": 0.2,
            "n": 1
        }))
        .unwrap();

        assert_eq!(request.n, Some(json!(1)));
        assert_eq!(request.extra.get("model"), Some(&json!("gpt-4o")));
        assert_eq!(request.extra.get("temperature"), Some(&json!(0.2)));
    }

    #[test]
    fn test_assistant_tool_call_serialization() {
        let msg = OpenAiMessage::assistant_tool_call(OpenAiToolCall::new(
            "call_1".to_string(),
            "lookup".to_string(),
            "{}".to_string(),
        ));

        assert_eq!(
            serde_json::to_value(msg).unwrap(),
            json!({
                "role": "assistant",
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": {"name": "lookup", "arguments": "{}"}
                }]
            })
        );
    }

    #[test]
    fn test_decode_rejects_unmodelled_part() {
        let err = OpenAiContentPart::decode(&json!({"type": "input_audio"}), &Role::System)
            .unwrap_err();
        assert!(matches!(
            err,
            ConvertError::UnknownContentKind { ref role, ref kind } if role == "system" && kind == "input_audio"
        ));
    }
}
