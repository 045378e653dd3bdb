//!
//! OpenAI to Anthropic format converter for API request translation.
//!
//! Converts OpenAI-compatible chat completion requests to Anthropic messages
//! format. System messages are lifted into the request-level `system` field,
//! tool calls become `tool_use` blocks, tool responses become `tool_result`
//! blocks inside user messages and inline images are re-encoded.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use serde::Deserialize;
use serde::de::Error as _;
use serde_json::Value;
use tracing::{debug, trace};

use crate::converter::{FormatConverter, content, schema};
use crate::error::{ConvertError, Result};
use crate::format::Format;
use crate::types::common::unknown_kind;
use crate::types::{
    AnthropicMessage, AnthropicRequest, MessageContent, OpenAiContentPart, OpenAiMessage,
    OpenAiRequest, OpenAiTool, OpenAiToolCall, Role,
};

/* --- types ----------------------------------------------------------------------------------- */

///
/// Converter from OpenAI format to Anthropic format.
///
/// Stateless: the image detail hint and tool strictness only exist in OpenAI
/// output, so every conversion is a pure function of its input.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiToAnthropicConverter;

/* --- constants ------------------------------------------------------------------------------ */

/** Anthropic generates exactly one completion per request */
const SUPPORTED_COMPLETIONS: f64 = 1.0;

/* --- start of code -------------------------------------------------------------------------- */

impl OpenAiToAnthropicConverter {
    ///
    /// Create a new OpenAI to Anthropic converter.
    ///
    /// # Returns
    ///  * New converter instance
    pub fn new() -> Self {
        Self
    }

    ///
    /// Convert an already parsed message.
    ///
    /// `raw` is the original JSON, returned as-is for messages that need no
    /// restructuring.
    fn convert_parsed(&self, raw: &Value, msg: OpenAiMessage) -> Result<Vec<Value>> {
        match msg.role {
            Role::Assistant => match msg.tool_calls {
                Some(calls) if !calls.is_empty() => self.convert_tool_calls(msg.content, &calls),
                _ => Ok(vec![raw.clone()]),
            },
            Role::Tool => self.convert_tool_message(raw, msg.tool_call_id),
            Role::User => self.convert_user_message(raw, msg.content),
            Role::System | Role::Other(_) => Ok(vec![raw.clone()]),
        }
    }

    ///
    /// Convert an assistant message carrying tool calls.
    ///
    /// Each tool call becomes its own assistant message holding one `tool_use`
    /// block. Text sent alongside the calls is emitted first so it is kept.
    ///
    /// # Arguments
    ///  * `text` - optional assistant text content
    ///  * `calls` - tool calls to convert
    ///
    /// # Returns
    ///  * Converted Anthropic messages
    ///  * `ConvertError::ArgumentDecode` if any call carries invalid JSON arguments
    fn convert_tool_calls(
        &self,
        text: Option<MessageContent>,
        calls: &[OpenAiToolCall],
    ) -> Result<Vec<Value>> {
        let mut output = Vec::with_capacity(calls.len() + 1);

        match text {
            Some(MessageContent::Text(text)) if !text.is_empty() => {
                output.push(to_json(AnthropicMessage::with_text(Role::Assistant, text))?);
            }
            Some(MessageContent::Entries(entries)) if !entries.is_empty() => {
                output.push(to_json(AnthropicMessage::with_blocks(Role::Assistant, entries))?);
            }
            _ => {}
        }

        trace!(count = calls.len(), "expanding tool calls into tool_use messages");
        for call in calls {
            let block = content::tool_call_to_tool_use(call)?;
            output.push(to_json(AnthropicMessage::with_blocks(
                Role::Assistant,
                vec![serde_json::to_value(block)?],
            ))?);
        }

        Ok(output)
    }

    ///
    /// Convert a tool response message into a user message with one
    /// `tool_result` block.
    ///
    /// The payload is copied verbatim; a missing payload becomes `""`.
    fn convert_tool_message(&self, raw: &Value, tool_call_id: Option<String>) -> Result<Vec<Value>> {
        let tool_use_id = tool_call_id
            .ok_or_else(|| ConvertError::from(serde_json::Error::missing_field("tool_call_id")))?;
        let payload = match raw.get("content") {
            None | Some(Value::Null) => Value::String(String::new()),
            Some(content) => content.clone(),
        };

        let block = serde_json::json!({
            "type": "tool_result",
            "tool_use_id": tool_use_id,
            "content": payload,
        });
        Ok(vec![to_json(AnthropicMessage::with_blocks(Role::User, vec![block]))?])
    }

    ///
    /// Convert a user message, re-encoding `image_url` parts as image blocks.
    ///
    /// Every other part and every other message key is passed through.
    fn convert_user_message(&self, raw: &Value, content: Option<MessageContent>) -> Result<Vec<Value>> {
        let Some(MessageContent::Entries(entries)) = content else {
            return Ok(vec![raw.clone()]);
        };

        let converted = entries
            .iter()
            .map(|entry| -> Result<Value> {
                match entry.get("type").and_then(Value::as_str) {
                    Some("image_url") => match OpenAiContentPart::decode(entry, &Role::User)? {
                        OpenAiContentPart::ImageUrl { image_url } => {
                            Ok(serde_json::to_value(content::image_url_to_image(&image_url)?)?)
                        }
                        OpenAiContentPart::Text { .. } => Ok(entry.clone()),
                    },
                    _ => Ok(entry.clone()),
                }
            })
            .collect::<Result<Vec<_>>>()?;

        let mut output = raw.clone();
        output["content"] = Value::Array(converted);
        Ok(vec![output])
    }

    ///
    /// Collect the text of a system message.
    ///
    /// # Returns
    ///  * text pieces in order
    ///  * `ConvertError::UnknownContentKind` for non-text system content
    fn system_text(&self, content: Option<MessageContent>) -> Result<Vec<String>> {
        match content {
            None => Ok(Vec::new()),
            Some(MessageContent::Text(text)) => Ok(vec![text]),
            Some(MessageContent::Entries(entries)) => entries
                .iter()
                .map(|entry| -> Result<String> {
                    match OpenAiContentPart::decode(entry, &Role::System)? {
                        OpenAiContentPart::Text { text } => Ok(text),
                        OpenAiContentPart::ImageUrl { .. } => Err(unknown_kind(&Role::System, "image_url")),
                    }
                })
                .collect(),
            Some(MessageContent::Raw(other)) => {
                Err(unknown_kind(&Role::System, json_type_name(&other)))
            }
        }
    }

    /// Reject completion counts Anthropic cannot honour
    fn check_completion_count(&self, n: Option<&Value>) -> Result<()> {
        match n {
            Some(value) if value.as_f64() != Some(SUPPORTED_COMPLETIONS) => {
                Err(ConvertError::UnsupportedParameter { name: "n".to_string(), value: value.clone() })
            }
            _ => Ok(()),
        }
    }
}

impl FormatConverter for OpenAiToAnthropicConverter {
    fn source(&self) -> Format {
        Format::OpenAi
    }

    fn target(&self) -> Format {
        Format::Anthropic
    }

    ///
    /// Convert an OpenAI request to Anthropic request format.
    ///
    /// Validates `n`, drops `stream`, lifts system messages into the `system`
    /// field, converts every other message in order and converts the tool
    /// list. All other parameters pass through.
    fn convert_request(&self, request: &Value) -> Result<Value> {
        let request = OpenAiRequest::deserialize(request)?;
        debug!(
            messages = request.messages.len(),
            tools = request.tools.as_ref().map_or(0, Vec::len),
            "converting request from OpenAI to Anthropic format"
        );

        self.check_completion_count(request.n.as_ref())?;
        if request.stream.is_some() {
            trace!("dropping stream parameter");
        }

        let mut system_parts = Vec::new();
        let mut messages = Vec::with_capacity(request.messages.len());
        for raw in &request.messages {
            let msg = OpenAiMessage::deserialize(raw)?;
            if msg.role == Role::System {
                system_parts.extend(self.system_text(msg.content)?);
            } else {
                messages.extend(self.convert_parsed(raw, msg)?);
            }
        }

        let mut extra = request.extra;
        let system_text = system_parts.join("\n").trim().to_string();
        let system = if system_text.is_empty() {
            extra.remove("system")
        } else {
            extra.remove("system");
            Some(Value::String(system_text))
        };

        let tools = request
            .tools
            .map(|tools| {
                tools
                    .iter()
                    .map(|tool| self.convert_tool_schema(tool))
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?;

        debug!(messages = messages.len(), "converted request to Anthropic format");
        to_json(AnthropicRequest { messages, system, tools, extra })
    }

    fn convert_message(&self, message: &Value) -> Result<Vec<Value>> {
        let msg = OpenAiMessage::deserialize(message)?;
        self.convert_parsed(message, msg)
    }

    fn convert_tool_schema(&self, tool: &Value) -> Result<Value> {
        let tool = OpenAiTool::deserialize(tool)?;
        to_json(schema::openai_to_anthropic(&tool)?)
    }
}

fn to_json<T: serde::Serialize>(value: T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/* --- tests ----------------------------------------------------------------------------------- */
