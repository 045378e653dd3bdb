//!
//! Anthropic to OpenAI format converter for API request translation.
//!
//! Converts Anthropic messages requests to OpenAI chat-completions format.
//! Assistant content blocks fan out into one message per block, user tool
//! results are split into standalone `tool` messages and inline images become
//! `image_url` data URIs.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::converter::{FormatConverter, content, schema};
use crate::error::{ConvertError, Result};
use crate::format::{ConvertOptions, Format};
use crate::types::common::unknown_kind;
use crate::types::{
    AnthropicContentBlock, AnthropicMessage, AnthropicRequest, AnthropicTool, MessageContent,
    OpenAiContentPart, OpenAiMessage, OpenAiRequest, Role,
};

/* --- types ----------------------------------------------------------------------------------- */

///
/// Converter from Anthropic format to OpenAI format.
#[derive(Debug, Clone, Default)]
pub struct AnthropicToOpenAiConverter {
    /** options for fields only one format carries */
    options: ConvertOptions,
}

/* --- start of code -------------------------------------------------------------------------- */

impl AnthropicToOpenAiConverter {
    ///
    /// Create a new Anthropic to OpenAI converter.
    ///
    /// # Arguments
    ///  * `options` - conversion options (image detail hint, tool strictness)
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    ///
    /// Convert the content blocks of an assistant message.
    ///
    /// Every `tool_use` block becomes its own assistant message with a single
    /// tool call and every `text` block its own assistant message with string
    /// content.
    ///
    /// # Returns
    ///  * one OpenAI message per block, in block order
    ///  * `ConvertError::UnknownContentKind` for any other block kind
    fn convert_assistant_blocks(&self, entries: &[Value]) -> Result<Vec<OpenAiMessage>> {
        trace!(blocks = entries.len(), "expanding assistant content blocks");
        entries
            .iter()
            .map(|entry| -> Result<OpenAiMessage> {
                match AnthropicContentBlock::decode(entry, &Role::Assistant)? {
                    AnthropicContentBlock::ToolUse { id, name, input } => Ok(
                        OpenAiMessage::assistant_tool_call(content::tool_use_to_tool_call(&id, &name, &input)?),
                    ),
                    AnthropicContentBlock::Text { text } => Ok(OpenAiMessage::assistant_text(text)),
                    other => Err(unknown_kind(&Role::Assistant, other.kind())),
                }
            })
            .collect()
    }

    ///
    /// Convert the content blocks of a user message.
    ///
    /// Text and image blocks accumulate into a pending user message. A
    /// `tool_result` flushes the pending message first and is then emitted as
    /// a standalone `tool` message, so results never share a content array
    /// with other parts.
    ///
    /// # Returns
    ///  * converted messages, in block order
    ///  * `ConvertError::UnknownContentKind` for blocks a user message cannot hold
    fn convert_user_blocks(&self, entries: &[Value]) -> Result<Vec<OpenAiMessage>> {
        let mut output = Vec::new();
        let mut pending: Option<Vec<Value>> = None;

        for entry in entries {
            match AnthropicContentBlock::decode(entry, &Role::User)? {
                AnthropicContentBlock::ToolResult { tool_use_id, content } => {
                    if let Some(parts) = pending.take() {
                        output.push(OpenAiMessage::user_parts(parts));
                    }
                    output.push(OpenAiMessage::tool_result(tool_use_id, content));
                }
                AnthropicContentBlock::Text { text } => {
                    let part = serde_json::to_value(OpenAiContentPart::Text { text })?;
                    pending.get_or_insert_with(Vec::new).push(part);
                }
                AnthropicContentBlock::Image { source } => {
                    let part = content::image_to_image_url(&source, self.options.image_detail)?;
                    pending.get_or_insert_with(Vec::new).push(serde_json::to_value(part)?);
                }
                other => return Err(unknown_kind(&Role::User, other.kind())),
            }
        }

        if let Some(parts) = pending {
            output.push(OpenAiMessage::user_parts(parts));
        }
        Ok(output)
    }
}

impl FormatConverter for AnthropicToOpenAiConverter {
    fn source(&self) -> Format {
        Format::Anthropic
    }

    fn target(&self) -> Format {
        Format::OpenAi
    }

    ///
    /// Convert an Anthropic request to OpenAI request format.
    ///
    /// Messages are converted in order and concatenated; the tool list is
    /// wrapped into OpenAI function definitions. A request-level `system`
    /// field is left where it is.
    fn convert_request(&self, request: &Value) -> Result<Value> {
        let request = AnthropicRequest::deserialize(request)?;
        debug!(
            messages = request.messages.len(),
            tools = request.tools.as_ref().map_or(0, Vec::len),
            "converting request from Anthropic to OpenAI format"
        );

        let mut messages = Vec::with_capacity(request.messages.len());
        for message in &request.messages {
            messages.extend(self.convert_message(message)?);
        }

        let tools = request
            .tools
            .map(|tools| {
                tools
                    .iter()
                    .map(|tool| self.convert_tool_schema(tool))
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?;

        let mut extra = request.extra;
        if let Some(system) = request.system {
            extra.insert("system".to_string(), system);
        }

        debug!(messages = messages.len(), "converted request to OpenAI format");
        Ok(serde_json::to_value(OpenAiRequest { messages, tools, n: None, stream: None, extra })?)
    }

    fn convert_message(&self, message: &Value) -> Result<Vec<Value>> {
        let msg = AnthropicMessage::deserialize(message)?;
        let converted = match (&msg.role, &msg.content) {
            (Role::Assistant, Some(MessageContent::Entries(entries))) => {
                self.convert_assistant_blocks(entries)?
            }
            (Role::User, Some(MessageContent::Entries(entries))) => self.convert_user_blocks(entries)?,
            _ => return Ok(vec![message.clone()]),
        };

        converted.into_iter().map(|m| serde_json::to_value(m).map_err(ConvertError::from)).collect()
    }

    fn convert_tool_schema(&self, tool: &Value) -> Result<Value> {
        let tool = AnthropicTool::deserialize(tool)?;
        Ok(serde_json::to_value(schema::anthropic_to_openai(&tool, self.options.strict_tools)?)?)
    }
}

/* --- tests ----------------------------------------------------------------------------------- */
