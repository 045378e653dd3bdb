//!
//! Wire types for the two supported chat payload formats.
//!
//! Messages and requests keep unknown keys in flattened maps so that anything
//! the converters do not touch passes through verbatim. Content entries are
//! closed tagged enums; decoding one checks its `type` tag first so that an
//! unrecognized kind surfaces as [`ConvertError::UnknownContentKind`].
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp
//!
//! [`ConvertError::UnknownContentKind`]: crate::error::ConvertError::UnknownContentKind

/* --- modules --------------------------------------------------------------------------------- */

pub mod anthropic;
pub mod common;
pub mod openai;

/* --- start of code -------------------------------------------------------------------------- */

pub use anthropic::{AnthropicContentBlock, AnthropicMessage, AnthropicRequest, AnthropicTool, ImageSource};
pub use common::{MessageContent, Role};
pub use openai::{
    ImageUrl, OpenAiContentPart, OpenAiFunctionCall, OpenAiFunctionDef, OpenAiMessage, OpenAiRequest,
    OpenAiTool, OpenAiToolCall,
};
