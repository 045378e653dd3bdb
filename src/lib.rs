//! # chatmorph - OpenAI / Anthropic chat payload converter
//!
//! Translates chat-completion request payloads between the OpenAI
//! chat-completions shape and the Anthropic messages shape. Conversation
//! turns, tool calling, inline images and system instructions survive the
//! trip. Every conversion is a pure, synchronous function of its input.
//!
//! ## Library Usage
//!
//! ```rust
//! use serde_json::json;
//!
//! # fn main() -> Result<(), chatmorph::ConvertError> {
//! let converter = chatmorph::select("openai", "anthropic")?;
//! let request = converter.convert_request(&json!({
//!     "model": "claude-sonnet-4",
//!     "messages": [
//!         {"role": "system", "content": "Be brief."},
//!         {"role": "user", "content": "Hello!"}
//!     ]
//! }))?;
//!
//! assert_eq!(request["system"], "Be brief.");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`converter`] - direction selection and the two converters
//! - [`types`] - typed wire structures for both formats
//! - [`format`] - format identifiers and conversion options
//! - [`config`] - layered configuration for the command-line tool
//! - [`error`] - error types and handling
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

pub mod config;
pub mod converter;
pub mod error;
pub mod format;
pub mod types;

// Re-export commonly used types
pub use config::{Config, ValidationIssue, ValidationSeverity};
pub use converter::{FormatConverter, ToolSpec, format_tool_schemas, select, select_with_options};
pub use error::{ConvertError, Result};
pub use format::{ConvertOptions, Format, ImageDetail};
