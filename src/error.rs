//!
//! Error handling for the chat payload converter.
//!
//! Defines every failure a conversion can surface using thiserror. Errors are
//! raised at the point of detection and propagated unchanged to the caller;
//! there is no partial-result mode.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use serde_json::Value;
use thiserror::Error;

/* --- types ----------------------------------------------------------------------------------- */

///
/// Conversion error types.
///
/// Covers every condition under which a request, message or tool definition
/// cannot be translated. Uses thiserror for automatic Display and Error trait
/// implementations.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Unsupported conversion direction: ({from}, {to})")]
    UnsupportedDirection { from: String, to: String },

    #[error("Unknown content kind '{kind}' in {role} message")]
    UnknownContentKind { role: String, kind: String },

    #[error("Malformed image data URI: {0}")]
    MalformedDataUri(String),

    #[error("Tool call '{id}' has arguments that are not valid JSON: {source}")]
    ArgumentDecode {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Tool definition is missing a name")]
    SchemaMissingName,

    #[error("Parameter '{name}' = {value} has no equivalent in the target format")]
    UnsupportedParameter { name: String, value: Value },

    #[error("Invalid format '{0}'. Valid formats are: openai, anthropic")]
    InvalidFormat(String),

    #[error("Unsupported image source: {0}")]
    UnsupportedImageSource(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/* --- start of code -------------------------------------------------------------------------- */

/// Result type alias for cleaner error handling throughout the crate
pub type Result<T> = std::result::Result<T, ConvertError>;
