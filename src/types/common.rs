//!
//! Types shared by both wire formats.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConvertError;

/* --- types ----------------------------------------------------------------------------------- */

///
/// Message role.
///
/// Serialized as the plain lowercase string. Roles neither format assigns
/// special meaning to are kept as `Other` and copied through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
    Other(String),
}

///
/// Message content: a plain string or an ordered list of content entries.
///
/// Entries stay raw JSON here; converters decode them one at a time into the
/// closed per-format enums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /** plain string content */
    Text(String),
    /** structured content entries */
    Entries(Vec<Value>),
    /** any other payload; only tool results carry these */
    Raw(Value),
}

/* --- start of code -------------------------------------------------------------------------- */

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
            Role::Other(role) => role,
        }
    }
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        match role.as_str() {
            "system" => Role::System,
            "user" => Role::User,
            "assistant" => Role::Assistant,
            "tool" => Role::Tool,
            _ => Role::Other(role),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(role) => role,
            known => known.as_str().to_string(),
        }
    }
}

impl From<Value> for MessageContent {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => MessageContent::Text(text),
            Value::Array(entries) => MessageContent::Entries(entries),
            other => MessageContent::Raw(other),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// Read the `type` tag of a raw content entry.
///
/// # Returns
///  * the tag, or `"<missing>"` when the entry has no string `type` field
pub(crate) fn content_kind(entry: &Value) -> &str {
    entry.get("type").and_then(Value::as_str).unwrap_or("<missing>")
}

///
/// Build the error for a content entry whose kind is not legal under `role`.
pub(crate) fn unknown_kind(role: &Role, kind: &str) -> ConvertError {
    ConvertError::UnknownContentKind { role: role.to_string(), kind: kind.to_string() }
}

/* --- tests ----------------------------------------------------------------------------------- */
