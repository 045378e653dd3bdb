//!
//! Content entry conversion between OpenAI and Anthropic formats.
//!
//! Each function maps one content entry. The enclosing message envelope is the
//! message mappers' concern.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::{ConvertError, Result};
use crate::format::ImageDetail;
use crate::types::{AnthropicContentBlock, ImageSource, ImageUrl, OpenAiContentPart, OpenAiToolCall};

/* --- constants ------------------------------------------------------------------------------ */

/** only inline base64 images can be expressed in both formats */
const BASE64_SOURCE: &str = "base64";

static MEDIA_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^image/(.+)$").expect("media type pattern is valid"));

static DATA_URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^data:image/([^;]+);base64,(.*)$").expect("data URI pattern is valid")
});

/* --- start of code -------------------------------------------------------------------------- */

///
/// Convert an Anthropic image source into an OpenAI `image_url` part.
///
/// The base64 payload is re-embedded as a data URI and the caller's detail
/// hint is attached.
///
/// # Arguments
///  * `source` - Anthropic image source
///  * `detail` - detail hint for the OpenAI part
///
/// # Returns
///  * OpenAI `image_url` content part
///  * `ConvertError::UnsupportedImageSource` for non-base64 or non-image sources
pub fn image_to_image_url(source: &ImageSource, detail: ImageDetail) -> Result<OpenAiContentPart> {
    if source.source_type != BASE64_SOURCE {
        return Err(ConvertError::UnsupportedImageSource(format!(
            "source type '{}' cannot be expressed as a data URI",
            source.source_type
        )));
    }

    let subtype = MEDIA_TYPE
        .captures(&source.media_type)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| {
            ConvertError::UnsupportedImageSource(format!(
                "media type '{}' is not an image/* type",
                source.media_type
            ))
        })?;

    Ok(OpenAiContentPart::ImageUrl {
        image_url: ImageUrl {
            url: format!("data:image/{};base64,{}", subtype, source.data),
            detail: Some(detail.to_string()),
        },
    })
}

///
/// Convert an OpenAI `image_url` part into an Anthropic image block.
///
/// Only base64 data URIs are accepted. The detail hint has no Anthropic
/// counterpart and is dropped.
///
/// # Arguments
///  * `image_url` - OpenAI image reference
///
/// # Returns
///  * Anthropic image block
///  * `ConvertError::MalformedDataUri` if the URL is not `data:image/<subtype>;base64,<data>`
pub fn image_url_to_image(image_url: &ImageUrl) -> Result<AnthropicContentBlock> {
    let caps = DATA_URI
        .captures(&image_url.url)
        .ok_or_else(|| ConvertError::MalformedDataUri(abbreviate(&image_url.url)))?;

    Ok(AnthropicContentBlock::Image {
        source: ImageSource {
            source_type: BASE64_SOURCE.to_string(),
            media_type: format!("image/{}", &caps[1]),
            data: caps[2].to_string(),
        },
    })
}

///
/// Convert an Anthropic `tool_use` into an OpenAI tool call.
///
/// The structured input is encoded into the JSON arguments string.
pub fn tool_use_to_tool_call(id: &str, name: &str, input: &Value) -> Result<OpenAiToolCall> {
    let arguments = serde_json::to_string(input)?;
    Ok(OpenAiToolCall::new(id.to_string(), name.to_string(), arguments))
}

///
/// Convert an OpenAI tool call into an Anthropic `tool_use` block.
///
/// # Arguments
///  * `call` - OpenAI tool call
///
/// # Returns
///  * Anthropic `tool_use` block with parsed input
///  * `ConvertError::ArgumentDecode` if the arguments string is not valid JSON
pub fn tool_call_to_tool_use(call: &OpenAiToolCall) -> Result<AnthropicContentBlock> {
    let input = match &call.function.arguments {
        Value::String(arguments) => serde_json::from_str(arguments)
            .map_err(|source| ConvertError::ArgumentDecode { id: call.id.clone(), source })?,
        // some clients already send the arguments as an object
        structured => structured.clone(),
    };

    Ok(AnthropicContentBlock::ToolUse {
        id: call.id.clone(),
        name: call.function.name.clone(),
        input,
    })
}

/// Keep error messages readable when a data URI carries a large payload
fn abbreviate(url: &str) -> String {
    const LIMIT: usize = 64;
    match url.char_indices().nth(LIMIT) {
        Some((idx, _)) => format!("{}... ({} chars)", &url[..idx], url.chars().count()),
        None => url.to_string(),
    }
}

/* --- tests ----------------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn png_source(data: &str) -> ImageSource {
        ImageSource {
            source_type: "base64".to_string(),
            media_type: "image/png".to_string(),
            data: data.to_string(),
        }
    }

    #[test]
    fn test_image_becomes_data_uri_with_detail() {
        let part = image_to_image_url(&png_source("iVBORw0KGgo="), ImageDetail::High).unwrap();

        assert_eq!(
            serde_json::to_value(part).unwrap(),
            json!({
                "type": "image_url",
                "image_url": {"url": "data:image/png;base64,iVBORw0KGgo=", "detail": "high"}
            })
        );
    }

    #[test]
    fn test_non_image_media_type_is_rejected() {
        let mut source = png_source("JVBERi0=");
        source.media_type = "application/pdf".to_string();
        assert!(matches!(
            image_to_image_url(&source, ImageDetail::Auto),
            Err(ConvertError::UnsupportedImageSource(_))
        ));
    }

    #[test]
    fn test_url_source_is_rejected() {
        let source = ImageSource {
            source_type: "url".to_string(),
            media_type: String::new(),
            data: String::new(),
        };
        assert!(matches!(
            image_to_image_url(&source, ImageDetail::Auto),
            Err(ConvertError::UnsupportedImageSource(_))
        ));
    }

    #[test]
    fn test_data_uri_is_parsed_back() {
        let image_url = ImageUrl {
            url: "data:image/jpeg;base64,/9j/4AAQ".to_string(),
            detail: Some("low".to_string()),
        };

        assert_eq!(image_url_to_image(&image_url).unwrap(), AnthropicContentBlock::Image {
            source: ImageSource {
                source_type: "base64".to_string(),
                media_type: "image/jpeg".to_string(),
                data: "/9j/4AAQ".to_string(),
            },
        });
    }

    #[test]
    fn test_empty_image_data_survives_both_directions() {
        let part = image_to_image_url(&png_source(""), ImageDetail::Auto).unwrap();
        let OpenAiContentPart::ImageUrl { image_url } = part else {
            panic!("expected an image_url part");
        };
        assert_eq!(image_url.url, "data:image/png;base64,");

        assert_eq!(image_url_to_image(&image_url).unwrap(), AnthropicContentBlock::Image {
            source: png_source(""),
        });
    }

    #[test]
    fn test_remote_url_is_malformed_data_uri() {
        let image_url =
            ImageUrl { url: "https://example.com/cat.png".to_string(), detail: None };
        assert!(matches!(image_url_to_image(&image_url), Err(ConvertError::MalformedDataUri(_))));
    }

    #[test]
    fn test_tool_arguments_are_encoded_and_decoded() {
        let call = tool_use_to_tool_call("c1", "f", &json!({"city": "London"})).unwrap();
        assert_eq!(call.function.arguments, json!(r#"{"city":"London"}"#));

        let block = tool_call_to_tool_use(&call).unwrap();
        assert_eq!(block, AnthropicContentBlock::ToolUse {
            id: "c1".to_string(),
            name: "f".to_string(),
            input: json!({"city": "London"}),
        });
    }

    #[test]
    fn test_invalid_arguments_fail_with_call_id() {
        let call = OpenAiToolCall::new("c9".to_string(), "f".to_string(), "{not json".to_string());
        match tool_call_to_tool_use(&call) {
            Err(ConvertError::ArgumentDecode { id, .. }) => assert_eq!(id, "c9"),
            other => panic!("expected ArgumentDecode, got {:?}", other),
        }
    }

    #[test]
    fn test_abbreviate_long_urls() {
        let long = format!("data:text/plain;base64,{}", "A".repeat(500));
        let short = abbreviate(&long);
        assert!(short.len() < 100);
        assert!(short.ends_with("chars)"));
    }
}
