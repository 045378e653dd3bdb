//! Conversion tests for chatmorph
//!
//! Exercises both conversion directions through the public API only: whole
//! requests, single messages and tool definitions, plus the selector.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chatmorph::{ConvertError, ConvertOptions, ImageDetail, ToolSpec, select, select_with_options};
use serde_json::{Value, json};
use std::collections::BTreeSet;

/// Collect `(id, name, arguments)` of every tool call in an OpenAI message list,
/// with arguments re-encoded as JSON text
fn openai_tool_calls(messages: &[Value]) -> BTreeSet<(String, String, String)> {
    messages
        .iter()
        .filter_map(|m| m["tool_calls"].as_array())
        .flatten()
        .map(|call| {
            let arguments: Value = match &call["function"]["arguments"] {
                Value::String(text) => serde_json::from_str(text).unwrap(),
                other => other.clone(),
            };
            (
                call["id"].as_str().unwrap().to_string(),
                call["function"]["name"].as_str().unwrap().to_string(),
                arguments.to_string(),
            )
        })
        .collect()
}

/// Collect `(id, name, input)` of every tool_use block in an Anthropic message list
fn anthropic_tool_uses(messages: &[Value]) -> BTreeSet<(String, String, String)> {
    messages
        .iter()
        .filter_map(|m| m["content"].as_array())
        .flatten()
        .filter(|block| block["type"] == "tool_use")
        .map(|block| {
            (
                block["id"].as_str().unwrap().to_string(),
                block["name"].as_str().unwrap().to_string(),
                block["input"].to_string(),
            )
        })
        .collect()
}

fn png_bytes() -> String {
    STANDARD.encode([0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d])
}

/// Test that a tool conversation survives A -> B -> A with the same set of calls
#[test]
fn test_round_trip_keeps_tool_call_set() {
    let request = json!({
        "model": "gpt-4o",
        "messages": [
            {"role": "user", "content": "Weather in London and Paris?"},
            {
                "role": "assistant",
                "content": null,
                "tool_calls": [
                    {"id": "c1", "type": "function", "function": {"name": "weather", "arguments": "{\"city\":\"London\"}"}},
                    {"id": "c2", "type": "function", "function": {"name": "weather", "arguments": "{\"city\":\"Paris\"}"}}
                ]
            },
            {"role": "tool", "tool_call_id": "c1", "content": "12C"},
            {"role": "tool", "tool_call_id": "c2", "content": "15C"}
        ]
    });

    let to_anthropic = select("openai", "anthropic").unwrap();
    let to_openai = select("anthropic", "openai").unwrap();

    let anthropic = to_anthropic.convert_request(&request).unwrap();
    let back = to_openai.convert_request(&anthropic).unwrap();

    let original = request["messages"].as_array().unwrap();
    let anthropic_messages = anthropic["messages"].as_array().unwrap();
    let round_tripped = back["messages"].as_array().unwrap();

    assert_eq!(anthropic_tool_uses(anthropic_messages), openai_tool_calls(original));
    assert_eq!(openai_tool_calls(round_tripped), openai_tool_calls(original));

    let results: Vec<_> = round_tripped
        .iter()
        .filter(|m| m["role"] == "tool")
        .map(|m| (m["tool_call_id"].clone(), m["content"].clone()))
        .collect();
    assert_eq!(results, vec![(json!("c1"), json!("12C")), (json!("c2"), json!("15C"))]);
    assert_eq!(back["model"], "gpt-4o");
}

/// Test that a missing schema becomes the empty object schema in both directions
#[test]
fn test_schema_default_both_directions() {
    let empty = json!({"type": "object", "properties": {}});

    let openai = select("anthropic", "openai")
        .unwrap()
        .convert_tool_schema(&json!({"name": "noop", "description": "Does nothing"}))
        .unwrap();
    assert_eq!(openai["function"]["parameters"], empty);

    let anthropic = select("openai", "anthropic")
        .unwrap()
        .convert_tool_schema(&json!({"type": "function", "function": {"name": "noop"}}))
        .unwrap();
    assert_eq!(anthropic["input_schema"], empty);
}

/// Test that plain conversations keep their order in both directions
#[test]
fn test_order_preservation() {
    let messages = json!([
        {"role": "user", "content": "one"},
        {"role": "assistant", "content": "two"},
        {"role": "user", "content": "three"},
        {"role": "assistant", "content": "four"}
    ]);
    let request = json!({"model": "m", "max_tokens": 64, "messages": messages});

    for (from, to) in [("openai", "anthropic"), ("anthropic", "openai")] {
        let converted = select(from, to).unwrap().convert_request(&request).unwrap();
        assert_eq!(converted["messages"], messages, "{} -> {}", from, to);
        assert_eq!(converted["max_tokens"], 64);
    }
}

/// Test that system messages are joined into the request-level system field
#[test]
fn test_system_accumulation() {
    let request = json!({
        "messages": [
            {"role": "system", "content": "A."},
            {"role": "user", "content": "hi"},
            {"role": "system", "content": "B."}
        ]
    });

    let converted = select("openai", "anthropic").unwrap().convert_request(&request).unwrap();

    assert_eq!(converted["system"], "A.\nB.");
    assert_eq!(converted["messages"], json!([{"role": "user", "content": "hi"}]));
}

/// Test that whitespace-only system text does not produce a system field
#[test]
fn test_blank_system_is_omitted() {
    let request = json!({
        "messages": [
            {"role": "system", "content": "  "},
            {"role": "user", "content": "hi"}
        ]
    });

    let converted = select("openai", "anthropic").unwrap().convert_request(&request).unwrap();

    assert!(converted.get("system").is_none());
}

/// Test that each tool call becomes its own assistant message
#[test]
fn test_tool_call_expansion() {
    let message = json!({
        "role": "assistant",
        "tool_calls": [
            {"id": "c1", "type": "function", "function": {"name": "f", "arguments": "{}"}},
            {"id": "c2", "type": "function", "function": {"name": "g", "arguments": "{}"}}
        ]
    });

    let converted = select("openai", "anthropic").unwrap().convert_message(&message).unwrap();

    assert_eq!(
        converted,
        vec![
            json!({"role": "assistant", "content": [{"type": "tool_use", "id": "c1", "name": "f", "input": {}}]}),
            json!({"role": "assistant", "content": [{"type": "tool_use", "id": "c2", "name": "g", "input": {}}]}),
        ]
    );
}

/// Test that a tool result splits the surrounding user content
#[test]
fn test_tool_result_flush_ordering() {
    let message = json!({
        "role": "user",
        "content": [
            {"type": "text", "text": "T1"},
            {"type": "tool_result", "tool_use_id": "x", "content": "R"},
            {"type": "text", "text": "T2"}
        ]
    });

    let converted = select("anthropic", "openai").unwrap().convert_message(&message).unwrap();

    assert_eq!(
        converted,
        vec![
            json!({"role": "user", "content": [{"type": "text", "text": "T1"}]}),
            json!({"role": "tool", "content": "R", "tool_call_id": "x"}),
            json!({"role": "user", "content": [{"type": "text", "text": "T2"}]}),
        ]
    );
}

/// Test that an inline image survives B -> A -> B with subtype and data intact
#[test]
fn test_image_round_trip() {
    let data = png_bytes();
    let block = json!({"type": "image", "source": {"type": "base64", "media_type": "image/png", "data": data}});
    let message = json!({"role": "user", "content": [block.clone()]});

    let options = ConvertOptions::default().with_image_detail(ImageDetail::Low);
    let openai = select_with_options("anthropic", "openai", options)
        .unwrap()
        .convert_message(&message)
        .unwrap();

    assert_eq!(openai.len(), 1);
    let part = &openai[0]["content"][0];
    assert_eq!(part["type"], "image_url");
    assert_eq!(part["image_url"]["url"], format!("data:image/png;base64,{}", data));
    assert_eq!(part["image_url"]["detail"], "low");

    let anthropic = select("openai", "anthropic").unwrap().convert_message(&openai[0]).unwrap();

    assert_eq!(anthropic, vec![json!({"role": "user", "content": [block]})]);
}

/// Test that remote image URLs are rejected instead of silently dropped
#[test]
fn test_remote_image_url_is_rejected() {
    let message = json!({
        "role": "user",
        "content": [{"type": "image_url", "image_url": {"url": "https://example.com/cat.png"}}]
    });

    let result = select("openai", "anthropic").unwrap().convert_message(&message);

    assert!(matches!(result, Err(ConvertError::MalformedDataUri(_))));
}

/// Test that only the two cross-format directions can be selected
#[test]
fn test_unsupported_direction() {
    for (from, to) in [("foo", "bar"), ("openai", "openai"), ("anthropic", "anthropic")] {
        assert!(
            matches!(select(from, to), Err(ConvertError::UnsupportedDirection { .. })),
            "{} -> {} should be unsupported",
            from,
            to
        );
    }
}

/// Test that a completion count other than 1 is rejected
#[test]
fn test_rejected_completion_count() {
    let converter = select("openai", "anthropic").unwrap();
    let base = json!({"messages": [{"role": "user", "content": "hi"}]});

    let mut three = base.clone();
    three["n"] = json!(3);
    match converter.convert_request(&three) {
        Err(ConvertError::UnsupportedParameter { name, value }) => {
            assert_eq!(name, "n");
            assert_eq!(value, json!(3));
        }
        other => panic!("expected UnsupportedParameter, got {:?}", other),
    }

    let mut one = base.clone();
    one["n"] = json!(1);
    one["stream"] = json!(true);
    let converted = converter.convert_request(&one).unwrap();
    assert!(converted.get("n").is_none());
    assert!(converted.get("stream").is_none());

    assert!(converter.convert_request(&base).is_ok());
}

/// Test that unknown content kinds fail fast in both directions
#[test]
fn test_unknown_content_kind() {
    let anthropic = json!({"role": "assistant", "content": [{"type": "thinking", "thinking": "hmm"}]});
    let result = select("anthropic", "openai").unwrap().convert_message(&anthropic);
    assert!(matches!(
        result,
        Err(ConvertError::UnknownContentKind { ref kind, .. }) if kind == "thinking"
    ));

    let openai = json!({"role": "system", "content": [{"type": "input_audio", "input_audio": {}}]});
    let result = select("openai", "anthropic")
        .unwrap()
        .convert_request(&json!({"messages": [openai]}));
    assert!(matches!(
        result,
        Err(ConvertError::UnknownContentKind { ref role, .. }) if role == "system"
    ));
}

/// Test that invalid tool call arguments name the offending call
#[test]
fn test_argument_decode_error() {
    let message = json!({
        "role": "assistant",
        "tool_calls": [{"id": "bad", "type": "function", "function": {"name": "f", "arguments": "{oops"}}]
    });

    let result = select("openai", "anthropic").unwrap().convert_message(&message);

    match result {
        Err(ConvertError::ArgumentDecode { id, .. }) => assert_eq!(id, "bad"),
        other => panic!("expected ArgumentDecode, got {:?}", other),
    }
}

/// Test that object keys keep their original order in arguments and schemas
#[test]
fn test_key_order_is_preserved() {
    let message = json!({
        "role": "assistant",
        "content": [{"type": "tool_use", "id": "c1", "name": "f", "input": {"b": 1, "a": 2}}]
    });
    let converted = select("anthropic", "openai").unwrap().convert_message(&message).unwrap();
    assert_eq!(converted[0]["tool_calls"][0]["function"]["arguments"], json!(r#"{"b":1,"a":2}"#));

    let tool = json!({
        "name": "search",
        "input_schema": {"type": "object", "properties": {"zeta": {"type": "string"}, "alpha": {"type": "integer"}}}
    });
    let openai = select("anthropic", "openai").unwrap().convert_tool_schema(&tool).unwrap();
    let keys: Vec<&str> = openai["function"]["parameters"]["properties"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["zeta", "alpha"]);
}

/// Test that inputs are left untouched by conversion
#[test]
fn test_input_is_not_mutated() {
    let request = json!({
        "messages": [
            {"role": "system", "content": "S"},
            {"role": "tool", "tool_call_id": "c1", "content": "R"}
        ],
        "n": 1
    });
    let snapshot = request.clone();

    let converter = select("openai", "anthropic").unwrap();
    let first = converter.convert_request(&request).unwrap();
    let second = converter.convert_request(&request).unwrap();

    assert_eq!(request, snapshot);
    assert_eq!(first, second);
}

/// Test the batch tool schema helper for both targets
#[test]
fn test_format_tool_schemas() {
    let tools = [
        ToolSpec {
            name: "lookup".to_string(),
            description: Some("Look something up".to_string()),
            schema: Some(json!({"type": "object", "properties": {"q": {"type": "string"}}})),
        },
        ToolSpec { name: "ping".to_string(), description: None, schema: None },
    ];
    let options = ConvertOptions::default().with_strict_tools(true);

    let openai = chatmorph::format_tool_schemas("openai", &tools, &options).unwrap();
    assert_eq!(openai.len(), 2);
    assert_eq!(openai[0]["function"]["strict"], true);
    assert_eq!(openai[1]["function"]["parameters"], json!({"type": "object", "properties": {}}));

    let anthropic = chatmorph::format_tool_schemas("anthropic", &tools, &options).unwrap();
    assert_eq!(anthropic[0]["name"], "lookup");
    assert!(anthropic[0].get("strict").is_none());

    assert!(matches!(
        chatmorph::format_tool_schemas("cohere", &tools, &options),
        Err(ConvertError::InvalidFormat(_))
    ));
}

/// Test that non-object requests are reported as malformed payloads
#[test]
fn test_malformed_request() {
    for (from, to) in [("openai", "anthropic"), ("anthropic", "openai")] {
        let result = select(from, to).unwrap().convert_request(&json!(["not", "an", "object"]));
        assert!(matches!(result, Err(ConvertError::MalformedPayload(_))), "{} -> {}", from, to);
    }
}
