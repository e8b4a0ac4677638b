//! Hook payload parser

use crate::error::{HandlerError, Result};
use crate::types::hooks::HookEvent;

/// Parse raw stdin bytes into a typed `HookEvent`
///
/// Bytes that are not a JSON object are an input error. Field types are not
/// judged here: the rules check the fields they read.
///
/// # Errors
/// Returns `HandlerError::InputParse` if the bytes are not UTF-8 or not a JSON
/// object
pub fn parse_hook_event(raw: &[u8]) -> Result<HookEvent> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| HandlerError::input_parse(format!("input is not valid UTF-8: {e}")))?;

    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| HandlerError::input_parse(e.to_string()))?;

    if !value.is_object() {
        return Err(HandlerError::input_parse("expected a JSON object"));
    }

    serde_json::from_value(value)
        .map_err(|e| HandlerError::processing(format!("unexpected hook data: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_json() {
        let err = parse_hook_event(b"not json").unwrap_err();
        assert!(matches!(err, HandlerError::InputParse(_)));
    }

    #[test]
    fn rejects_non_objects() {
        for raw in [&b"[]"[..], b"\"PreToolUse\"", b"42", b"null", b""] {
            let err = parse_hook_event(raw).unwrap_err();
            assert!(err.is_input_error(), "{raw:?} should be an input error");
        }
    }

    #[test]
    fn rejects_invalid_utf8() {
        let err = parse_hook_event(&[b'{', 0xff, b'}']).unwrap_err();
        assert!(matches!(err, HandlerError::InputParse(_)));
    }

    #[test]
    fn wrong_field_types_still_parse() {
        let event = parse_hook_event(
            br#"{"session_id":12345,"hook_event_name":"PreToolUse","tool_name":"Edit","tool_input":{"file_path":"/repo/.env"}}"#,
        )
        .unwrap();
        assert_eq!(event.session_id.as_ref().map(|id| id.as_str()), Some("12345"));
        assert_eq!(event.tool_input_str("file_path").unwrap(), Some("/repo/.env"));
    }

    #[test]
    fn parses_tool_event() {
        let event = parse_hook_event(
            br#"{"hook_event_name":"PreToolUse","tool_name":"Edit","tool_input":{"file_path":".env"}}"#,
        )
        .unwrap();
        assert_eq!(event.event_name(), "PreToolUse");
        assert_eq!(event.tool_name(), "Edit");
        assert_eq!(event.tool_input_str("file_path").unwrap(), Some(".env"));
    }
}
