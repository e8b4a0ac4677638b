//! Hook-related type definitions
//!
//! This module contains the input side of the hook contract: the event names a
//! dispatcher sends and the [`HookEvent`] payload written to a handler's stdin.

use serde::{Deserialize, Serialize};

use super::identifiers::{SessionId, ToolName};

// ============================================================================
// Hook Types
// ============================================================================

/// Hook event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookEventName {
    /// Before a tool is used
    PreToolUse,
    /// After a tool is used
    PostToolUse,
    /// When user submits a prompt
    UserPromptSubmit,
    /// When conversation stops
    Stop,
    /// When a subagent stops
    SubagentStop,
    /// Before compacting the conversation
    PreCompact,
    /// When the agent sends a notification
    Notification,
}

impl HookEventName {
    /// Wire name of the event
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PreToolUse => "PreToolUse",
            Self::PostToolUse => "PostToolUse",
            Self::UserPromptSubmit => "UserPromptSubmit",
            Self::Stop => "Stop",
            Self::SubagentStop => "SubagentStop",
            Self::PreCompact => "PreCompact",
            Self::Notification => "Notification",
        }
    }

    /// Look up a known event by its wire name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "PreToolUse" => Some(Self::PreToolUse),
            "PostToolUse" => Some(Self::PostToolUse),
            "UserPromptSubmit" => Some(Self::UserPromptSubmit),
            "Stop" => Some(Self::Stop),
            "SubagentStop" => Some(Self::SubagentStop),
            "PreCompact" => Some(Self::PreCompact),
            "Notification" => Some(Self::Notification),
            _ => None,
        }
    }
}

impl std::fmt::Display for HookEventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hook payload written once to a handler's stdin
///
/// Every field is optional on the wire. Absent and `null` values are
/// tolerated; the accessors hand out the defaults the rules work with.
/// The event name stays a plain string so that events this crate does not
/// know about still deserialize and fall through to the default decision.
///
/// A wrongly typed field must not sink the whole event, since a rule that
/// never reads it may still need to block. Identity fields take scalars in
/// their JSON text form; `tool_input` and `prompt` stay raw and are checked
/// only by the rule that reads them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HookEvent {
    /// Opaque session identifier
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub session_id: Option<SessionId>,
    /// Path of the conversation transcript
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub transcript_path: Option<String>,
    /// Working directory of the session
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub cwd: Option<String>,
    /// Event tag, e.g. `PreToolUse`
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub hook_event_name: Option<String>,
    /// Tool name (tool events only)
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub tool_name: Option<ToolName>,
    /// Tool-specific input; its shape depends on the tool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_input: Option<serde_json::Value>,
    /// Prompt text (`UserPromptSubmit` only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<serde_json::Value>,
}

/// Accept any JSON value for a string field: `null` is absent, strings are
/// taken as-is, anything else keeps its JSON text.
fn lenient_string<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: From<String>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(T::from(s)),
        Some(other) => Some(T::from(other.to_string())),
    })
}

impl HookEvent {
    /// Create a new builder for a hook event
    #[must_use]
    pub fn builder(name: HookEventName) -> HookEventBuilder {
        HookEventBuilder {
            event: Self {
                hook_event_name: Some(name.as_str().to_string()),
                ..Self::default()
            },
        }
    }

    /// Raw event tag, empty when absent
    #[must_use]
    pub fn event_name(&self) -> &str {
        self.hook_event_name.as_deref().unwrap_or_default()
    }

    /// Known event kind, `None` for absent or unrecognised tags
    #[must_use]
    pub fn kind(&self) -> Option<HookEventName> {
        HookEventName::from_name(self.event_name())
    }

    /// Tool name, empty when absent
    #[must_use]
    pub fn tool_name(&self) -> &str {
        self.tool_name.as_ref().map_or("", ToolName::as_str)
    }

    /// Prompt text, empty when absent or `null`
    ///
    /// # Errors
    /// Returns `HandlerError::Processing` if the prompt is not a string
    pub fn prompt(&self) -> crate::error::Result<&str> {
        match &self.prompt {
            None | Some(serde_json::Value::Null) => Ok(""),
            Some(serde_json::Value::String(s)) => Ok(s.as_str()),
            Some(other) => Err(crate::error::HandlerError::processing(format!(
                "prompt must be a string, got {}",
                json_kind(other)
            ))),
        }
    }

    /// Look up a string field of the tool input
    ///
    /// Absent `tool_input` or an absent/`null` key yields `Ok(None)`. A
    /// `null` `tool_input` or `null` value counts as absent, so an edit
    /// without a usable path falls through to approval instead of failing.
    ///
    /// # Errors
    /// Returns `HandlerError::Processing` if `tool_input` is not an object or
    /// the value under `key` is not a string
    pub fn tool_input_str(&self, key: &str) -> crate::error::Result<Option<&str>> {
        let Some(input) = &self.tool_input else {
            return Ok(None);
        };
        let map = match input {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => return Ok(None),
            other => {
                return Err(crate::error::HandlerError::processing(format!(
                    "tool_input must be an object, got {}",
                    json_kind(other)
                )));
            }
        };
        match map.get(key) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(serde_json::Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(crate::error::HandlerError::processing(format!(
                "tool_input.{key} must be a string, got {}",
                json_kind(other)
            ))),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

// ============================================================================
// Builder for HookEvent
// ============================================================================

/// Builder for `HookEvent`
#[derive(Debug)]
pub struct HookEventBuilder {
    event: HookEvent,
}

impl HookEventBuilder {
    /// Set session ID
    #[must_use]
    pub fn session_id(mut self, id: impl Into<SessionId>) -> Self {
        self.event.session_id = Some(id.into());
        self
    }

    /// Set transcript path
    #[must_use]
    pub fn transcript_path(mut self, path: impl Into<String>) -> Self {
        self.event.transcript_path = Some(path.into());
        self
    }

    /// Set working directory
    #[must_use]
    pub fn cwd(mut self, cwd: impl Into<String>) -> Self {
        self.event.cwd = Some(cwd.into());
        self
    }

    /// Set tool name
    #[must_use]
    pub fn tool_name(mut self, name: impl Into<ToolName>) -> Self {
        self.event.tool_name = Some(name.into());
        self
    }

    /// Set tool input
    #[must_use]
    pub fn tool_input(mut self, input: serde_json::Value) -> Self {
        self.event.tool_input = Some(input);
        self
    }

    /// Set prompt
    #[must_use]
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.event.prompt = Some(serde_json::Value::String(prompt.into()));
        self
    }

    /// Build the event
    #[must_use]
    pub fn build(self) -> HookEvent {
        self.event
    }
}
