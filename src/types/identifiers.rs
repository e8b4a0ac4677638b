//! Session and tool names carried by a hook payload
//!
//! `session_id` is echoed back verbatim by the debug report and `tool_name` is
//! what the guarded-tool list and the usage log line compare against. Neither
//! is interpreted beyond that, so both stay opaque strings.

use serde::{Deserialize, Serialize};

/// Session the dispatcher reported the event for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap a session id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Text as it appeared in the payload
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Name of the tool an event is about, matched case-sensitively (`Edit`, `Bash`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolName(String);

impl ToolName {
    /// Wrap a tool name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Text as it appeared in the payload
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ToolName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ToolName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_compare_exactly() {
        assert_eq!(ToolName::from("Edit").as_str(), "Edit");
        assert_ne!(ToolName::from("edit"), ToolName::new("Edit"));
        assert_eq!(SessionId::new("abc").to_string(), "abc");
    }
}
