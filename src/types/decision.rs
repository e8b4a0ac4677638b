//! Decision-related type definitions
//!
//! This module contains the output side of the hook contract: the structured
//! [`Decision`], the unstructured [`FreeformOutput`], and the [`HandlerOutcome`]
//! pairing whichever of the two was produced with its exit code.

use serde::{Deserialize, Serialize};

use super::exit::HandlerExit;

// ============================================================================
// Decision Types
// ============================================================================

/// Hook decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionKind {
    /// Allow the action
    Approve,
    /// Block the action
    Block,
}

/// Structured verdict written to stdout as one line of JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Approve or block
    pub decision: DecisionKind,
    /// Human-readable reason, may be empty
    #[serde(default)]
    pub reason: String,
}

impl Decision {
    /// Approve with an empty reason
    #[must_use]
    pub const fn approve() -> Self {
        Self {
            decision: DecisionKind::Approve,
            reason: String::new(),
        }
    }

    /// Block with the given reason
    pub fn block(reason: impl Into<String>) -> Self {
        Self {
            decision: DecisionKind::Block,
            reason: reason.into(),
        }
    }

    /// Whether this decision blocks the action
    #[must_use]
    pub fn is_block(&self) -> bool {
        self.decision == DecisionKind::Block
    }
}

/// Unstructured text shown to the user as logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeformOutput {
    lines: Vec<String>,
}

impl FreeformOutput {
    /// Single-line output
    pub fn line(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
        }
    }

    /// Multi-line output
    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Lines of text, without terminators
    #[must_use]
    pub fn as_lines(&self) -> &[String] {
        &self.lines
    }
}

impl std::fmt::Display for FreeformOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Whatever a handler writes to stdout; never both
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerOutput {
    /// Structured decision
    Decision(Decision),
    /// Free text
    Freeform(FreeformOutput),
}

impl HandlerOutput {
    /// Render the output exactly as it goes on the wire, newline-terminated
    ///
    /// # Errors
    /// Returns `HandlerError::JsonEncode` if the decision cannot be serialized
    pub fn render(&self) -> crate::error::Result<String> {
        match self {
            Self::Decision(decision) => {
                let mut json = serde_json::to_string(decision)?;
                json.push('\n');
                Ok(json)
            }
            Self::Freeform(text) => Ok(text.to_string()),
        }
    }
}

/// Result of deciding on one hook event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerOutcome {
    /// What to write to stdout
    pub output: HandlerOutput,
    /// How to exit
    pub exit: HandlerExit,
}

impl HandlerOutcome {
    /// Decision that lets the action proceed
    #[must_use]
    pub const fn approve() -> Self {
        Self {
            output: HandlerOutput::Decision(Decision::approve()),
            exit: HandlerExit::Success,
        }
    }

    /// Decision that prevents the action
    pub fn block(reason: impl Into<String>) -> Self {
        Self {
            output: HandlerOutput::Decision(Decision::block(reason)),
            exit: HandlerExit::Block,
        }
    }

    /// Free text with a successful exit
    #[must_use]
    pub const fn freeform(text: FreeformOutput) -> Self {
        Self {
            output: HandlerOutput::Freeform(text),
            exit: HandlerExit::Success,
        }
    }
}
