//! Captured response of one handler invocation

use crate::types::decision::Decision;
use crate::types::exit::{HandlerExit, Verdict};

/// Everything a dispatcher observes from a finished handler process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerResponse {
    /// Exit code
    pub exit: HandlerExit,
    /// Standard output, lossily decoded
    pub stdout: String,
    /// Standard error, lossily decoded
    pub stderr: String,
}

impl HandlerResponse {
    /// Structured decision, if stdout holds one
    #[must_use]
    pub fn decision(&self) -> Option<Decision> {
        serde_json::from_str(self.stdout.trim()).ok()
    }

    /// Free text for the user, if stdout holds something other than a decision
    #[must_use]
    pub fn user_message(&self) -> Option<&str> {
        let text = self.stdout.trim_end();
        if text.is_empty() || self.decision().is_some() {
            return None;
        }
        Some(text)
    }

    /// What to do with the triggering action
    ///
    /// Only the exit code carries control flow; a `block` decision printed by
    /// a handler that exits 0 does not block.
    #[must_use]
    pub const fn verdict(&self) -> Verdict {
        self.exit.verdict()
    }

    /// Whether the action must be prevented
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        matches!(self.verdict(), Verdict::Block)
    }
}
