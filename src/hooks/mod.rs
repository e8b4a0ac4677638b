//! Hook policy for deciding on incoming events
//!
//! This module holds the rules the guard applies to a [`HookEvent`]. Rules run
//! in a fixed order and the first one that produces output wins:
//!
//! 1. `PreToolUse` on a guarded tool whose `file_path` looks sensitive: block.
//! 2. `PostToolUse`: log the tool name as free text.
//! 3. `UserPromptSubmit` starting with the debug prefix: print session details.
//! 4. Anything else: approve.

use crate::error::Result;
use crate::types::decision::{FreeformOutput, HandlerOutcome};
use crate::types::hooks::{HookEvent, HookEventName};
use crate::types::options::GuardOptions;

/// Placeholder for session details missing from the payload
const UNKNOWN: &str = "unknown";

/// Rule engine for the sensitive file guard
#[derive(Debug, Clone, Default)]
pub struct SensitiveFileGuard {
    options: GuardOptions,
}

impl SensitiveFileGuard {
    /// Create a guard with the given options
    #[must_use]
    pub const fn new(options: GuardOptions) -> Self {
        Self { options }
    }

    /// Options the guard was built with
    #[must_use]
    pub const fn options(&self) -> &GuardOptions {
        &self.options
    }

    /// Decide on a hook event
    ///
    /// # Returns
    /// The output to write and the exit code to terminate with
    ///
    /// # Errors
    /// Returns `HandlerError::Processing` if a field the matching rule needs
    /// has an unexpected shape
    pub fn decide(&self, event: &HookEvent) -> Result<HandlerOutcome> {
        if let Some(outcome) = self.check_sensitive_edit(event)? {
            return Ok(outcome);
        }

        let outcome = match event.kind() {
            Some(HookEventName::PostToolUse) => Some(Self::log_tool_use(event)),
            Some(HookEventName::UserPromptSubmit) => self.debug_report(event)?,
            _ => None,
        };

        Ok(outcome.unwrap_or_else(|| {
            log::debug!("No rule matched '{}', approving", event.event_name());
            HandlerOutcome::approve()
        }))
    }

    fn check_sensitive_edit(&self, event: &HookEvent) -> Result<Option<HandlerOutcome>> {
        if event.kind() != Some(HookEventName::PreToolUse)
            || !self.options.guards_tool(event.tool_name())
        {
            return Ok(None);
        }

        let file_path = event.tool_input_str("file_path")?.unwrap_or_default();
        let Some(pattern) = self.options.sensitive_match(file_path) else {
            return Ok(None);
        };

        log::info!(
            "Blocking {} on '{file_path}' (matched '{pattern}')",
            event.tool_name()
        );
        Ok(Some(HandlerOutcome::block(format!(
            "Editing sensitive file '{file_path}' is not allowed"
        ))))
    }

    fn log_tool_use(event: &HookEvent) -> HandlerOutcome {
        HandlerOutcome::freeform(FreeformOutput::line(format!(
            "[Logger] Tool '{}' was used successfully",
            event.tool_name()
        )))
    }

    fn debug_report(&self, event: &HookEvent) -> Result<Option<HandlerOutcome>> {
        if !event.prompt()?.starts_with(self.options.debug_prefix.as_str()) {
            return Ok(None);
        }

        let session = event.session_id.as_ref().map_or(UNKNOWN, |id| id.as_str());
        let cwd = event.cwd.as_deref().unwrap_or(UNKNOWN);
        let transcript = event.transcript_path.as_deref().unwrap_or(UNKNOWN);

        Ok(Some(HandlerOutcome::freeform(FreeformOutput::lines([
            "Debug Info:".to_string(),
            format!("  Session: {session}"),
            format!("  CWD: {cwd}"),
            format!("  Transcript: {transcript}"),
        ]))))
    }
}
