//! Type definitions for the hook contract
//!
//! This module contains all the type definitions used throughout the crate,
//! organized into logical submodules:
//!
//! - [`identifiers`] - Session id and tool name from the payload (`SessionId`, `ToolName`)
//! - [`hooks`] - Hook event names and the stdin payload
//! - [`decision`] - Decisions, freeform output and handler outcomes
//! - [`exit`] - Exit-code semantics
//! - [`options`] - Guard configuration

pub mod decision;
pub mod exit;
pub mod hooks;
pub mod identifiers;
pub mod options;

// Re-export commonly used types
pub use decision::{Decision, DecisionKind, FreeformOutput, HandlerOutcome, HandlerOutput};
pub use exit::{HandlerExit, Verdict};
pub use hooks::{HookEvent, HookEventBuilder, HookEventName};
pub use identifiers::{SessionId, ToolName};
pub use options::{GuardOptions, GuardOptionsBuilder};
