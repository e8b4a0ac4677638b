//! # Sensitive File Guard
//!
//! An external hook handler speaking the stdin/stdout/exit-code hook contract.
//! A dispatcher writes one JSON [`HookEvent`] to the handler's stdin; the
//! handler answers with either a one-line JSON [`Decision`] or free text on
//! stdout, and signals the outcome with its exit code.
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | success, the operation continues and stdout is honored |
//! | 2 | block, the triggering tool action is prevented |
//! | other | error, the operation continues and a warning is surfaced |
//!
//! ## Rules
//!
//! Rules run in order and the first match wins (see [`hooks`]):
//!
//! 1. `PreToolUse` of `Edit` on a path containing `.env`, `secrets`,
//!    `credentials` or `private` (any case) is blocked with exit code 2.
//! 2. `PostToolUse` prints `[Logger] Tool '<name>' was used successfully`.
//! 3. `UserPromptSubmit` starting with `/debug` prints session details.
//! 4. Everything else is approved.
//!
//! ## Deciding In-Process
//!
//! ```
//! use sensitive_file_guard::{HandlerExit, HookEvent, HookEventName, SensitiveFileGuard};
//! use serde_json::json;
//!
//! let event = HookEvent::builder(HookEventName::PreToolUse)
//!     .tool_name("Edit")
//!     .tool_input(json!({"file_path": "/app/.env"}))
//!     .build();
//!
//! let outcome = SensitiveFileGuard::default().decide(&event).unwrap();
//! assert_eq!(outcome.exit, HandlerExit::Block);
//! ```
//!
//! ## Invoking a Handler Process
//!
//! The [`transport::subprocess`] module is the dispatcher end of the same
//! contract:
//!
//! ```no_run
//! # use sensitive_file_guard::{HookEvent, HookEventName, SubprocessHandler, Verdict};
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let event = HookEvent::builder(HookEventName::PostToolUse)
//!     .tool_name("Bash")
//!     .build();
//!
//! let response = SubprocessHandler::find("sensitive-file-guard")?
//!     .invoke(&event)
//!     .await?;
//!
//! if response.verdict() == Verdict::Warn {
//!     log::warn!("handler failed: {}", response.stderr);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! [`GuardOptions::from_env`] reads `SENSITIVE_FILE_GUARD_PATTERNS`,
//! `SENSITIVE_FILE_GUARD_TOOLS`, `SENSITIVE_FILE_GUARD_DEBUG_PREFIX` and
//! `SENSITIVE_FILE_GUARD_MAX_INPUT`. Diagnostics are filtered with
//! `SENSITIVE_FILE_GUARD_LOG` and always go to stderr.
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, HandlerError>`](Result). In the
//! handler every error ends the invocation: the message goes to stderr, stdout
//! stays empty, and the process exits with code 1.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod hooks;
pub mod message;
pub mod transport;
pub mod types;

// Re-export commonly used types for external API
pub use error::{HandlerError, Result};
pub use hooks::SensitiveFileGuard;
pub use message::parse_hook_event;
pub use transport::{HandlerResponse, SubprocessHandler, read_event, run_handler, write_output};

// Re-export type submodules for flat public API
pub use types::decision::{Decision, DecisionKind, FreeformOutput, HandlerOutcome, HandlerOutput};
pub use types::exit::{HandlerExit, Verdict};
pub use types::hooks::{HookEvent, HookEventBuilder, HookEventName};
pub use types::identifiers::{SessionId, ToolName};
pub use types::options::{GuardOptions, GuardOptionsBuilder};

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
