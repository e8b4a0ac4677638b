//! Exit-code semantics of the hook contract
//!
//! The exit code is the only carrier of control-flow intent. A handler
//! terminates with exactly one of success (0), block (2), or error (anything
//! else); the dispatcher reads it back with [`HandlerExit::from_code`].

// ============================================================================
// Exit Codes
// ============================================================================

/// Process exit code of a handler invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerExit {
    /// Exit code 0: the operation continues, stdout is honored
    Success,
    /// Exit code 2: the triggering tool action is prevented
    Block,
    /// Any other code: the operation continues with a warning
    Error(i32),
}

impl HandlerExit {
    /// Exit code used for success
    pub const SUCCESS_CODE: i32 = 0;
    /// Exit code used to block the operation
    pub const BLOCK_CODE: i32 = 2;

    /// Classify a raw exit code
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            Self::SUCCESS_CODE => Self::Success,
            Self::BLOCK_CODE => Self::Block,
            other => Self::Error(other),
        }
    }

    /// Raw exit code
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Success => Self::SUCCESS_CODE,
            Self::Block => Self::BLOCK_CODE,
            Self::Error(code) => code,
        }
    }

    /// Status byte the process terminates with
    ///
    /// An error code that would not survive as a status byte, or that would
    /// read back as success or block, is reported as 1.
    #[must_use]
    pub const fn process_code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Block => 2,
            Self::Error(code @ (1 | 3..=255)) => code as u8,
            Self::Error(_) => 1,
        }
    }

    /// What the dispatcher should do with the triggering action
    #[must_use]
    pub const fn verdict(self) -> Verdict {
        match self {
            Self::Success => Verdict::Continue,
            Self::Block => Verdict::Block,
            Self::Error(_) => Verdict::Warn,
        }
    }
}

impl From<HandlerExit> for std::process::ExitCode {
    fn from(exit: HandlerExit) -> Self {
        Self::from(exit.process_code())
    }
}

/// Dispatcher-side reading of an exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Let the action proceed
    Continue,
    /// Prevent the action
    Block,
    /// Let the action proceed and surface a warning
    Warn,
}
