//! Error types for the sensitive file guard

use thiserror::Error;

use crate::types::exit::HandlerExit;

/// Main error type for the hook handler and its contract client
#[derive(Error, Debug)]
pub enum HandlerError {
    /// Standard input was not a well-formed JSON object
    #[error("Error parsing hook data: {0}")]
    InputParse(String),

    /// Standard input exceeded the configured size limit
    #[error("Error parsing hook data: input of {size} bytes exceeds limit of {limit} bytes")]
    InputTooLarge {
        /// Bytes received so far
        size: usize,
        /// Configured maximum
        limit: usize,
    },

    /// Unexpected value shape while evaluating the rules
    #[error("Handler error: {0}")]
    Processing(String),

    /// JSON encode error when writing a decision
    #[error("Handler error: {0}")]
    JsonEncode(#[from] serde_json::Error),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Handler process could not be started
    #[error("Failed to start handler '{program}': {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Handler process did not finish in time
    #[error("Timeout: handler did not exit within {0:?}")]
    Timeout(std::time::Duration),

    /// Handler wrote more output than the client accepts
    #[error("Handler {stream} exceeded maximum size of {limit} bytes")]
    OutputTooLarge {
        /// Which stream overflowed
        stream: &'static str,
        /// Configured maximum
        limit: usize,
    },
}

/// Result type alias for handler operations
pub type Result<T> = std::result::Result<T, HandlerError>;

impl HandlerError {
    /// Create an input parse error
    pub fn input_parse(msg: impl Into<String>) -> Self {
        Self::InputParse(msg.into())
    }

    /// Create a processing error
    pub fn processing(msg: impl Into<String>) -> Self {
        Self::Processing(msg.into())
    }

    /// Create an input too large error
    #[must_use]
    pub const fn input_too_large(size: usize, limit: usize) -> Self {
        Self::InputTooLarge { size, limit }
    }

    /// Create a spawn error
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }

    /// Create a timeout error
    #[must_use]
    pub const fn timeout(after: std::time::Duration) -> Self {
        Self::Timeout(after)
    }

    /// Whether the failure happened while reading the hook payload
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(self, Self::InputParse(_) | Self::InputTooLarge { .. })
    }

    /// Exit code a handler process reports for this failure
    ///
    /// A payload over the size limit was never inspected, so it is refused
    /// with the block code. Every other failure is warning-level for the
    /// dispatcher: the operation continues and the message on stderr is
    /// surfaced.
    #[must_use]
    pub const fn exit_code(&self) -> HandlerExit {
        match self {
            Self::InputTooLarge { .. } => HandlerExit::Block,
            _ => HandlerExit::Error(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_carry_the_parse_prefix() {
        let err = HandlerError::input_parse("expected value at line 1 column 1");
        assert_eq!(
            err.to_string(),
            "Error parsing hook data: expected value at line 1 column 1"
        );
        assert!(err.is_input_error());

        assert_eq!(err.exit_code(), HandlerExit::Error(1));

        let err = HandlerError::input_too_large(10, 4);
        assert!(err.to_string().starts_with("Error parsing hook data:"));
        assert!(err.is_input_error());
    }

    #[test]
    fn oversized_input_is_refused_with_the_block_code() {
        assert_eq!(HandlerError::input_too_large(10, 4).exit_code(), HandlerExit::Block);
    }

    #[test]
    fn processing_errors_carry_the_handler_prefix() {
        let err = HandlerError::processing("tool_input is not an object");
        assert_eq!(err.to_string(), "Handler error: tool_input is not an object");
        assert!(!err.is_input_error());
        assert_eq!(err.exit_code(), HandlerExit::Error(1));
    }
}
