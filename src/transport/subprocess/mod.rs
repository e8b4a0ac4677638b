//! Subprocess contract client
//!
//! This module launches a handler as a child process the way a dispatcher
//! does: serialize the event to its stdin, capture stdout and stderr, and read
//! back the exit code. It owns the timeout the handler itself never enforces.

mod config;
mod response;
mod transport;

// Re-export public types
pub use config::{DEFAULT_MAX_OUTPUT_SIZE, DEFAULT_TIMEOUT};
pub use response::HandlerResponse;
pub use transport::SubprocessHandler;
