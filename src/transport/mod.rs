//! Transport layer for the hook contract
//!
//! The contract has two ends. [`stdio`] is the handler end: read the payload
//! from stdin, write the output to stdout, report failures on stderr.
//! [`subprocess`] is the dispatcher end: launch a handler process and capture
//! what it says.

pub mod stdio;
pub mod subprocess;

pub use stdio::{read_event, run_handler, write_output};
pub use subprocess::{HandlerResponse, SubprocessHandler};
