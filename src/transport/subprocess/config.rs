//! Configuration constants for the subprocess contract client

use std::time::Duration;

/// Default time a handler gets to read its input, decide, and exit
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default maximum size of each captured output stream (1MB)
pub const DEFAULT_MAX_OUTPUT_SIZE: usize = 1024 * 1024;
