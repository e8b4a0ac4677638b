//! Guard options and configuration
//!
//! This module contains the configuration for the sensitive file guard,
//! including a builder pattern and an environment overlay for the binary.

use super::identifiers::ToolName;

/// Substrings that mark a file path as sensitive
pub const DEFAULT_SENSITIVE_PATTERNS: &[&str] = &[".env", "secrets", "credentials", "private"];

/// Tools whose `file_path` is checked
pub const DEFAULT_GUARDED_TOOLS: &[&str] = &["Edit"];

/// Prompt prefix that triggers the debug report
pub const DEFAULT_DEBUG_PREFIX: &str = "/debug";

/// Environment variable: comma-separated sensitive patterns
pub const ENV_PATTERNS: &str = "SENSITIVE_FILE_GUARD_PATTERNS";
/// Environment variable: comma-separated guarded tool names
pub const ENV_TOOLS: &str = "SENSITIVE_FILE_GUARD_TOOLS";
/// Environment variable: debug prompt prefix
pub const ENV_DEBUG_PREFIX: &str = "SENSITIVE_FILE_GUARD_DEBUG_PREFIX";
/// Environment variable: opt-in maximum stdin size in bytes
pub const ENV_MAX_INPUT: &str = "SENSITIVE_FILE_GUARD_MAX_INPUT";
/// Environment variable: `env_logger` filter for diagnostics
pub const ENV_LOG: &str = "SENSITIVE_FILE_GUARD_LOG";

// ============================================================================
// Guard Options
// ============================================================================

/// Main options for the sensitive file guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardOptions {
    /// Lowercased substrings that mark a path as sensitive
    pub sensitive_patterns: Vec<String>,
    /// Tools whose `tool_input.file_path` is checked on `PreToolUse`
    pub guarded_tools: Vec<ToolName>,
    /// Prompt prefix that triggers the debug report
    pub debug_prefix: String,
    /// Maximum size of the stdin payload in bytes, unbounded when `None`
    ///
    /// A payload over the limit is refused with the block exit code, since an
    /// oversized `Edit` cannot be inspected.
    pub max_input_size: Option<usize>,
}

impl Default for GuardOptions {
    fn default() -> Self {
        Self {
            sensitive_patterns: DEFAULT_SENSITIVE_PATTERNS
                .iter()
                .map(|p| (*p).to_string())
                .collect(),
            guarded_tools: DEFAULT_GUARDED_TOOLS.iter().map(|t| ToolName::new(*t)).collect(),
            debug_prefix: DEFAULT_DEBUG_PREFIX.to_string(),
            max_input_size: None,
        }
    }
}

impl GuardOptions {
    /// Create a new builder for `GuardOptions`
    #[must_use]
    pub fn builder() -> GuardOptionsBuilder {
        GuardOptionsBuilder::default()
    }

    /// Defaults overlaid with the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`
    ///
    /// Unusable values are logged and ignored, keeping the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut builder = Self::builder();

        if let Some(raw) = lookup(ENV_PATTERNS) {
            let patterns = split_list(&raw);
            if patterns.is_empty() {
                log::warn!("{ENV_PATTERNS} is set but empty, keeping default patterns");
            } else {
                builder = builder.sensitive_patterns(patterns);
            }
        }

        if let Some(raw) = lookup(ENV_TOOLS) {
            let tools = split_list(&raw);
            if tools.is_empty() {
                log::warn!("{ENV_TOOLS} is set but empty, keeping default tools");
            } else {
                builder = builder.guarded_tools(tools);
            }
        }

        if let Some(prefix) = lookup(ENV_DEBUG_PREFIX) {
            if prefix.is_empty() {
                log::warn!("{ENV_DEBUG_PREFIX} is set but empty, keeping default prefix");
            } else {
                builder = builder.debug_prefix(prefix);
            }
        }

        if let Some(raw) = lookup(ENV_MAX_INPUT) {
            match raw.trim().parse::<usize>() {
                Ok(size) if size > 0 => builder = builder.max_input_size(size),
                _ => log::warn!("Ignoring invalid {ENV_MAX_INPUT} value: {raw:?}"),
            }
        }

        builder.build()
    }

    /// Whether `tool` is one of the guarded tools
    #[must_use]
    pub fn guards_tool(&self, tool: &str) -> bool {
        self.guarded_tools.iter().any(|t| t.as_str() == tool)
    }

    /// First sensitive pattern contained in `path`, compared case-insensitively
    #[must_use]
    pub fn sensitive_match(&self, path: &str) -> Option<&str> {
        let lowered = path.to_lowercase();
        self.sensitive_patterns
            .iter()
            .find(|p| lowered.contains(p.as_str()))
            .map(String::as_str)
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Builder for GuardOptions
// ============================================================================

/// Builder for `GuardOptions`
#[derive(Debug, Default)]
pub struct GuardOptionsBuilder {
    options: GuardOptions,
}

impl GuardOptionsBuilder {
    /// Set sensitive patterns, replacing the defaults
    #[must_use]
    pub fn sensitive_patterns(mut self, patterns: Vec<impl Into<String>>) -> Self {
        self.options.sensitive_patterns = patterns
            .into_iter()
            .map(|p| Into::<String>::into(p).to_lowercase())
            .collect();
        self
    }

    /// Add a sensitive pattern
    #[must_use]
    pub fn add_sensitive_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.options
            .sensitive_patterns
            .push(Into::<String>::into(pattern).to_lowercase());
        self
    }

    /// Set guarded tools, replacing the defaults
    #[must_use]
    pub fn guarded_tools(mut self, tools: Vec<impl Into<ToolName>>) -> Self {
        self.options.guarded_tools = tools.into_iter().map(Into::into).collect();
        self
    }

    /// Add a guarded tool
    #[must_use]
    pub fn add_guarded_tool(mut self, tool: impl Into<ToolName>) -> Self {
        self.options.guarded_tools.push(tool.into());
        self
    }

    /// Set the debug prompt prefix
    #[must_use]
    pub fn debug_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.debug_prefix = prefix.into();
        self
    }

    /// Set the maximum stdin size in bytes
    ///
    /// # Panics
    /// Panics if `size` is zero
    #[must_use]
    pub fn max_input_size(mut self, size: usize) -> Self {
        assert!(size > 0, "max_input_size must be greater than zero");
        self.options.max_input_size = Some(size);
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> GuardOptions {
        self.options
    }
}
