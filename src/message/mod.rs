//! Hook payload parsing

mod parser;

pub use parser::parse_hook_event;
