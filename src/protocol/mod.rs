//! Driver protocol handling.
//!
//! Line-based text commands read by the `element-duel` binary. Each line is
//! parsed into a `Command` that the main loop dispatches on the `Engine`.

pub mod parser;

pub use parser::{parse_command, Command};
