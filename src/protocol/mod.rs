//! Line protocol handling.
//!
//! Commands arrive one per line on stdin; every response is one JSON line on
//! stdout.

pub mod parser;

pub use parser::{parse_command, Command};
