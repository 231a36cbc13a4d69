//! Library crate behind the `raaga` binary.
//!
//! Command implementations live in [`commands`]; `main.rs` only parses
//! arguments and dispatches.

pub mod commands;
