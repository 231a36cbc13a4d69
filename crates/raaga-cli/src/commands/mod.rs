//! Command implementations for the `raaga` CLI.
//!
//! Each command exposes a `run(...) -> anyhow::Result<ExitCode>`; human
//! output is colored, `--json` switches to machine-readable output.

pub mod compose;
pub mod replay;
pub mod sample;
pub mod validate;
