//! Command handlers. Each takes parsed arguments and returns a `CliResult`.

pub mod completions;
pub mod scaffold;
