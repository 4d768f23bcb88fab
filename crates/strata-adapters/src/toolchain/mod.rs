//! External toolchain adapters.

mod command_spec;
mod dotnet;
mod recording;

pub use command_spec::CommandSpec;
pub use dotnet::DotnetToolchain;
pub use recording::{Operation, RecordingToolchain};
