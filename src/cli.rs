//! CLI domain: parse, route, and output only.
//! Commands are thin wrappers over the [`FileSystemProvider`](crate::provider::FileSystemProvider) surface.

mod output;
mod parse;
mod route;

pub use output::{map_error, CommandOutput};
pub use parse::{Cli, Commands, OutputFormat};
pub use route::RunContext;
