//! Tooling: command-line surface over the library.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
