//! CLI support for the `glean` binary.

pub mod args;
pub mod commands;
pub mod context;

pub use context::CommandContext;
