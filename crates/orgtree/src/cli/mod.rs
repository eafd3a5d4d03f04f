//! CLI support for the `orgtree` binary.

pub mod args;
pub mod commands;
pub mod context;
pub mod logging;
pub mod output;
pub mod render;

pub use context::CommandContext;
