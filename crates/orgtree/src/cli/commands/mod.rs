//! Command implementations and dispatch.

pub mod check;
pub mod children;
pub mod config;
pub mod init;
pub mod search;
pub mod shell;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub async fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Search(cmd) => search::run(ctx, &cmd).await,
        Commands::Shell => shell::run(ctx).await,
        Commands::Children(cmd) => children::run(ctx, &cmd).await,
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
        Commands::Check => check::run(ctx),
    }
}
