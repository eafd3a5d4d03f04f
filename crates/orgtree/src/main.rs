//! Command-line entry point for orgtree.

use std::process::ExitCode;

use orgtree::cli::{
    args::{Commands, parse_cli},
    commands,
    context::CommandContext,
    logging,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = parse_cli();

    // Writing a template must work even when the existing config is broken.
    let ctx = match cli.command {
        Commands::Init(_) => CommandContext::load_cwd_only(cli.data),
        _ => CommandContext::load(cli.data),
    };
    let ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    logging::init(cli.verbose, &ctx.config.log.level);
    commands::run(cli.command, &ctx).await
}
