//! Implementation of `orgtree config`.

use std::process::ExitCode;

use orgtree_highlight::{Highlighter, header};

use crate::cli::context::CommandContext;

/// Shows effective configuration settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let toml = match ctx.config.settings_to_toml() {
        Ok(toml) => toml,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let highlighter = Highlighter::new();
    println!("{}", header("Effective configuration"));
    println!();
    print!("{}", highlighter.toml(&toml));
    ExitCode::SUCCESS
}
