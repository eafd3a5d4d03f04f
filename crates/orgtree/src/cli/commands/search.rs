//! Implementation of `orgtree search`.

use std::process::ExitCode;

use orgtree_search::SearchOutcome;

use crate::cli::{
    args::SearchCommand,
    context::CommandContext,
    output::{dim, print_json, print_json_not_found, print_unresolved, report_summary},
    render::TreeRenderer,
};

/// Runs one search and prints the revealed part of the chart.
pub async fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    let term = cmd.term();
    let mut session = match ctx.open_session(TreeRenderer::new()).await {
        Ok(session) => session,
        Err(code) => return code,
    };

    match session.search(&term).await {
        Ok(SearchOutcome::Found(report)) => {
            if cmd.json {
                return print_json(&report);
            }
            print!("{}", session.renderer().frame());
            println!("{}", report_summary(&report));
            print_unresolved(&report);
            ExitCode::SUCCESS
        }
        Ok(SearchOutcome::NotFound) => {
            if cmd.json {
                return print_json_not_found(term.trim());
            }
            println!("Not found");
            ExitCode::SUCCESS
        }
        Ok(SearchOutcome::Ignored | SearchOutcome::Superseded) => {
            println!("{}", dim("Nothing to search for."));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: search failed: {e}");
            ExitCode::FAILURE
        }
    }
}
