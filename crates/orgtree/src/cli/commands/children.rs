//! Implementation of `orgtree children`.

use std::process::ExitCode;

use crate::cli::{
    args::ChildrenCommand,
    context::CommandContext,
    output::{children_table, dim, print_json},
    render::TreeRenderer,
};

/// Expands the path down to a node and lists its children in sibling order.
pub async fn run(ctx: &CommandContext, cmd: &ChildrenCommand) -> ExitCode {
    let mut session = match ctx.open_session(TreeRenderer::new()).await {
        Ok(session) => session,
        Err(code) => return code,
    };

    match session.reveal(&cmd.id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            eprintln!("error: not found: {}", cmd.id);
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("error: failed to load {}: {e}", cmd.id);
            return ExitCode::FAILURE;
        }
    }

    let children = match session.load_children(&cmd.id).await {
        Ok(children) => children,
        Err(e) => {
            eprintln!("error: failed to load children of {}: {e}", cmd.id);
            return ExitCode::FAILURE;
        }
    };

    if cmd.json {
        return print_json(&children);
    }
    if children.is_empty() {
        println!("{}", dim("No children."));
    } else {
        println!("{}", children_table(&children));
    }
    ExitCode::SUCCESS
}
