//! Text and JSON output for CLI commands.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use orgtree_cache::Node;
pub use orgtree_highlight::{dim, subheader, success, warning};
use orgtree_search::SearchReport;
use serde::Serialize;

/// JSON output for a search that matched nothing.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonNotFound<'a> {
    /// The trimmed search term.
    term: &'a str,
    /// Always empty.
    matches: Vec<String>,
}

/// Prints `value` as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints the JSON shape of a search without matches.
pub fn print_json_not_found(term: &str) -> ExitCode {
    print_json(&JsonNotFound {
        term,
        matches: Vec::new(),
    })
}

/// One-line summary of a search, dimmed.
pub fn report_summary(report: &SearchReport) -> String {
    let noun = if report.matches.len() == 1 {
        "match"
    } else {
        "matches"
    };
    dim(&format!(
        "{} {noun}, {} in scope, from #{}",
        report.matches.len(),
        report.scope.len(),
        report.lca
    ))
}

/// Warns about identifiers whose links could not be followed.
pub fn print_unresolved(report: &SearchReport) {
    if report.unresolved.is_empty() {
        return;
    }
    let ids: Vec<&str> = report.unresolved.iter().map(|id| id.as_str()).collect();
    eprintln!(
        "{}",
        warning(&format!("warning: could not resolve {}", ids.join(", ")))
    );
}

/// Formats children as a table in sibling order.
pub fn children_table(children: &[Node]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["#", "Id", "Name", "Reports"]);
    for child in children {
        table.add_row(vec![
            Cell::new(child.order),
            Cell::new(child.id.as_str()),
            Cell::new(&child.name),
            Cell::new(if child.has_children { "yes" } else { "no" }),
        ]);
    }
    table
}
