//! Clap argument definitions for the `orgtree` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "orgtree")]
#[command(about = "Explore large org charts by searching, loading only what you need")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Chart dataset, overriding [source] path from .orgtree.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Arguments for `orgtree search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Search terms, joined with a space
    #[arg(required = true)]
    pub terms: Vec<String>,

    /// Output the search report as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchCommand {
    /// The search term as the data source sees it.
    pub fn term(&self) -> String {
        self.terms.join(" ")
    }
}

/// Arguments for `orgtree children`.
#[derive(Args, Debug, Clone)]
pub struct ChildrenCommand {
    /// Identifier of the node to expand
    pub id: String,

    /// Output the children as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `orgtree init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.orgtree.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `orgtree` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search the chart and show the part that connects the matches
    #[command(after_help = "\
Terms match case-insensitively anywhere in a person's first name, or in the display
name when no first name is recorded.

EXAMPLES:
  orgtree search test1
  orgtree search --json test4
  orgtree --data ./org.json search test2")]
    Search(SearchCommand),

    /// Interactive session: each line is a search term
    #[command(after_help = "\
COMMANDS:
  <term>         Search and highlight matches
  :expand <id>   Load and show the children of a node
  :quit          Leave the shell")]
    Shell,

    /// Expand the path to a node and list its children
    Children(ChildrenCommand),

    /// Initialize orgtree configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,

    /// Validate configuration and diagnose issues
    Check,
}

/// Parses CLI arguments, exiting with clap's message on error.
pub fn parse_cli() -> Cli {
    Cli::parse()
}
