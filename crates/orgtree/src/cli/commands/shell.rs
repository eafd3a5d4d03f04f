//! Implementation of `orgtree shell`.
//!
//! Each input line is a search term, or a command starting with `:`. A line that arrives
//! while a search is still fetching supersedes that search.

use std::{io, process::ExitCode};

use orgtree_search::{DataSource, Renderer, SearchError, SearchOutcome, SearchSession};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, stdin};

use crate::cli::{
    context::CommandContext,
    output::{dim, print_unresolved, report_summary},
    render::TreeRenderer,
};

/// One parsed line of shell input.
#[derive(Debug, PartialEq, Eq)]
enum ShellInput<'a> {
    /// Blank line.
    Empty,
    /// `:quit` or `:q`.
    Quit,
    /// `:expand <id>`.
    Expand(&'a str),
    /// `:help`.
    Help,
    /// A `:` command that is not recognised, or is missing its argument.
    Invalid(&'a str),
    /// Anything else.
    Search(&'a str),
}

impl<'a> ShellInput<'a> {
    /// Parses one line.
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }
        let Some(command) = line.strip_prefix(':') else {
            return Self::Search(line);
        };
        let (name, arg) = command
            .split_once(char::is_whitespace)
            .map_or((command, ""), |(name, arg)| (name, arg.trim()));
        match (name, arg) {
            ("quit" | "q", _) => Self::Quit,
            ("help" | "h", _) => Self::Help,
            ("expand" | "e", id) if !id.is_empty() => Self::Expand(id),
            _ => Self::Invalid(line),
        }
    }
}

/// Runs the interactive session until `:quit` or end of input.
pub async fn run(ctx: &CommandContext) -> ExitCode {
    let mut session = match ctx.open_session(TreeRenderer::live()).await {
        Ok(session) => session,
        Err(code) => return code,
    };
    println!("{}", dim("Type a name to search, :help for commands."));

    let mut lines = BufReader::new(stdin()).lines();
    match drive(&mut session, &mut lines).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: failed to read input: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Reads lines from `lines` and applies them to `session`.
async fn drive<S, R, B>(
    session: &mut SearchSession<S, R>,
    lines: &mut Lines<B>,
) -> io::Result<()>
where
    S: DataSource,
    R: Renderer,
    B: AsyncBufRead + Unpin,
{
    let canceller = session.canceller();
    let mut pending: Option<String> = None;
    let mut closed = false;

    loop {
        let line = match pending.take() {
            Some(line) => line,
            None if closed => return Ok(()),
            None => match lines.next_line().await? {
                Some(line) => line,
                None => return Ok(()),
            },
        };

        match ShellInput::parse(&line) {
            ShellInput::Empty => {}
            ShellInput::Quit => return Ok(()),
            ShellInput::Help => print_help(),
            ShellInput::Invalid(input) => eprintln!("error: unknown command: {input}"),
            ShellInput::Expand(id) => {
                if let Err(e) = session.expand(id).await {
                    eprintln!("error: cannot expand {id}: {e}");
                }
            }
            ShellInput::Search(term) => {
                let search = session.search(term);
                tokio::pin!(search);
                let outcome = loop {
                    tokio::select! {
                        biased;
                        outcome = &mut search => break outcome,
                        next = lines.next_line(), if pending.is_none() && !closed => {
                            match next? {
                                Some(next) => {
                                    pending = Some(next);
                                    canceller.supersede();
                                }
                                None => closed = true,
                            }
                        }
                    }
                };
                print_outcome(term, outcome);
            }
        }
    }
}

/// Reports a finished search below the frame the renderer already printed.
fn print_outcome(term: &str, outcome: Result<SearchOutcome, SearchError>) {
    match outcome {
        Ok(SearchOutcome::Found(report)) => {
            println!("{}", report_summary(&report));
            print_unresolved(&report);
        }
        Ok(SearchOutcome::NotFound) => println!("Not found"),
        Ok(SearchOutcome::Superseded) => {
            tracing::debug!(term, "superseded by newer input");
        }
        Ok(SearchOutcome::Ignored) => {}
        Err(e) => eprintln!("error: search for '{term}' failed: {e}"),
    }
}

/// Prints the shell commands.
fn print_help() {
    println!("  <term>         search and highlight matches");
    println!("  :expand <id>   load and show the children of a node");
    println!("  :quit          leave the shell");
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashSet,
        path::Path,
        sync::{Arc, Mutex},
        time::Duration,
    };

    use orgtree_cache::{Node, NodeId};
    use orgtree_search::{MemorySource, SessionOptions};

    use super::*;

    const ORG: &str = r#"[
        {"id": "root", "name": "Root", "hasChildren": true},
        {"id": "1", "parentId": "root", "name": "Ann Vale", "hasChildren": true},
        {"id": "2", "parentId": "1", "name": "Bo Reed"}
    ]"#;

    /// Records the highlighted set of every render.
    #[derive(Clone, Default)]
    struct Frames(Arc<Mutex<Vec<Vec<NodeId>>>>);

    impl Renderer for Frames {
        fn set_container(&mut self, _container: &str) {}
        fn set_root(&mut self, _root: &Node) {}
        fn has_node(&self, _id: &str) -> bool {
            false
        }
        fn add_nodes(&mut self, _nodes: &[Node]) {}
        fn set_expanded(&mut self, _id: &str) {}
        fn set_centered(&mut self, _id: &str) {}
        fn render(&mut self, highlighted: &HashSet<NodeId>) {
            let mut ids: Vec<NodeId> = highlighted.iter().cloned().collect();
            ids.sort();
            self.0.lock().unwrap().push(ids);
        }
    }

    async fn session(latency: Duration) -> (SearchSession<MemorySource, Frames>, Frames) {
        let source = MemorySource::from_json_str(ORG, Path::new("org.json"))
            .unwrap()
            .with_latency(latency);
        let frames = Frames::default();
        let session = SearchSession::open(source, frames.clone(), SessionOptions::default())
            .await
            .unwrap();
        (session, frames)
    }

    #[test]
    fn parses_commands() {
        assert_eq!(ShellInput::parse("  "), ShellInput::Empty);
        assert_eq!(ShellInput::parse(":q"), ShellInput::Quit);
        assert_eq!(ShellInput::parse(":expand  8 "), ShellInput::Expand("8"));
        assert_eq!(ShellInput::parse(":expand"), ShellInput::Invalid(":expand"));
        assert_eq!(ShellInput::parse(":zap"), ShellInput::Invalid(":zap"));
        assert_eq!(ShellInput::parse(" ann "), ShellInput::Search("ann"));
    }

    #[tokio::test]
    async fn lines_drive_the_session() {
        let (mut session, frames) = session(Duration::ZERO).await;
        let input: &[u8] = b"bo\n:quit\nann\n";
        let mut lines = BufReader::new(input).lines();

        drive(&mut session, &mut lines).await.unwrap();

        assert_eq!(session.highlighted(), vec![NodeId::from("2")]);
        let last = frames.0.lock().unwrap().last().cloned().unwrap();
        assert_eq!(last, vec![NodeId::from("2")]);
    }

    #[tokio::test(start_paused = true)]
    async fn queued_line_supersedes_running_search() {
        let (mut session, frames) = session(Duration::from_millis(100)).await;
        // Both lines are already buffered, so the second arrives while the first
        // search is still waiting on the data source.
        let input: &[u8] = b"ann\nbo\n";
        let mut lines = BufReader::new(input).lines();

        drive(&mut session, &mut lines).await.unwrap();

        assert_eq!(session.highlighted(), vec![NodeId::from("2")]);
        let rendered = frames.0.lock().unwrap();
        assert!(!rendered.iter().flatten().any(|id| id.as_str() == "1"));
    }
}
