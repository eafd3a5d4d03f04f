//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use orgtree_cache::NodeId;
use orgtree_config::Config;
use orgtree_search::{MemorySource, Renderer, RetryPolicy, SearchSession, SessionOptions};

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
    /// Dataset given with `--data`, resolved against `cwd`.
    data: Option<PathBuf>,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load(data: Option<PathBuf>) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self::new(cwd, config, data))
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used by `init`, which must work even when an existing config file is invalid.
    pub fn load_cwd_only(data: Option<PathBuf>) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self::new(cwd, Config::default(), data))
    }

    /// Builds a context from parts.
    fn new(cwd: PathBuf, config: Config, data: Option<PathBuf>) -> Self {
        let data = data.map(|path| cwd.join(path));
        Self { cwd, config, data }
    }

    /// The dataset to read: `--data` if given, else `[source] path`.
    pub fn data_path(&self) -> Option<&Path> {
        self.data.as_deref().or(self.config.source.path.as_deref())
    }

    /// The dataset given with `--data`, if any.
    pub fn data_override(&self) -> Option<&Path> {
        self.data.as_deref()
    }

    /// Session settings derived from the configuration.
    pub fn session_options(&self) -> SessionOptions {
        let session = &self.config.session;
        SessionOptions {
            root_id: NodeId::from(session.root.as_str()),
            container: session.container.clone(),
            highlight_delay: session.highlight_delay(),
            retry: RetryPolicy {
                attempts: self.config.fetch.attempts,
                backoff: self.config.fetch.backoff(),
            },
        }
    }

    /// Reads the configured dataset, exiting with a consistent error on failure.
    pub fn open_source(&self) -> Result<MemorySource, ExitCode> {
        let Some(path) = self.data_path() else {
            eprintln!("error: no dataset configured");
            eprintln!("Pass --data <FILE> or set [source] path in .orgtree.toml.");
            return Err(ExitCode::FAILURE);
        };
        let source = MemorySource::from_json_file(path).map_err(|e| {
            eprintln!("error: failed to load dataset: {e}");
            ExitCode::FAILURE
        })?;
        tracing::debug!(path = %path.display(), records = source.len(), "dataset loaded");
        Ok(source.with_latency(self.config.source.latency()))
    }

    /// Opens a search session over the configured dataset.
    pub async fn open_session<R: Renderer>(
        &self,
        renderer: R,
    ) -> Result<SearchSession<MemorySource, R>, ExitCode> {
        let source = self.open_source()?;
        SearchSession::open(source, renderer, self.session_options())
            .await
            .map_err(|e| {
                eprintln!("error: failed to open chart: {e}");
                ExitCode::FAILURE
            })
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
