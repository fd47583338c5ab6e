//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use glean_config::Config;
use glean_index::{FieldRegistry, Searchables};

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Explicit configuration path from `--config`.
    pub config_path: Option<PathBuf>,
    /// Loaded configuration (default when only the working directory was loaded).
    pub config: Config,
    /// Field registries over the configured schema.
    searchables: Searchables,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd, config_path.as_deref())?;
        Ok(Self::new(cwd, config_path, config))
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `init`, which must work even when an existing config file is invalid.
    pub fn load_cwd_only(config_path: Option<PathBuf>) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self::new(cwd, config_path, Config::default()))
    }

    /// Assembles a context from its parts.
    fn new(cwd: PathBuf, config_path: Option<PathBuf>, config: Config) -> Self {
        let searchables = config.searchables();
        Self {
            cwd,
            config_path,
            config,
            searchables,
        }
    }

    /// Returns the field registry for `record_type`, exiting with an error on failure.
    pub fn registry(&self, record_type: &str) -> Result<Arc<FieldRegistry>, ExitCode> {
        self.searchables.registry(record_type).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })
    }

    /// Returns the registry cache.
    pub fn searchables(&self) -> &Searchables {
        &self.searchables
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from `--config` or by discovery from `cwd`.
fn load_config_or_failure(cwd: &Path, config_path: Option<&Path>) -> Result<Config, ExitCode> {
    let loaded = match config_path {
        Some(path) => Config::load_file(path),
        None => Config::load(cwd),
    };
    loaded.map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
