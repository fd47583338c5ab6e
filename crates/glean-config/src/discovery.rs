//! Configuration file discovery.
//!
//! Finds the `.glean.toml` closest to a starting directory by walking up the
//! directory tree, falling back to the global `~/.glean.toml`.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".glean.toml";

/// Returns the configuration file that applies to `cwd`.
///
/// The closest `.glean.toml` at or above `cwd` wins. If there is none, the
/// global `~/.glean.toml` is used when it exists.
pub fn discover_config_file(cwd: &Path) -> Option<PathBuf> {
    cwd.ancestors()
        .map(|dir| dir.join(CONFIG_FILENAME))
        .find(|path| path.is_file())
        .or_else(|| global_config_path().filter(|path| path.is_file()))
}

/// Returns the path to the global configuration file (`~/.glean.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}
