//! Process-wide configuration.
//!
//! A [`Config`] is resolved once in `main` and handed to every command. The
//! worktree root is chosen by precedence:
//!
//! 1. `--root` / `WORKTREE_ROOT` (an empty value counts as unset)
//! 2. `root` in the user config file
//! 3. `<home>/dev/worktrees`
//!
//! # Config File
//!
//! Lives at `<config_dir>/tree-me/config.toml` (e.g.
//! `~/.config/tree-me/config.toml` on Linux):
//!
//! ```toml
//! root = "~/src/worktrees"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Version string reported by `wt version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Immutable settings shared by all commands for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub root: PathBuf,
    pub version: &'static str,
}

/// On-disk user configuration. Every field is optional.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct FileConfig {
    /// Directory under which `<repo>/<branch>` worktrees are created
    #[serde(default)]
    pub root: Option<String>,
}

impl Config {
    /// Resolves the configuration for this invocation.
    ///
    /// `root_override` is the value of `--root` / `WORKTREE_ROOT`.
    ///
    /// # Errors
    /// Returns an error if no override is given, the config file does not set
    /// a root, and the home directory cannot be determined
    pub fn load(root_override: Option<PathBuf>) -> Result<Self> {
        let file_config = match FileConfig::default_path() {
            Some(path) => FileConfig::load_from(&path),
            None => FileConfig::default(),
        };
        Self::resolve(root_override, &file_config)
    }

    /// Applies the root precedence rules to already-loaded inputs.
    ///
    /// # Errors
    /// Returns an error if the home directory is needed but unknown
    pub fn resolve(root_override: Option<PathBuf>, file_config: &FileConfig) -> Result<Self> {
        let root = match root_override.filter(|p| !p.as_os_str().is_empty()) {
            Some(root) => root,
            None => match file_config.root.as_deref().filter(|r| !r.trim().is_empty()) {
                Some(root) => PathBuf::from(shellexpand::tilde(root.trim()).as_ref()),
                None => default_root()?,
            },
        };

        log::debug!("worktree root: {}", root.display());

        Ok(Self {
            root,
            version: VERSION,
        })
    }
}

impl FileConfig {
    /// Location of the user config file, if the platform has a config dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tree-me").join("config.toml"))
    }

    /// Loads the config file, falling back to defaults when it is missing,
    /// unreadable, blank or not valid TOML.
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Cannot read {}, using defaults: {}", path.display(), e);
                return Self::default();
            }
        };

        if content.trim().is_empty() {
            return Self::default();
        }

        match toml::from_str::<FileConfig>(&content) {
            Ok(config) => config,
            Err(e) => {
                log::warn!(
                    "Invalid TOML in {}, using defaults: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }
}

fn default_root() -> Result<PathBuf> {
    Ok(dirs::home_dir()
        .context("Failed to get user home directory")?
        .join("dev")
        .join("worktrees"))
}
