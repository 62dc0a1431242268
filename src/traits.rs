use anyhow::Result;
use std::path::Path;

use crate::forge::Forge;

/// Trait for Git operations to enable mocking in tests
///
/// Listing methods return raw `git` output; the parsers in
/// [`crate::git::parse`] turn it into names and paths.
pub trait GitOperations {
    /// Repository name used for the `<root>/<repo>` directory.
    ///
    /// # Errors
    /// Returns [`crate::Error::NotInRepository`] outside a git repository
    fn repo_name(&self) -> Result<String>;

    /// Branch new worktrees start from when `create` is given no base.
    fn default_base(&self) -> String;

    /// URL of a remote, or `None` if the remote is not configured.
    fn remote_url(&self, remote: &str) -> Option<String>;

    /// Whether `branch` exists locally or on one of the known remotes.
    fn branch_exists(&self, branch: &str) -> bool;

    /// # Errors
    /// Returns an error if `git branch` fails
    fn list_branches(&self) -> Result<String>;

    /// # Errors
    /// Returns an error if `git worktree list` fails
    fn list_worktrees(&self) -> Result<String>;

    /// # Errors
    /// Returns an error wrapping git's stderr if the worktree cannot be added
    fn add_worktree(&self, path: &Path, branch: &str) -> Result<()>;

    /// # Errors
    /// Returns an error wrapping git's stderr if the worktree cannot be added
    fn add_worktree_new_branch(&self, path: &Path, branch: &str, base: &str) -> Result<()>;

    /// # Errors
    /// Returns an error wrapping git's stderr if the worktree cannot be removed
    fn remove_worktree(&self, path: &Path) -> Result<()>;

    /// # Errors
    /// Returns an error if `git worktree prune` fails
    fn prune_worktrees(&self) -> Result<()>;

    /// Fetches `refspec` from `remote`.
    ///
    /// # Errors
    /// Returns an error if the fetch fails
    fn fetch(&self, remote: &str, refspec: &str) -> Result<()>;
}

/// Operations backed by a forge's review CLI (`gh` or `glab`).
pub trait ForgeOperations {
    /// Whether the forge's CLI can be found on `PATH`.
    fn is_installed(&self, forge: Forge) -> bool;

    /// Raw output of the forge's "list open requests" command.
    ///
    /// # Errors
    /// Returns an error if the CLI exits unsuccessfully
    fn list_open(&self, forge: Forge) -> Result<String>;
}
