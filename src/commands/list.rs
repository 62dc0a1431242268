use anyhow::Result;
use std::io::Write;

use crate::git::GitCli;
use crate::traits::GitOperations;

/// Prints `git worktree list` unchanged
///
/// # Errors
/// Returns an error if git fails (e.g. outside a repository)
pub fn list_worktrees(out: &mut dyn Write) -> Result<()> {
    list_worktrees_with_git(&GitCli::new(), out)
}

/// Test version that accepts a mock git repository
///
/// # Errors
/// See [`list_worktrees`]
pub fn list_worktrees_with_git(git: &dyn GitOperations, out: &mut dyn Write) -> Result<()> {
    write!(out, "{}", git.list_worktrees()?)?;
    Ok(())
}
