use anyhow::Result;
use std::io::Write;

use crate::git::GitCli;
use crate::traits::GitOperations;

/// Runs `git worktree prune`
///
/// # Errors
/// Returns an error if git fails
pub fn prune_worktrees(out: &mut dyn Write) -> Result<()> {
    prune_worktrees_with_git(&GitCli::new(), out)
}

/// Test version that accepts a mock git repository
///
/// # Errors
/// See [`prune_worktrees`]
pub fn prune_worktrees_with_git(git: &dyn GitOperations, out: &mut dyn Write) -> Result<()> {
    git.prune_worktrees()?;
    writeln!(out, "✓ Pruned stale worktree administrative files")?;
    Ok(())
}
