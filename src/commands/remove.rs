use anyhow::Result;
use std::io::Write;
use std::path::Path;

use crate::commands::print_cd_marker;
use crate::error::Error;
use crate::git::{GitCli, parse};
use crate::selection::{Choice, RealSelectionProvider, SelectionProvider, choose};
use crate::traits::GitOperations;

/// Removes the worktree checked out on `branch`
///
/// If the current directory is inside the removed worktree, a cd marker for
/// the main worktree is printed so the shell does not stay in a deleted
/// directory.
///
/// # Errors
/// Returns an error if:
/// - No worktree has `branch` checked out
/// - Interactive selection is empty, cancelled or unavailable
/// - `git worktree remove` fails (e.g. uncommitted changes)
pub fn remove_worktree(branch: Option<&str>, out: &mut dyn Write) -> Result<()> {
    let cwd = std::env::current_dir().ok();
    remove_worktree_with(
        &GitCli::new(),
        &RealSelectionProvider,
        branch,
        cwd.as_deref(),
        out,
    )
}

/// Removes a worktree with custom git and selection providers (for testing)
///
/// # Errors
/// See [`remove_worktree`]
pub fn remove_worktree_with(
    git: &dyn GitOperations,
    provider: &dyn SelectionProvider,
    branch: Option<&str>,
    cwd: Option<&Path>,
    out: &mut dyn Write,
) -> Result<()> {
    let listing = git.list_worktrees()?;

    let branch = match branch {
        Some(branch) => branch.to_string(),
        None => {
            let choices = parse::worktree_branches(&listing)
                .into_iter()
                .map(Choice::plain)
                .collect();
            choose(
                provider,
                "Select worktree to remove",
                "no worktrees to remove",
                choices,
            )?
        }
    };

    let path = parse::find_worktree(&listing, &branch)
        .ok_or_else(|| Error::WorktreeNotFound(branch.clone()))?;

    let return_to = match cwd {
        Some(cwd) if cwd.starts_with(&path) => parse::main_worktree(&listing),
        _ => None,
    };

    git.remove_worktree(&path)?;
    writeln!(out, "✓ Removed worktree: {}", path.display())?;

    if let Some(main) = return_to {
        log::info!("left removed worktree, returning to {}", main.display());
        print_cd_marker(out, &main)?;
    }
    Ok(())
}

/// Prints the branches of every linked worktree, one per line
///
/// # Errors
/// Returns an error if the worktrees cannot be listed
pub fn list_completions(git: &dyn GitOperations, out: &mut dyn Write) -> Result<()> {
    for branch in parse::worktree_branches(&git.list_worktrees()?) {
        writeln!(out, "{}", branch)?;
    }
    Ok(())
}
