use anyhow::Result;
use std::io::Write;

use crate::commands::{print_cd_marker, reuse_existing};
use crate::config::Config;
use crate::error::Error;
use crate::git::{GitCli, parse};
use crate::selection::{Choice, RealSelectionProvider, SelectionProvider, choose};
use crate::storage::WorktreeStorage;
use crate::traits::GitOperations;

/// Checks out an existing branch into `<root>/<repo>/<branch>`
///
/// # Errors
/// Returns an error if:
/// - Not inside a git repository
/// - The branch exists neither locally nor on origin
/// - Interactive selection is empty, cancelled or unavailable
/// - `git worktree add` fails
pub fn checkout(config: &Config, branch: Option<&str>, out: &mut dyn Write) -> Result<()> {
    checkout_with(&GitCli::new(), &RealSelectionProvider, config, branch, out)
}

/// Checks out a branch with custom git and selection providers (for testing)
///
/// # Errors
/// See [`checkout`]
pub fn checkout_with(
    git: &dyn GitOperations,
    provider: &dyn SelectionProvider,
    config: &Config,
    branch: Option<&str>,
    out: &mut dyn Write,
) -> Result<()> {
    let branch = match branch {
        Some(branch) => branch.to_string(),
        None => select_branch(git, provider)?,
    };

    let repo_name = git.repo_name()?;
    let storage = WorktreeStorage::new(&config.root);
    let path = storage.get_worktree_path(&repo_name, &branch);

    if reuse_existing(git, &branch, out)? {
        return Ok(());
    }

    if !git.branch_exists(&branch) {
        return Err(Error::BranchNotFound(branch).into());
    }

    log::info!("adding worktree for '{}' at {}", branch, path.display());
    git.add_worktree(&path, &branch)?;

    writeln!(out, "✓ Worktree created at: {}", path.display())?;
    print_cd_marker(out, &path)?;
    Ok(())
}

/// Prints every checkout-able branch, one per line, for shell completion
///
/// # Errors
/// Returns an error if the branches cannot be listed
pub fn list_completions(git: &dyn GitOperations, out: &mut dyn Write) -> Result<()> {
    for branch in parse::available_branches(&git.list_branches()?) {
        writeln!(out, "{}", branch)?;
    }
    Ok(())
}

fn select_branch(git: &dyn GitOperations, provider: &dyn SelectionProvider) -> Result<String> {
    let branches = parse::available_branches(&git.list_branches()?);
    let choices = branches.into_iter().map(Choice::plain).collect();
    choose(
        provider,
        "Select branch to checkout",
        "no available branches to checkout",
        choices,
    )
}
