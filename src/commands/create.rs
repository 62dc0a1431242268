use anyhow::Result;
use std::io::Write;

use crate::commands::{print_cd_marker, reuse_existing};
use crate::config::Config;
use crate::git::GitCli;
use crate::storage::WorktreeStorage;
use crate::traits::GitOperations;

/// Creates a new branch from `base` and checks it out in a fresh worktree
///
/// Without `base` the remote's default branch is used (`main` if unknown).
/// If the branch already has a worktree it is reused.
///
/// # Errors
/// Returns an error if:
/// - Not inside a git repository
/// - `git worktree add -b` fails (branch already exists, bad base, ...)
pub fn create_worktree(
    config: &Config,
    branch: &str,
    base: Option<&str>,
    out: &mut dyn Write,
) -> Result<()> {
    create_worktree_with_git(&GitCli::new(), config, branch, base, out)
}

/// Test version that accepts a mock git repository
///
/// # Errors
/// See [`create_worktree`]
pub fn create_worktree_with_git(
    git: &dyn GitOperations,
    config: &Config,
    branch: &str,
    base: Option<&str>,
    out: &mut dyn Write,
) -> Result<()> {
    let repo_name = git.repo_name()?;
    let storage = WorktreeStorage::new(&config.root);
    let path = storage.get_worktree_path(&repo_name, branch);

    if reuse_existing(git, branch, out)? {
        return Ok(());
    }

    let base = match base {
        Some(base) => base.to_string(),
        None => git.default_base(),
    };

    log::info!(
        "creating branch '{}' from '{}' at {}",
        branch,
        base,
        path.display()
    );
    git.add_worktree_new_branch(&path, branch, &base)?;

    writeln!(out, "✓ Worktree created at: {}", path.display())?;
    print_cd_marker(out, &path)?;
    Ok(())
}
