//! Subcommand implementations.
//!
//! Each command has a thin entry point wired to the real git / forge CLIs
//! and the inquire prompt, plus a `*_with` variant that takes those
//! collaborators as trait objects so it can be exercised with mocks.

use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::git::parse;
use crate::traits::GitOperations;

pub mod checkout;
pub mod completions;
pub mod create;
pub mod list;
pub mod prune;
pub mod remove;
pub mod review;
pub mod shellenv;
pub mod version;

/// Prefix of the line the shell integration turns into a `cd`.
pub const CD_MARKER: &str = "TREE_ME_CD:";

/// Writes the `TREE_ME_CD:<path>` line.
///
/// # Errors
/// Returns an error if writing to `out` fails
pub fn print_cd_marker(out: &mut dyn Write, path: &Path) -> Result<()> {
    writeln!(out, "{}{}", CD_MARKER, path.display())?;
    Ok(())
}

/// Path of the worktree already checked out on `branch`, if any.
///
/// A failing `git worktree list` is treated as "not there yet".
pub fn existing_worktree(git: &dyn GitOperations, branch: &str) -> Option<PathBuf> {
    match git.list_worktrees() {
        Ok(listing) => parse::find_worktree(&listing, branch),
        Err(e) => {
            log::debug!("could not list worktrees, assuming none: {}", e);
            None
        }
    }
}

/// Reports an already checked out worktree and points the shell at it.
///
/// Returns `true` if `branch` had a worktree and nothing more needs doing.
///
/// # Errors
/// Returns an error if writing to `out` fails
pub fn reuse_existing(git: &dyn GitOperations, branch: &str, out: &mut dyn Write) -> Result<bool> {
    match existing_worktree(git, branch) {
        Some(path) => {
            writeln!(out, "✓ Worktree already exists: {}", path.display())?;
            print_cd_marker(out, &path)?;
            Ok(true)
        }
        None => Ok(false),
    }
}
