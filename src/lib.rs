//! # tree-me
//!
//! `wt` keeps git worktrees in one predictable place and jumps into them.
//!
//! ## Features
//!
//! - **Predictable layout** - Worktrees live at `<root>/<repo-name>/<branch-name>`
//!   (default root `~/dev/worktrees`, override with `--root` or `WORKTREE_ROOT`)
//! - **Pull / merge requests** - `wt pr 123` and `wt mr 45` fetch the review head
//!   and check it out through `gh` / `glab`
//! - **Interactive pickers** - Leave out the branch or number to choose from a menu
//! - **Auto-cd** - `source <(wt shellenv)` makes the shell follow the
//!   `TREE_ME_CD:<path>` line every command prints
//!
//! ## Quick Start
//!
//! ```bash
//! # Check out an existing branch
//! wt checkout feature/auth
//!
//! # Start a new branch from the default branch
//! wt create fix-login
//!
//! # Review a GitHub pull request
//! wt pr https://github.com/org/repo/pull/123
//!
//! # Remove a worktree
//! wt rm fix-login
//! ```
//!
//! ## Module Structure
//!
//! - [`commands`] - Individual command implementations
//! - [`config`] - Resolves the worktree root from flags, env and the user config file
//! - [`forge`] - GitHub / GitLab detection, PR/MR references and `gh` / `glab` listings
//! - [`git`] - `git` CLI wrapper and parsers for its output
//! - [`selection`] - Abstracts interactive selection prompts for testability
//! - [`storage`] - Maps repositories and branches to worktree paths
//! - [`traits`] - Seams for mocking git and the forge CLIs

pub mod commands;
pub mod config;
pub mod error;
pub mod forge;
pub mod git;
pub mod selection;
pub mod shell_exec;
pub mod storage;
pub mod traits;

#[cfg(test)]
mod testing;

pub use anyhow::Result;
pub use error::Error;
