//! Test support utilities for tree-me integration tests
//!
//! Builds real throw-away git repositories (optionally with a bare `origin`)
//! and runs the `wt` binary against them. Not published.

pub mod patterns;
pub mod test_env;

// Re-export commonly used items for convenience
pub use patterns::{cd_target, create_branch, create_remote_branch, push_review_ref};
#[cfg(unix)]
pub use patterns::install_fake_tool;
pub use test_env::{CliTestEnvironment, run_git};
