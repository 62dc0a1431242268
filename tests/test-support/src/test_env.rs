#![allow(clippy::unwrap_used)] // Tests use unwrap for simplicity

use anyhow::{Context, Result};
use assert_fs::TempDir;
use assert_fs::prelude::*;

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

/// Throw-away git repository plus a worktree root, both in one temp dir
pub struct CliTestEnvironment {
    pub repo_dir: assert_fs::fixture::ChildPath,
    pub storage_dir: assert_fs::fixture::ChildPath,
    /// Isolated `HOME` / `XDG_CONFIG_HOME` so the user's config file is never read
    pub home_dir: assert_fs::fixture::ChildPath,
    _temp_dir: TempDir, // Keep temp_dir private to ensure cleanup, but don't expose it
}

impl CliTestEnvironment {
    /// Creates a repository named `test_repo` with one commit on `main`
    ///
    /// # Errors
    /// Returns an error if:
    /// - Failed to create temporary directory
    /// - Failed to initialize git repository
    /// - Failed to configure git settings
    /// - Failed to create initial commit
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temporary directory")?;
        let repo_dir = temp_dir.child("test_repo");
        let storage_dir = temp_dir.child("worktrees");
        let home_dir = temp_dir.child("home");

        repo_dir.create_dir_all()?;
        storage_dir.create_dir_all()?;
        home_dir.child(".config").create_dir_all()?;

        run_git(repo_dir.path(), &["init", "-q"])?;
        run_git(repo_dir.path(), &["config", "user.name", "Test User"])?;
        run_git(repo_dir.path(), &["config", "user.email", "test@example.com"])?;

        repo_dir.child("README.md").write_str("# Test Repo")?;
        run_git(repo_dir.path(), &["add", "."])?;
        run_git(repo_dir.path(), &["commit", "-q", "-m", "Initial commit"])?;

        // Some git versions default to 'master'
        run_git(repo_dir.path(), &["branch", "-M", "main"])?;

        Ok(Self {
            repo_dir,
            storage_dir,
            home_dir,
            _temp_dir: temp_dir,
        })
    }

    /// Like [`CliTestEnvironment::new`], with a bare `origin` remote that has
    /// `main` pushed and `origin/HEAD` set
    ///
    /// # Errors
    /// Returns an error if any git command fails
    pub fn with_origin() -> Result<Self> {
        let env = Self::new()?;
        let origin = env.origin_dir();
        origin.create_dir_all()?;
        run_git(origin.path(), &["init", "-q", "--bare"])?;

        let origin_path = origin.path().to_string_lossy().into_owned();
        env.git(&["remote", "add", "origin", &origin_path])?;
        env.git(&["push", "-q", "origin", "main"])?;
        env.git(&["remote", "set-head", "origin", "main"])?;
        Ok(env)
    }

    /// Bare repository used as `origin` by [`CliTestEnvironment::with_origin`]
    pub fn origin_dir(&self) -> assert_fs::fixture::ChildPath {
        self._temp_dir.child("remote").child("test_repo.git")
    }

    /// Runs git in the repository directory
    ///
    /// # Errors
    /// Returns an error if git exits unsuccessfully
    pub fn git(&self, args: &[&str]) -> Result<String> {
        run_git(self.repo_dir.path(), args)
    }

    /// Execute a non-interactive CLI command with proper environment setup
    ///
    /// # Errors
    /// Returns an error if the command setup fails
    pub fn run_command(&self, args: &[&str]) -> Result<assert_cmd::Command> {
        self.run_command_in(self.repo_dir.path(), args)
    }

    /// Same as [`CliTestEnvironment::run_command`] from another directory
    ///
    /// # Errors
    /// Returns an error if the command setup fails
    pub fn run_command_in(&self, dir: &Path, args: &[&str]) -> Result<assert_cmd::Command> {
        let mut cmd = assert_cmd::Command::cargo_bin("wt").context("Failed to find wt binary")?;

        cmd.current_dir(dir)
            .env("WORKTREE_ROOT", self.storage_dir.path())
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.child(".config").path())
            .env_remove("RUST_LOG");

        cmd.args(args);
        Ok(cmd)
    }

    /// Path where `wt` puts the worktree for `branch`
    pub fn worktree_path(&self, branch: &str) -> assert_fs::fixture::ChildPath {
        self.storage_dir.child("test_repo").child(branch)
    }

    /// `PATH` with `dir` searched first
    pub fn path_with(dir: &Path) -> OsString {
        let mut paths = vec![dir.to_path_buf()];
        if let Some(existing) = std::env::var_os("PATH") {
            paths.extend(std::env::split_paths(&existing));
        }
        std::env::join_paths(paths).unwrap_or_else(|_| dir.as_os_str().to_os_string())
    }
}

/// Runs git in `dir`, returning its stdout
///
/// # Errors
/// Returns an error if git exits unsuccessfully
pub fn run_git(dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .context("Failed to execute git command")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("git {} failed: {}", args.join(" "), stderr);
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use predicates::prelude::*;

    #[test]
    fn test_cli_test_environment_creation() -> Result<()> {
        let env = CliTestEnvironment::new()?;

        env.repo_dir.assert(predicate::path::is_dir());
        env.repo_dir.child(".git").assert(predicate::path::exists());
        env.repo_dir
            .child("README.md")
            .assert(predicate::str::contains("# Test Repo"));
        env.storage_dir.assert(predicate::path::is_dir());

        let branch = env.git(&["branch", "--show-current"])?;
        assert_eq!(branch.trim(), "main");
        Ok(())
    }

    #[test]
    fn test_origin_is_configured() -> Result<()> {
        let env = CliTestEnvironment::with_origin()?;

        let head = env.git(&["symbolic-ref", "refs/remotes/origin/HEAD"])?;
        assert_eq!(head.trim(), "refs/remotes/origin/main");
        Ok(())
    }

    #[test]
    fn test_worktree_path_keeps_slashes() -> Result<()> {
        let env = CliTestEnvironment::new()?;
        let path = env.worktree_path("feature/test-branch");
        assert!(path.path().ends_with("test_repo/feature/test-branch"));
        Ok(())
    }
}
