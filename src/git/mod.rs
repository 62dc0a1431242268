use anyhow::Result;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::Error;
use crate::shell_exec;
use crate::storage::repo_name_from_url;
use crate::traits::GitOperations;

pub mod parse;

/// [`GitOperations`] implemented by shelling out to the `git` binary.
#[derive(Debug, Default, Clone)]
pub struct GitCli {
    dir: Option<PathBuf>,
}

impl GitCli {
    /// Runs git in the current working directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs git in `dir` instead of the current working directory.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    fn command<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(dir) = &self.dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn output<I, S>(&self, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        shell_exec::run_checked(&mut self.command(args))
    }

    /// Runs a git command for its exit status only.
    fn succeeds<I, S>(&self, args: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        shell_exec::run(&mut self.command(args)).is_ok_and(|output| output.status.success())
    }

    /// Runs a mutating git command, echoing git's own progress output to
    /// stderr so the user still sees it.
    fn mutate<I, S>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = self.command(args);
        let command = shell_exec::display_command(&cmd);
        let output = shell_exec::run(&mut cmd)?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(Error::CommandFailed {
                command,
                stderr: stderr.trim().to_string(),
            }
            .into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        for line in stdout.lines().chain(stderr.lines()) {
            eprintln!("{}", line);
        }
        Ok(())
    }
}

impl GitOperations for GitCli {
    fn repo_name(&self) -> Result<String> {
        if let Some(name) = self
            .remote_url("origin")
            .and_then(|url| repo_name_from_url(&url))
        {
            return Ok(name);
        }

        let toplevel = self
            .output(["rev-parse", "--show-toplevel"])
            .map_err(|_| Error::NotInRepository)?;
        Path::new(toplevel.trim())
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| Error::NotInRepository.into())
    }

    fn default_base(&self) -> String {
        match self.output(["symbolic-ref", "refs/remotes/origin/HEAD"]) {
            Ok(reference) => {
                let reference = reference.trim();
                reference
                    .strip_prefix("refs/remotes/origin/")
                    .unwrap_or(reference)
                    .to_string()
            }
            Err(e) => {
                log::debug!("origin/HEAD not set, defaulting base to main: {}", e);
                "main".to_string()
            }
        }
    }

    fn remote_url(&self, remote: &str) -> Option<String> {
        self.output(["remote", "get-url", remote])
            .ok()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
    }

    fn branch_exists(&self, branch: &str) -> bool {
        if branch.is_empty() {
            return false;
        }
        let local = format!("refs/heads/{}", branch);
        self.succeeds(["show-ref", "--verify", "--quiet", local.as_str()])
            || parse::KNOWN_REMOTES.iter().any(|remote| {
                let tracking = format!("refs/remotes/{}/{}", remote, branch);
                self.succeeds(["show-ref", "--verify", "--quiet", tracking.as_str()])
            })
    }

    fn list_branches(&self) -> Result<String> {
        self.output(["branch", "-a", "--format=%(refname:short)"])
    }

    fn list_worktrees(&self) -> Result<String> {
        self.output(["worktree", "list"])
    }

    fn add_worktree(&self, path: &Path, branch: &str) -> Result<()> {
        self.mutate([
            OsStr::new("worktree"),
            OsStr::new("add"),
            path.as_os_str(),
            OsStr::new(branch),
        ])
    }

    fn add_worktree_new_branch(&self, path: &Path, branch: &str, base: &str) -> Result<()> {
        self.mutate([
            OsStr::new("worktree"),
            OsStr::new("add"),
            path.as_os_str(),
            OsStr::new("-b"),
            OsStr::new(branch),
            OsStr::new(base),
        ])
    }

    fn remove_worktree(&self, path: &Path) -> Result<()> {
        self.mutate([OsStr::new("worktree"), OsStr::new("remove"), path.as_os_str()])
    }

    fn prune_worktrees(&self) -> Result<()> {
        self.mutate(["worktree", "prune"])
    }

    fn fetch(&self, remote: &str, refspec: &str) -> Result<()> {
        self.mutate(["fetch", remote, refspec])
    }
}
