//! In-memory stand-ins for git and the forge CLIs, used by command tests.

use anyhow::Result;
use std::cell::RefCell;
use std::path::Path;

use crate::error::Error;
use crate::forge::Forge;
use crate::traits::{ForgeOperations, GitOperations};

/// Scripted [`GitOperations`] that records every mutating call.
#[derive(Default)]
pub struct MockGit {
    pub repo_name: Option<String>,
    pub default_base: String,
    pub origin_url: Option<String>,
    pub existing_branches: Vec<String>,
    pub branch_listing: String,
    pub worktree_listing: Option<String>,
    pub fail_add: bool,
    pub fail_fetch: bool,
    pub calls: RefCell<Vec<String>>,
}

impl MockGit {
    pub fn new() -> Self {
        Self {
            repo_name: Some("tree-me".to_string()),
            default_base: "main".to_string(),
            worktree_listing: Some("/src/tree-me  1a2b3c4 [main]\n".to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl GitOperations for MockGit {
    fn repo_name(&self) -> Result<String> {
        self.repo_name
            .clone()
            .ok_or_else(|| Error::NotInRepository.into())
    }

    fn default_base(&self) -> String {
        self.default_base.clone()
    }

    fn remote_url(&self, remote: &str) -> Option<String> {
        if remote == "origin" {
            self.origin_url.clone()
        } else {
            None
        }
    }

    fn branch_exists(&self, branch: &str) -> bool {
        self.existing_branches.iter().any(|b| b == branch)
    }

    fn list_branches(&self) -> Result<String> {
        Ok(self.branch_listing.clone())
    }

    fn list_worktrees(&self) -> Result<String> {
        self.worktree_listing.clone().ok_or_else(|| {
            Error::CommandFailed {
                command: "git worktree list".to_string(),
                stderr: "fatal: not a git repository".to_string(),
            }
            .into()
        })
    }

    fn add_worktree(&self, path: &Path, branch: &str) -> Result<()> {
        self.record(format!("add {} {}", path.display(), branch));
        if self.fail_add {
            return Err(Error::CommandFailed {
                command: "git worktree add".to_string(),
                stderr: "fatal: invalid reference".to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn add_worktree_new_branch(&self, path: &Path, branch: &str, base: &str) -> Result<()> {
        self.record(format!("add {} -b {} {}", path.display(), branch, base));
        Ok(())
    }

    fn remove_worktree(&self, path: &Path) -> Result<()> {
        self.record(format!("remove {}", path.display()));
        Ok(())
    }

    fn prune_worktrees(&self) -> Result<()> {
        self.record("prune".to_string());
        Ok(())
    }

    fn fetch(&self, remote: &str, refspec: &str) -> Result<()> {
        self.record(format!("fetch {} {}", remote, refspec));
        if self.fail_fetch {
            return Err(Error::CommandFailed {
                command: "git fetch".to_string(),
                stderr: "fatal: couldn't find remote ref".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// Scripted [`ForgeOperations`].
#[derive(Default)]
pub struct MockForge {
    pub installed: bool,
    pub listing: Option<String>,
    pub list_calls: RefCell<usize>,
}

impl MockForge {
    pub fn with_listing(listing: &str) -> Self {
        Self {
            installed: true,
            listing: Some(listing.to_string()),
            ..Self::default()
        }
    }

    pub fn missing() -> Self {
        Self::default()
    }
}

impl ForgeOperations for MockForge {
    fn is_installed(&self, _forge: Forge) -> bool {
        self.installed
    }

    fn list_open(&self, forge: Forge) -> Result<String> {
        *self.list_calls.borrow_mut() += 1;
        self.listing.clone().ok_or_else(|| {
            Error::CommandFailed {
                command: format!("{} list", forge.tool()),
                stderr: "HTTP 401".to_string(),
            }
            .into()
        })
    }
}

/// Collects command output for assertions.
pub fn output_of(buf: &[u8]) -> String {
    String::from_utf8_lossy(buf).into_owned()
}
