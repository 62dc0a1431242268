use std::path::PathBuf;

/// Computes where worktrees live on disk: `<root>/<repo>/<branch>`.
///
/// Purely a path calculator. Whether a worktree actually exists is answered
/// by `git worktree list` (see [`crate::git::parse::find_worktree`]).
pub struct WorktreeStorage {
    root_dir: PathBuf,
}

impl WorktreeStorage {
    #[must_use]
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    #[must_use]
    pub fn get_worktree_path(&self, repo_name: &str, branch_name: &str) -> PathBuf {
        self.get_repo_storage_dir(repo_name).join(branch_name)
    }

    /// Gets the storage directory for a specific repository
    #[must_use]
    pub fn get_repo_storage_dir(&self, repo_name: &str) -> PathBuf {
        self.root_dir.join(repo_name)
    }
}

/// Derives a repository name from a remote URL: the last path segment with
/// any `.git` suffix removed.
///
/// Handles both `https://host/org/repo.git` and `git@host:org/repo.git`.
#[must_use]
pub fn repo_name_from_url(url: &str) -> Option<String> {
    let trimmed = url.trim().trim_end_matches('/');
    let base = trimmed.rsplit(['/', ':']).next().unwrap_or(trimmed);
    let name = base.strip_suffix(".git").unwrap_or(base);
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
