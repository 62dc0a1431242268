//! Parsers for `git branch` and `git worktree list` output.

use std::collections::BTreeSet;
use std::path::PathBuf;

/// Remotes whose tracking branches are folded into local names.
///
/// Only these two are recognised; tracking branches of any other remote keep
/// their `<remote>/` prefix.
pub const KNOWN_REMOTES: &[&str] = &["origin", "upstream"];

/// Turns `git branch -a --format=%(refname:short)` output into the set of
/// branch names that can be checked out.
///
/// - `origin/feature` and `feature` collapse into one `feature`
/// - `origin/HEAD` and `HEAD -> ...` aliases are dropped
/// - bare remote names (recent git prints `origin` for `origin/HEAD`) are dropped
///
/// The result is sorted.
#[must_use]
pub fn available_branches(raw: &str) -> Vec<String> {
    let mut branches = BTreeSet::new();

    for line in raw.lines() {
        let entry = line.trim();
        if entry.is_empty() || entry.contains("->") || is_remote_head(entry) {
            continue;
        }

        let name = strip_remote_prefix(entry);
        if KNOWN_REMOTES.contains(&name) {
            continue;
        }

        branches.insert(name.to_string());
    }

    branches.into_iter().collect()
}

fn is_remote_head(entry: &str) -> bool {
    KNOWN_REMOTES.iter().any(|remote| {
        entry
            .strip_prefix(remote)
            .and_then(|rest| rest.strip_prefix('/'))
            .is_some_and(|rest| rest.starts_with("HEAD"))
    })
}

fn strip_remote_prefix(entry: &str) -> &str {
    KNOWN_REMOTES
        .iter()
        .find_map(|remote| {
            entry
                .strip_prefix(remote)
                .and_then(|rest| rest.strip_prefix('/'))
        })
        .unwrap_or(entry)
}

/// Finds the worktree checked out on `branch` in `git worktree list` output.
///
/// Lines look like `/path/to/tree  abc1234 [branch]`; the match is on the
/// exact `[branch]` token and the path is the first field of that line.
#[must_use]
pub fn find_worktree(listing: &str, branch: &str) -> Option<PathBuf> {
    let needle = format!("[{}]", branch);
    listing
        .lines()
        .filter(|line| line.contains(&needle))
        .find_map(|line| line.split_whitespace().next())
        .map(PathBuf::from)
}

/// Path of the main worktree, which `git worktree list` always prints first.
#[must_use]
pub fn main_worktree(listing: &str) -> Option<PathBuf> {
    listing
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().next())
        .map(PathBuf::from)
}

/// Branch names of every linked worktree (the main worktree is excluded).
#[must_use]
pub fn worktree_branches(listing: &str) -> Vec<String> {
    listing
        .lines()
        .skip(1)
        .filter_map(bracketed_branch)
        .map(str::to_string)
        .collect()
}

fn bracketed_branch(line: &str) -> Option<&str> {
    let start = line.find('[')? + 1;
    let len = line[start..].find(']')?;
    let name = &line[start..start + len];
    if name.is_empty() { None } else { Some(name) }
}
