#![allow(clippy::unwrap_used)] // Tests use unwrap for simplicity

use anyhow::Result;
use assert_fs::prelude::*;

use crate::CliTestEnvironment;

/// Creates a local branch at `main`, without checking it out
pub fn create_branch(env: &CliTestEnvironment, branch: &str) -> Result<()> {
    env.git(&["branch", branch])?;
    Ok(())
}

/// Creates `branch` on origin only, then fetches so `origin/<branch>` exists
pub fn create_remote_branch(env: &CliTestEnvironment, branch: &str) -> Result<()> {
    let refspec = format!("main:refs/heads/{}", branch);
    env.git(&["push", "-q", "origin", &refspec])?;
    env.git(&["fetch", "-q", "origin"])?;
    Ok(())
}

/// Publishes a commit on origin under `refs/<namespace>/<number>/head`, the
/// way GitHub (`pull`) and GitLab (`merge-requests`) expose review heads
pub fn push_review_ref(env: &CliTestEnvironment, namespace: &str, number: u32) -> Result<()> {
    let file = format!("review-{}.txt", number);
    env.repo_dir
        .child(&file)
        .write_str(&format!("change {}", number))?;
    env.git(&["checkout", "-q", "-b", "review-work"])?;
    env.git(&["add", &file])?;
    env.git(&["commit", "-q", "-m", "Review change"])?;

    let refspec = format!("HEAD:refs/{}/{}/head", namespace, number);
    env.git(&["push", "-q", "origin", &refspec])?;

    env.git(&["checkout", "-q", "main"])?;
    env.git(&["branch", "-q", "-D", "review-work"])?;
    Ok(())
}

/// Writes an executable stub named `tool` into `dir` that prints `stdout`
#[cfg(unix)]
pub fn install_fake_tool(dir: &std::path::Path, tool: &str, stdout: &str) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join(tool);
    std::fs::write(
        &script,
        format!("#!/bin/sh\ncat <<'EOF'\n{}\nEOF\n", stdout.trim_end()),
    )?;
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))?;
    Ok(())
}

/// Extracts the path from the last `TREE_ME_CD:` line of `stdout`
pub fn cd_target(stdout: &[u8]) -> Option<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter_map(|line| line.strip_prefix("TREE_ME_CD:"))
        .last()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cd_target_takes_last_marker() {
        let stdout = b"noise\nTREE_ME_CD:/a\nmore\nTREE_ME_CD:/b/c\n";
        assert_eq!(cd_target(stdout).as_deref(), Some("/b/c"));
        assert_eq!(cd_target(b"nothing here\n"), None);
    }

    #[test]
    fn test_push_review_ref() -> Result<()> {
        let env = CliTestEnvironment::with_origin()?;
        push_review_ref(&env, "pull", 7)?;

        let refs = crate::run_git(env.origin_dir().path(), &["show-ref"])?;
        assert!(refs.contains("refs/pull/7/head"));
        Ok(())
    }
}
