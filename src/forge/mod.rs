//! Hosting providers and their review tooling.
//!
//! - [`RemoteType`] classifies a remote URL
//! - [`Forge`] describes a provider whose CLI we drive (`gh` / `glab`)
//! - [`parse_reference`] turns user input into a PR/MR number
//! - [`ForgeCli`] runs the provider CLIs

use anyhow::Result;
use regex::Regex;
use std::fmt;
use std::process::Command;
use std::sync::LazyLock;

use crate::error::Error;
use crate::shell_exec;
use crate::traits::ForgeOperations;

pub mod parse;

#[allow(clippy::expect_used)]
static GITHUB_PR_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://github\.com/.*/pull/([0-9]+)").expect("GitHub PR regex is valid")
});

#[allow(clippy::expect_used)]
static GITLAB_MR_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://gitlab\.com/.*/-/merge_requests/([0-9]+)")
        .expect("GitLab MR regex is valid")
});

#[allow(clippy::expect_used)]
static PLAIN_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("number regex is valid"));

/// Hosting provider of a remote, as far as its URL tells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteType {
    GitHub,
    GitLab,
    Unknown,
}

impl RemoteType {
    /// Classifies a remote URL by host substring; GitHub is checked first.
    #[must_use]
    pub fn detect(url: &str) -> Self {
        if url.contains("github.com") {
            RemoteType::GitHub
        } else if url.contains("gitlab.com") {
            RemoteType::GitLab
        } else {
            RemoteType::Unknown
        }
    }

    /// The forge whose review CLI serves this remote, if any.
    #[must_use]
    pub fn forge(self) -> Option<Forge> {
        match self {
            RemoteType::GitHub => Some(Forge::GitHub),
            RemoteType::GitLab => Some(Forge::GitLab),
            RemoteType::Unknown => None,
        }
    }
}

/// A provider whose pull/merge requests can be checked out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forge {
    GitHub,
    GitLab,
}

impl Forge {
    /// Name of the review CLI binary.
    #[must_use]
    pub fn tool(self) -> &'static str {
        match self {
            Forge::GitHub => "gh",
            Forge::GitLab => "glab",
        }
    }

    #[must_use]
    pub fn install_hint(self) -> &'static str {
        match self {
            Forge::GitHub => "https://cli.github.com",
            Forge::GitLab => "https://gitlab.com/gitlab-org/cli",
        }
    }

    /// Arguments that make the CLI list open requests.
    #[must_use]
    pub fn list_args(self) -> &'static [&'static str] {
        match self {
            Forge::GitHub => &[
                "pr",
                "list",
                "--json",
                "number,title",
                "--jq",
                r#".[] | "\(.number)\t\(.title)""#,
            ],
            Forge::GitLab => &["mr", "list"],
        }
    }

    /// Parses the output of [`Forge::list_args`].
    #[must_use]
    pub fn parse_listing(self, raw: &str) -> Vec<ReviewRequest> {
        match self {
            Forge::GitHub => parse::parse_gh_listing(raw),
            Forge::GitLab => parse::parse_glab_listing(raw),
        }
    }

    /// Remote ref holding the head of request `number`.
    #[must_use]
    pub fn head_ref(self, number: &str) -> String {
        match self {
            Forge::GitHub => format!("pull/{}/head", number),
            Forge::GitLab => format!("merge-requests/{}/head", number),
        }
    }

    /// Local branch (and worktree directory) name for request `number`.
    #[must_use]
    pub fn local_branch(self, number: &str) -> String {
        let prefix = match self {
            Forge::GitHub => "pr",
            Forge::GitLab => "mr",
        };
        format!("{}-{}", prefix, number)
    }

    /// Short noun used in messages: `PR` or `MR`.
    #[must_use]
    pub fn noun(self) -> &'static str {
        match self {
            Forge::GitHub => "PR",
            Forge::GitLab => "MR",
        }
    }

    /// Message shown when the listing is empty.
    #[must_use]
    pub fn nothing_open(self) -> &'static str {
        match self {
            Forge::GitHub => "no open PRs found",
            Forge::GitLab => "no open MRs found",
        }
    }

    #[must_use]
    pub fn select_prompt(self) -> &'static str {
        match self {
            Forge::GitHub => "Select Pull Request",
            Forge::GitLab => "Select Merge Request",
        }
    }

    /// Error for a missing CLI, with install hint.
    #[must_use]
    pub fn not_installed(self) -> Error {
        Error::ToolNotFound {
            tool: self.tool(),
            hint: self.install_hint(),
        }
    }
}

impl fmt::Display for Forge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Forge::GitHub => write!(f, "GitHub"),
            Forge::GitLab => write!(f, "GitLab"),
        }
    }
}

/// One open pull/merge request as listed by a forge CLI.
///
/// Number and label travel together so a menu pick can never be matched to
/// the wrong request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    pub number: String,
    pub title: String,
    /// `#123: Title` (GitHub) or `!123: Title` (GitLab)
    pub label: String,
}

impl ReviewRequest {
    #[must_use]
    pub fn new(marker: char, number: &str, title: &str) -> Self {
        Self {
            number: number.to_string(),
            title: title.to_string(),
            label: format!("{}{}: {}", marker, number, title),
        }
    }
}

/// Extracts a PR/MR number from a bare number, a GitHub pull URL or a GitLab
/// merge request URL.
///
/// # Errors
/// Returns [`Error::InvalidReference`] for anything else, including PR-like
/// URLs on other hosts
pub fn parse_reference(input: &str) -> Result<String, Error> {
    for pattern in [&*GITHUB_PR_URL, &*GITLAB_MR_URL] {
        if let Some(caps) = pattern.captures(input) {
            return Ok(caps[1].to_string());
        }
    }

    if PLAIN_NUMBER.is_match(input) {
        return Ok(input.to_string());
    }

    Err(Error::InvalidReference(input.to_string()))
}

/// [`ForgeOperations`] backed by the real `gh` / `glab` binaries.
#[derive(Debug, Default, Clone, Copy)]
pub struct ForgeCli;

impl ForgeOperations for ForgeCli {
    fn is_installed(&self, forge: Forge) -> bool {
        match which::which(forge.tool()) {
            Ok(path) => {
                log::debug!("found {} at {}", forge.tool(), path.display());
                true
            }
            Err(_) => false,
        }
    }

    fn list_open(&self, forge: Forge) -> Result<String> {
        let mut cmd = Command::new(forge.tool());
        cmd.args(forge.list_args());
        shell_exec::run_checked(&mut cmd)
    }
}
