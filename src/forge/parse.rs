//! Parsers for the open-request listings printed by `gh` and `glab`.
//!
//! Both are lenient: blank lines and lines that do not fit the expected shape
//! are skipped rather than reported, and the order of the listing is kept.

use regex::Regex;
use std::sync::LazyLock;

use super::ReviewRequest;

#[allow(clippy::expect_used)]
static GLAB_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^!(\d+)\s+\S+\s+(.+?)\s+\(").expect("glab listing regex is valid")
});

/// Parses `number<TAB>title` lines as produced by
/// `gh pr list --json number,title --jq '.[] | "\(.number)\t\(.title)"'`.
///
/// Only the first tab separates; any later tabs belong to the title.
#[must_use]
pub fn parse_gh_listing(raw: &str) -> Vec<ReviewRequest> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| line.split_once('\t'))
        .map(|(number, title)| ReviewRequest::new('#', number, title))
        .collect()
}

/// Parses `glab mr list` lines of the form
/// `!123  OPEN  Title words  (source-branch) ← (target-branch)`.
///
/// The status column is ignored, and runs of whitespace inside the title are
/// collapsed to single spaces.
#[must_use]
pub fn parse_glab_listing(raw: &str) -> Vec<ReviewRequest> {
    raw.lines()
        .filter_map(|line| GLAB_LINE.captures(line))
        .map(|caps| {
            let title = caps[2].split_whitespace().collect::<Vec<_>>().join(" ");
            ReviewRequest::new('!', &caps[1], &title)
        })
        .collect()
}
