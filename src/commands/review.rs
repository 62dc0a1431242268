use anyhow::Result;
use std::io::Write;

use crate::commands::{print_cd_marker, reuse_existing};
use crate::config::Config;
use crate::forge::{Forge, ForgeCli, RemoteType, parse_reference};
use crate::git::GitCli;
use crate::selection::{Choice, RealSelectionProvider, SelectionProvider, choose};
use crate::storage::WorktreeStorage;
use crate::traits::{ForgeOperations, GitOperations};

/// Checks out a GitHub pull request or GitLab merge request into
/// `<root>/<repo>/pr-<n>` (or `mr-<n>`)
///
/// `reference` may be a number or a PR/MR URL. Without it the open requests
/// are listed through `gh` / `glab` and offered in a menu.
///
/// # Errors
/// Returns an error if:
/// - `reference` is neither a number nor a recognised URL
/// - The forge CLI is not installed
/// - Listing fails, is empty, or the selection is cancelled
/// - `git worktree add` fails
pub fn checkout_review(
    config: &Config,
    forge: Forge,
    reference: Option<&str>,
    out: &mut dyn Write,
) -> Result<()> {
    checkout_review_with(
        &GitCli::new(),
        &ForgeCli,
        &RealSelectionProvider,
        config,
        forge,
        reference,
        out,
    )
}

/// Checks out a review request with injectable collaborators (for testing)
///
/// # Errors
/// See [`checkout_review`]
pub fn checkout_review_with(
    git: &dyn GitOperations,
    cli: &dyn ForgeOperations,
    provider: &dyn SelectionProvider,
    config: &Config,
    forge: Forge,
    reference: Option<&str>,
    out: &mut dyn Write,
) -> Result<()> {
    let number = match reference {
        Some(reference) => {
            let number = parse_reference(reference)?;
            ensure_installed(cli, forge)?;
            number
        }
        None => {
            ensure_installed(cli, forge)?;
            select_request(cli, provider, forge)?
        }
    };

    warn_on_foreign_origin(git, forge);

    let repo_name = git.repo_name()?;
    let branch = forge.local_branch(&number);
    let path = WorktreeStorage::new(&config.root).get_worktree_path(&repo_name, &branch);

    if reuse_existing(git, &branch, out)? {
        return Ok(());
    }

    let refspec = format!("{}:{}", forge.head_ref(&number), branch);
    if let Err(e) = git.fetch("origin", &refspec) {
        // The local branch may already exist from an earlier fetch
        log::warn!("fetching {} {} failed: {}", forge.noun(), number, e);
    }

    git.add_worktree(&path, &branch)?;

    writeln!(
        out,
        "✓ {} #{} checked out at: {}",
        forge.noun(),
        number,
        path.display()
    )?;
    print_cd_marker(out, &path)?;
    Ok(())
}

fn ensure_installed(cli: &dyn ForgeOperations, forge: Forge) -> Result<()> {
    if cli.is_installed(forge) {
        Ok(())
    } else {
        Err(forge.not_installed().into())
    }
}

fn select_request(
    cli: &dyn ForgeOperations,
    provider: &dyn SelectionProvider,
    forge: Forge,
) -> Result<String> {
    let raw = cli.list_open(forge)?;
    let choices = forge
        .parse_listing(&raw)
        .into_iter()
        .map(|request| Choice::new(request.label, request.number))
        .collect();
    choose(provider, forge.select_prompt(), forge.nothing_open(), choices)
}

fn warn_on_foreign_origin(git: &dyn GitOperations, forge: Forge) {
    let Some(url) = git.remote_url("origin") else {
        return;
    };
    if let Some(detected) = RemoteType::detect(&url).forge().filter(|d| *d != forge) {
        log::warn!(
            "origin ({}) looks like a {} remote; the {} ref may not exist there",
            url,
            detected,
            forge.noun()
        );
    }
}
