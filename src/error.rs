use thiserror::Error;

/// Failure kinds surfaced to the user.
///
/// Commands return `anyhow::Result`, so these travel inside `anyhow::Error`
/// and can be recovered with `downcast_ref` where a caller needs to branch on
/// the kind (tests mostly).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid PR/MR number or URL: {0}")]
    InvalidReference(String),

    #[error("'{tool}' CLI not found. Install it from {hint}")]
    ToolNotFound {
        tool: &'static str,
        hint: &'static str,
    },

    #[error("`{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("{0}")]
    NothingToSelect(&'static str),

    #[error("selection cancelled")]
    SelectionCancelled,

    #[error("interactive selection requires a terminal; pass the branch or number as an argument")]
    NotInteractive,

    #[error("branch '{0}' does not exist\nUse 'wt create {0}' to create a new branch")]
    BranchNotFound(String),

    #[error("no worktree found for branch: {0}")]
    WorktreeNotFound(String),

    #[error("not in a git repository")]
    NotInRepository,
}
