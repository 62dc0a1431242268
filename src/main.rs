use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueHint};
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use tree_me::Result;
use tree_me::commands::shellenv::ShellKind;
use tree_me::commands::{
    checkout, completions, create, list, prune, remove, review, shellenv, version,
};
use tree_me::config::Config;
use tree_me::forge::Forge;
use tree_me::git::GitCli;

#[derive(Parser)]
#[command(name = "wt")]
#[command(about = "Git worktrees in predictable places, with auto-cd and PR/MR checkout")]
#[command(version)]
pub struct Cli {
    /// Directory that holds <repo>/<branch> worktrees (empty means unset)
    #[arg(long, global = true, env = "WORKTREE_ROOT", value_hint = ValueHint::DirPath)]
    root: Option<OsString>,

    /// More log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Checkout an existing branch in a new worktree
    #[command(visible_alias = "co")]
    Checkout {
        /// Branch to check out. If not provided, opens interactive selection
        #[arg(value_hint = ValueHint::Other)]
        branch: Option<String>,
        /// List available branches for completion (internal use)
        #[arg(long, hide = true)]
        list_completions: bool,
    },
    /// Create a new branch in a new worktree
    Create {
        /// Name of the new branch
        #[arg(value_hint = ValueHint::Other)]
        branch: String,
        /// Branch to start from (defaults to the remote's default branch)
        #[arg(value_hint = ValueHint::Other)]
        base: Option<String>,
    },
    /// Checkout a GitHub pull request in a worktree
    Pr {
        /// PR number or URL. If not provided, opens interactive selection
        reference: Option<String>,
    },
    /// Checkout a GitLab merge request in a worktree
    Mr {
        /// MR number or URL. If not provided, opens interactive selection
        reference: Option<String>,
    },
    /// List all worktrees
    #[command(visible_alias = "ls")]
    List,
    /// Remove a worktree
    #[command(visible_alias = "rm")]
    Remove {
        /// Branch whose worktree to remove. If not provided, opens interactive selection
        #[arg(value_hint = ValueHint::Other)]
        branch: Option<String>,
        /// List removable worktrees for completion (internal use)
        #[arg(long, hide = true)]
        list_completions: bool,
    },
    /// Remove stale worktree administrative files
    Prune,
    /// Print the shell function for auto-cd (source this)
    #[command(long_about = "Print shell integration for automatic directory navigation.\n\n\
        Add this to the END of your ~/.bashrc or ~/.zshrc:\n  source <(wt shellenv)\n\n\
        For zsh, place it AFTER compinit to enable tab completion.")]
    Shellenv {
        /// Shell family to generate for (default: powershell on Windows, posix elsewhere)
        #[arg(long, value_enum)]
        shell: Option<ShellKind>,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Show version information
    Version,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.root.map(PathBuf::from))?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Checkout {
            branch,
            list_completions,
        } => {
            if list_completions {
                checkout::list_completions(&GitCli::new(), &mut out)?;
            } else {
                checkout::checkout(&config, branch.as_deref(), &mut out)?;
            }
        }
        Commands::Create { branch, base } => {
            create::create_worktree(&config, &branch, base.as_deref(), &mut out)?;
        }
        Commands::Pr { reference } => {
            review::checkout_review(&config, Forge::GitHub, reference.as_deref(), &mut out)?;
        }
        Commands::Mr { reference } => {
            review::checkout_review(&config, Forge::GitLab, reference.as_deref(), &mut out)?;
        }
        Commands::List => {
            list::list_worktrees(&mut out)?;
        }
        Commands::Remove {
            branch,
            list_completions,
        } => {
            if list_completions {
                remove::list_completions(&GitCli::new(), &mut out)?;
            } else {
                remove::remove_worktree(branch.as_deref(), &mut out)?;
            }
        }
        Commands::Prune => {
            prune::prune_worktrees(&mut out)?;
        }
        Commands::Shellenv { shell } => {
            let shell = shell.unwrap_or_else(ShellKind::platform_default);
            shellenv::print_shellenv(shell, &mut out)?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            completions::generate_completions(shell, &mut cmd, &mut out)?;
        }
        Commands::Version => {
            version::print_version(&config, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}
