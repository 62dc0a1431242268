use anyhow::Result;
use clap::ValueEnum;
use shell_escape::unix::escape;
use std::borrow::Cow;
use std::io::Write;
use std::path::Path;

/// Shell family the integration snippet is written for.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShellKind {
    /// bash and zsh
    Posix,
    Powershell,
}

impl ShellKind {
    /// PowerShell on Windows, POSIX shells everywhere else.
    #[must_use]
    pub fn platform_default() -> Self {
        if cfg!(windows) {
            ShellKind::Powershell
        } else {
            ShellKind::Posix
        }
    }
}

const BIN_PLACEHOLDER: &str = "__TREE_ME_BIN__";

const POSIX_TEMPLATE: &str = r#"# tree-me shell integration for bash and zsh
# Add to the END of ~/.bashrc or ~/.zshrc (after compinit for zsh):
#   source <(wt shellenv)

_wt_bin=__TREE_ME_BIN__

wt() {
    local log_file exit_code cd_path
    log_file=$(mktemp "${TMPDIR:-/tmp}/tree-me.XXXXXX") || return 1

    if [ -t 0 ] && [ -t 1 ] && command -v script >/dev/null 2>&1; then
        # Keep a terminal for interactive menus while recording the output
        if script -q -c true /dev/null >/dev/null 2>&1; then
            script -q -e -c "$(printf '%q ' "$_wt_bin" "$@")" "$log_file"
        else
            script -q "$log_file" "$_wt_bin" "$@"
        fi
        exit_code=$?
    else
        command "$_wt_bin" "$@" >"$log_file"
        exit_code=$?
        cat "$log_file"
    fi

    if [ "$exit_code" -eq 0 ]; then
        cd_path=$(grep '^TREE_ME_CD:' "$log_file" | tail -n 1 | tr -d '\r' | cut -d: -f2-)
        [ -n "$cd_path" ] && cd "$cd_path"
    fi
    rm -f "$log_file"
    return "$exit_code"
}

# Bash completion
if [ -n "$BASH_VERSION" ]; then
    _wt_complete() {
        local cur prev commands branches
        COMPREPLY=()
        cur="${COMP_WORDS[COMP_CWORD]}"
        prev="${COMP_WORDS[COMP_CWORD-1]}"
        commands="checkout co create pr mr list ls remove rm prune shellenv completions version help"

        if [ "$COMP_CWORD" -eq 1 ]; then
            COMPREPLY=( $(compgen -W "$commands" -- "$cur") )
            return 0
        fi

        if [ "$COMP_CWORD" -eq 2 ]; then
            case "$prev" in
                checkout|co) branches=$(command "$_wt_bin" checkout --list-completions 2>/dev/null) ;;
                remove|rm) branches=$(command "$_wt_bin" remove --list-completions 2>/dev/null) ;;
                *) return 0 ;;
            esac
            COMPREPLY=( $(compgen -W "$branches" -- "$cur") )
        fi
        return 0
    }
    complete -F _wt_complete wt
fi

# Zsh completion
if [ -n "$ZSH_VERSION" ]; then
    _wt_complete_zsh() {
        local -a commands branches
        commands=(
            'checkout:Checkout an existing branch in a new worktree'
            'co:Checkout an existing branch in a new worktree'
            'create:Create a new branch in a new worktree'
            'pr:Checkout a GitHub pull request in a worktree'
            'mr:Checkout a GitLab merge request in a worktree'
            'list:List all worktrees'
            'ls:List all worktrees'
            'remove:Remove a worktree'
            'rm:Remove a worktree'
            'prune:Remove stale worktree administrative files'
            'shellenv:Print shell integration'
            'completions:Print shell completions'
            'version:Show version information'
            'help:Show help'
        )

        if (( CURRENT == 2 )); then
            _describe 'command' commands
        elif (( CURRENT == 3 )); then
            case "$words[2]" in
                checkout|co)
                    branches=(${(f)"$(command "$_wt_bin" checkout --list-completions 2>/dev/null)"})
                    ;;
                remove|rm)
                    branches=(${(f)"$(command "$_wt_bin" remove --list-completions 2>/dev/null)"})
                    ;;
            esac
            (( ${#branches} )) && _describe 'branch' branches
        fi
    }
    if (( $+functions[compdef] )); then
        compdef _wt_complete_zsh wt
    fi
fi
"#;

const POWERSHELL_TEMPLATE: &str = r#"# tree-me shell integration for PowerShell
# Add to your $PROFILE:
#   Invoke-Expression (& wt shellenv --shell powershell | Out-String)

$global:TreeMeBin = __TREE_ME_BIN__

function wt {
    $logFile = New-TemporaryFile
    $exitCode = 0
    try {
        & $global:TreeMeBin @args | Tee-Object -FilePath $logFile.FullName
        $exitCode = $LASTEXITCODE
        if ($exitCode -eq 0) {
            $cdLine = Get-Content $logFile.FullName |
                Where-Object { $_ -like 'TREE_ME_CD:*' } |
                Select-Object -Last 1
            if ($cdLine) {
                Set-Location -LiteralPath $cdLine.Substring('TREE_ME_CD:'.Length)
            }
        }
    } finally {
        Remove-Item -LiteralPath $logFile.FullName -ErrorAction SilentlyContinue
    }
    $global:LASTEXITCODE = $exitCode
}

Register-ArgumentCompleter -Native -CommandName wt -ScriptBlock {
    param($wordToComplete, $commandAst, $cursorPosition)

    $words = @($commandAst.CommandElements | ForEach-Object { $_.ToString() })
    $commands = @('checkout', 'co', 'create', 'pr', 'mr', 'list', 'ls', 'remove', 'rm',
        'prune', 'shellenv', 'completions', 'version', 'help')

    if ($words.Count -eq 1 -or ($words.Count -eq 2 -and $wordToComplete)) {
        $candidates = $commands
    } elseif ($words[1] -in @('checkout', 'co')) {
        $candidates = & $global:TreeMeBin checkout --list-completions 2>$null
    } elseif ($words[1] -in @('remove', 'rm')) {
        $candidates = & $global:TreeMeBin remove --list-completions 2>$null
    } else {
        $candidates = @()
    }

    $candidates | Where-Object { $_ -like "$wordToComplete*" } | ForEach-Object {
        [System.Management.Automation.CompletionResult]::new($_, $_, 'ParameterValue', $_)
    }
}
"#;

/// Prints the shell function that runs the binary and follows its
/// `TREE_ME_CD:` marker, plus tab completion
///
/// # Errors
/// Returns an error if writing to `out` fails
pub fn print_shellenv(shell: ShellKind, out: &mut dyn Write) -> Result<()> {
    let exe = std::env::current_exe();
    if let Err(e) = &exe {
        log::warn!("cannot locate the wt binary, falling back to PATH lookup: {}", e);
    }
    write!(out, "{}", render(shell, exe.ok().as_deref()))?;
    Ok(())
}

/// Renders the snippet for `shell`, calling `binary` (or `wt` on `PATH`).
#[must_use]
pub fn render(shell: ShellKind, binary: Option<&Path>) -> String {
    let binary = binary.map_or_else(|| "wt".to_string(), |p| p.to_string_lossy().into_owned());
    match shell {
        ShellKind::Posix => {
            POSIX_TEMPLATE.replace(BIN_PLACEHOLDER, &escape(Cow::from(binary.as_str())))
        }
        ShellKind::Powershell => {
            POWERSHELL_TEMPLATE.replace(BIN_PLACEHOLDER, &powershell_quote(&binary))
        }
    }
}

fn powershell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
