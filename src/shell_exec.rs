//! External command execution.
//!
//! Every `git`, `gh` and `glab` invocation goes through [`run`] so that each
//! call is logged the same way (`wt -vv` shows them all with timings).

use anyhow::{Context, Result};
use std::process::{Command, Output};
use std::time::Instant;

use crate::error::Error;

/// Renders a command as `program arg1 arg2` for logs and error messages.
#[must_use]
pub fn display_command(cmd: &Command) -> String {
    let program = cmd.get_program().to_string_lossy();
    let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy()).collect();
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

/// Runs a command to completion, capturing stdout and stderr.
///
/// A non-zero exit status is *not* an error here; callers decide.
///
/// # Errors
/// Returns an error if the program could not be spawned at all
pub fn run(cmd: &mut Command) -> std::io::Result<Output> {
    let cmd_str = display_command(cmd);
    log::debug!("$ {}", cmd_str);

    let t0 = Instant::now();
    let result = cmd.output();
    let duration_ms = t0.elapsed().as_secs_f64() * 1000.0;

    match &result {
        Ok(output) => log::debug!(
            "[wt-trace] cmd=\"{}\" dur={:.1}ms ok={}",
            cmd_str,
            duration_ms,
            output.status.success()
        ),
        Err(e) => log::debug!(
            "[wt-trace] cmd=\"{}\" dur={:.1}ms err=\"{}\"",
            cmd_str,
            duration_ms,
            e
        ),
    }

    result
}

/// Runs a command and returns its stdout, failing on a non-zero exit.
///
/// # Errors
/// Returns an error if:
/// - The program could not be spawned
/// - The program exited unsuccessfully (wraps its stderr)
pub fn run_checked(cmd: &mut Command) -> Result<String> {
    let cmd_str = display_command(cmd);
    let output = run(cmd).with_context(|| format!("Failed to execute `{}`", cmd_str))?;

    if !output.status.success() {
        return Err(Error::CommandFailed {
            command: cmd_str,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into());
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
