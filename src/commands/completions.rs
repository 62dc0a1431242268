use anyhow::Result;
use clap::Command;
use clap_complete::{Shell, generate};
use std::io::Write;

/// Generate native shell completions using clap
///
/// # Errors
/// Returns an error if flushing `out` fails
pub fn generate_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) -> Result<()> {
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, out);
    out.flush()?;
    Ok(())
}
