use anyhow::Result;
use std::io::Write;

use crate::config::Config;

/// Prints `wt version <version>`
///
/// # Errors
/// Returns an error if writing to `out` fails
pub fn print_version(config: &Config, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "wt version {}", config.version)?;
    Ok(())
}
