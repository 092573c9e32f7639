//! Confirmation prompts respecting the global `--yes` flag.

use std::io::{self, BufRead, Write};

/// Abort with an error if the user declines confirmation.
///
/// Skips the prompt when `assume_yes` is set.
pub fn require_confirmation(message: &str, assume_yes: bool) -> anyhow::Result<()> {
    if assume_yes {
        return Ok(());
    }

    let mut stderr = io::stderr();
    write!(stderr, "{message} [y/N]: ")?;
    stderr.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    if matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
        Ok(())
    } else {
        anyhow::bail!("Aborted by user.")
    }
}
