//! Interactive prompt: one URL per line until blank input or EOF.

use eyre::{Context, Result};
use std::io::{BufRead, Write};

pub const PROMPT: &str = "Enter video link (or press Enter to exit): ";

/// Read URLs from `input` and pass each to `handle`.
///
/// Errors from `handle` are printed to `output` and the loop continues.
/// Only I/O errors on `input`/`output` end the loop with an error.
pub fn run_prompt<R, W, F>(mut input: R, mut output: W, mut handle: F) -> Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str) -> Result<()>,
{
    let mut line = String::new();

    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        let read = input.read_line(&mut line).wrap_err("failed to read input")?;

        let url = line.trim();
        if read == 0 || url.is_empty() {
            tracing::debug!("prompt closed");
            return Ok(());
        }

        if let Err(e) = handle(url) {
            tracing::error!(url, error = %e, "failed to process url");
            writeln!(output, "Error: {e:#}")?;
        }
    }
}
