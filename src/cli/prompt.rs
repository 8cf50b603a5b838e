//! Interactive run id prompt.
//!
//! Used when no run ids are given on the command line. Known runs from the
//! registry are listed first, then a single comma-separated line is read.

use std::io::{self, BufRead, Write};

use crate::domain::RunEntry;
use crate::error::AppError;
use crate::report::format_known_runs;

pub const PROMPT: &str = "Enter run ID's : ";

/// Prompt on stdout and read one line from stdin.
pub fn prompt_for_run_ids(known: &[RunEntry]) -> Result<String, AppError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    read_run_ids(known, &mut stdin.lock(), &mut stdout.lock())
}

/// Prompt/reply loop over arbitrary streams.
pub fn read_run_ids(
    known: &[RunEntry],
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<String, AppError> {
    let write_err = |e: io::Error| AppError::io(format!("Failed to write prompt: {e}"));

    if !known.is_empty() {
        writeln!(output, "Known runs:").map_err(write_err)?;
        write!(output, "{}", format_known_runs(known)).map_err(write_err)?;
    }
    write!(output, "{PROMPT}").map_err(write_err)?;
    output.flush().map_err(write_err)?;

    let mut line = String::new();
    let bytes = input
        .read_line(&mut line)
        .map_err(|e| AppError::io(format!("Failed to read input: {e}")))?;

    if bytes == 0 {
        return Err(AppError::input(
            "No input received. Pass run IDs as an argument, e.g. `reportgen 1,2,3`.",
        ));
    }

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
