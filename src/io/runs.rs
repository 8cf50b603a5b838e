//! Run location and validation.
//!
//! Every run lives in `<output>/<id>/` and must contain the three files the
//! matching process writes. The reports are written next to them.

use std::path::{Path, PathBuf};

use crate::domain::{RunEntry, RunId};
use crate::error::AppError;
use crate::io::json::load_json;

pub const SUMMARY_FILE: &str = "summary.json";
pub const DONATIONS_FILE: &str = "donations.json";
pub const UNMATCHED_FILE: &str = "unmatched_accounts.json";
/// Run registry maintained by the matching process, directly under the output root.
pub const REGISTRY_FILE: &str = "runs.json";

/// Parse a comma-separated run id list such as `"1, 2,3"`.
///
/// Whitespace around entries is ignored. The first token that is not an
/// integer fails the whole list.
///
/// Ids are kept as integers, so run directories are named from the parsed
/// value: `05` and `+5` both resolve to `<output>/5/`, never `<output>/05/`.
pub fn parse_run_ids(raw: &str) -> Result<Vec<RunId>, AppError> {
    raw.split(',')
        .map(str::trim)
        .map(|token| {
            token.parse::<RunId>().map_err(|_| {
                AppError::input(format!(
                    "Invalid ID provided, must be an integer type (got '{token}')."
                ))
            })
        })
        .collect()
}

/// Resolved locations of one run's inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub run_id: RunId,
    pub dir: PathBuf,
    pub summary: PathBuf,
    pub donations: PathBuf,
    pub unmatched: PathBuf,
}

impl RunPaths {
    pub fn new(output_root: &Path, run_id: RunId) -> Self {
        let dir = output_root.join(run_id.to_string());
        Self {
            run_id,
            summary: dir.join(SUMMARY_FILE),
            donations: dir.join(DONATIONS_FILE),
            unmatched: dir.join(UNMATCHED_FILE),
            dir,
        }
    }

    /// Resolve and validate a run: directory, then summary, donations and
    /// unmatched files. The first missing item is reported.
    pub fn locate(output_root: &Path, run_id: RunId) -> Result<Self, AppError> {
        let paths = Self::new(output_root, run_id);

        if !paths.dir.is_dir() {
            return Err(AppError::input(format!(
                "Run with specified ID does not exist at {}",
                paths.dir.display()
            )));
        }
        if !paths.summary.is_file() {
            return Err(AppError::input(format!(
                "Run {run_id} does not have summary at {}",
                paths.summary.display()
            )));
        }
        if !paths.donations.is_file() {
            return Err(AppError::input(format!(
                "Run {run_id} does not have donations at {}",
                paths.donations.display()
            )));
        }
        if !paths.unmatched.is_file() {
            return Err(AppError::input(format!(
                "Run {run_id} does not have unmatched donors at {}",
                paths.unmatched.display()
            )));
        }

        Ok(paths)
    }

    pub fn summary_report(&self, label: &str) -> PathBuf {
        self.dir.join(format!("{label}_summary_report.csv"))
    }

    pub fn unmatched_report(&self, label: &str) -> PathBuf {
        self.dir.join(format!("{label}_unmatched_report.csv"))
    }
}

/// Read `<output>/runs.json`.
///
/// The registry is informational only: a missing or unreadable file yields
/// an empty list.
pub fn load_registry(output_root: &Path) -> Vec<RunEntry> {
    let path = output_root.join(REGISTRY_FILE);
    if !path.is_file() {
        return Vec::new();
    }
    match load_json::<Vec<RunEntry>>(&path) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "ignoring unreadable run registry");
            Vec::new()
        }
    }
}
