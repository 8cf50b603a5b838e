//! Write the per-run CSV reports.
//!
//! Existing files are overwritten. Records end with CRLF and fields are only
//! quoted when they contain a delimiter, quote or line break.

use std::path::Path;

use serde::Serialize;

use crate::domain::{DonationRecord, DonationRow, UnmatchedAccount, UnmatchedRow};
use crate::error::AppError;
use crate::report::{donation_row, unmatched_row};

/// Write the matched-donations report. Returns the number of data rows.
pub fn write_donations_csv(path: &Path, records: &[DonationRecord]) -> Result<usize, AppError> {
    let rows: Vec<DonationRow> = records.iter().map(donation_row).collect();
    write_rows(path, &DonationRow::HEADER, &rows)?;
    Ok(rows.len())
}

/// Write the unmatched-donors report. Returns the number of data rows.
///
/// Rows are derived before the file is created, so a non-numeric donation
/// amount leaves any previous report untouched.
pub fn write_unmatched_csv(path: &Path, accounts: &[UnmatchedAccount]) -> Result<usize, AppError> {
    let rows = accounts
        .iter()
        .enumerate()
        .map(|(idx, account)| {
            unmatched_row(account).map_err(|e| {
                AppError::new(e.kind(), format!("Unmatched donor {idx} ({}): {e}", account.id))
            })
        })
        .collect::<Result<Vec<UnmatchedRow>, AppError>>()?;
    write_rows(path, &UnmatchedRow::HEADER, &rows)?;
    Ok(rows.len())
}

fn write_rows<R: Serialize>(path: &Path, header: &[&str], rows: &[R]) -> Result<(), AppError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_path(path)
        .map_err(|e| AppError::io(format!("Failed to create report CSV '{}': {e}", path.display())))?;

    writer
        .write_record(header)
        .map_err(|e| AppError::io(format!("Failed to write report CSV header: {e}")))?;

    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| AppError::io(format!("Failed to write report CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::io(format!("Failed to flush report CSV '{}': {e}", path.display())))?;

    Ok(())
}
