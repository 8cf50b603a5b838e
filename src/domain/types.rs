//! Shared domain types.
//!
//! Input records mirror the JSON written by the upstream matching process.
//! Identifier and amount fields are kept as raw JSON scalars: upstream emits
//! them as strings or numbers depending on the source system, and the reports
//! reproduce whatever was recorded.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Integer identifier of one upstream matching run.
pub type RunId = i64;

/// Timestamp layout used by `summary.json`'s `date` field.
pub const SUMMARY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A donation linked between Blackbaud and RaiseDonors (`donations.json`).
#[derive(Debug, Clone, Deserialize)]
pub struct DonationRecord {
    #[serde(rename = "bbDonorName")]
    pub bb_donor_name: Value,
    #[serde(rename = "bbDonorId")]
    pub bb_donor_id: Value,
    #[serde(rename = "rdDonorId")]
    pub rd_donor_id: Value,
    pub donation: Gift,
    #[serde(rename = "rdDonationStatus")]
    pub rd_donation_status: DonationStatus,
}

/// The gift as it was (or will be) booked on the Blackbaud side.
#[derive(Debug, Clone, Deserialize)]
pub struct Gift {
    pub amount: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DonationStatus {
    pub name: Value,
}

/// A RaiseDonors donor that could not be linked (`unmatched_accounts.json`).
#[derive(Debug, Clone, Deserialize)]
pub struct UnmatchedAccount {
    #[serde(rename = "firstName")]
    pub first_name: Value,
    #[serde(rename = "lastName")]
    pub last_name: Value,
    pub id: Value,
    /// Only inspected leniently: `null`, a non-array or an absent key all
    /// mean "no address".
    #[serde(default)]
    pub addresses: Value,
    pub donations: Vec<AccountDonation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountDonation {
    pub amount: Value,
}

/// Per-run metadata (`summary.json`).
#[derive(Debug, Clone, Deserialize)]
pub struct RunSummary {
    pub label: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, rename = "importedDonations")]
    pub imported_donations: Option<u64>,
    #[serde(default, rename = "unmatchedAccounts")]
    pub unmatched_accounts: Option<u64>,
    #[serde(default, rename = "duplicateCrmKeyDonors")]
    pub duplicate_crm_key_donors: Option<u64>,
    #[serde(default)]
    pub errors: Option<u64>,
}

impl RunSummary {
    /// Output file prefix for this run.
    pub fn file_label(&self) -> String {
        self.label.to_lowercase()
    }

    pub fn parsed_date(&self) -> Option<NaiveDateTime> {
        let raw = self.date.as_deref()?;
        NaiveDateTime::parse_from_str(raw.trim(), SUMMARY_DATE_FORMAT).ok()
    }
}

/// Lifecycle state recorded in `output/runs.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Started,
    Finished,
    Failed,
    #[serde(other)]
    Unknown,
}

/// One entry of the upstream run registry (`output/runs.json`).
#[derive(Debug, Clone, Deserialize)]
pub struct RunEntry {
    pub num: RunId,
    #[serde(default)]
    pub label: Option<String>,
    pub status: RunStatus,
}

/// What one processed run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: RunId,
    pub summary: RunSummary,
    pub donation_rows: usize,
    pub unmatched_rows: usize,
    pub summary_report: PathBuf,
    pub unmatched_report: PathBuf,
}

impl RunReport {
    /// Written files, in the order they are attached to the mail.
    pub fn files(&self) -> [&PathBuf; 2] {
        [&self.summary_report, &self.unmatched_report]
    }
}

/// One row of `<label>_summary_report.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonationRow {
    pub donor_name: String,
    pub blackbaud_id: String,
    pub raise_donors_id: String,
    pub donation_amount: String,
    pub status: String,
}

impl DonationRow {
    pub const HEADER: [&'static str; 5] = [
        "donorName",
        "blackbaudId",
        "raiseDonorsId",
        "donationAmount",
        "status",
    ];
}

/// One row of `<label>_unmatched_report.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnmatchedRow {
    pub donor_name: String,
    pub raise_donors_id: String,
    /// `None` when the donor has no usable first address.
    pub address: Option<String>,
    pub donation_amount: String,
}

impl UnmatchedRow {
    pub const HEADER: [&'static str; 4] = ["donorName", "raiseDonorsId", "address", "donationAmount"];
}

/// Render a JSON scalar the way it should appear in a report cell.
///
/// Strings are written verbatim, `null` becomes an empty cell and anything
/// else uses its JSON text.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
