//! Formatted terminal output.
//!
//! We keep formatting code in one place so output changes are localized and
//! the pipeline only deals with data.

use crate::domain::{RunEntry, RunReport, RunStatus, SUMMARY_DATE_FORMAT};

/// Format the block printed after a run's reports are written.
pub fn format_run_summary(report: &RunReport) -> String {
    let summary = &report.summary;
    let mut out = String::new();

    out.push_str(&format!("=== Run {} - {} ===\n", report.run_id, summary.label));
    if let Some(date) = summary.parsed_date() {
        out.push_str(&format!("Matched: {}\n", date.format(SUMMARY_DATE_FORMAT)));
    } else if let Some(raw) = summary.date.as_deref() {
        out.push_str(&format!("Matched: {raw}\n"));
    }
    out.push_str(&format!(
        "Donations: {} | Unmatched donors: {}\n",
        report.donation_rows, report.unmatched_rows
    ));
    if summary.duplicate_crm_key_donors.is_some() || summary.errors.is_some() {
        out.push_str(&format!(
            "Duplicate CRM keys: {} | Errors: {}\n",
            fmt_count(summary.duplicate_crm_key_donors),
            fmt_count(summary.errors)
        ));
    }
    for path in report.files() {
        out.push_str(&format!("- wrote {}\n", path.display()));
    }

    out
}

/// Compare the counts recorded in `summary.json` against the loaded arrays.
///
/// Returns one message per disagreement.
pub fn count_mismatches(report: &RunReport) -> Vec<String> {
    let mut out = Vec::new();
    let checks = [
        ("donations", report.summary.imported_donations, report.donation_rows),
        ("unmatched accounts", report.summary.unmatched_accounts, report.unmatched_rows),
    ];
    for (what, recorded, loaded) in checks {
        if let Some(recorded) = recorded {
            if recorded != loaded as u64 {
                out.push(format!(
                    "Run {}: summary records {recorded} {what} but {loaded} were loaded",
                    report.run_id
                ));
            }
        }
    }
    out
}

/// Format the known-runs table shown above the run id prompt.
pub fn format_known_runs(entries: &[RunEntry]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>5}  {:<24} {}\n", "run", "label", "status"));
    for entry in entries {
        out.push_str(
            format!(
                "{:>5}  {:<24} {}\n",
                entry.num,
                truncate(entry.label.as_deref().unwrap_or(""), 24),
                status_label(entry.status)
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

pub fn status_label(status: RunStatus) -> &'static str {
    match status {
        RunStatus::Started => "started",
        RunStatus::Finished => "finished",
        RunStatus::Failed => "failed",
        RunStatus::Unknown => "unknown",
    }
}

fn fmt_count(v: Option<u64>) -> String {
    v.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}
