//! The publish pipeline: run validation -> JSON load -> CSV reports -> mail.
//!
//! Kept free of terminal interaction so it can be driven from tests; `app`
//! handles prompting and printing.

use std::path::{Path, PathBuf};

use crate::config::{ReportConfig, SmtpSettings};
use crate::domain::{DonationRecord, RunEntry, RunId, RunReport, RunStatus, RunSummary, UnmatchedAccount};
use crate::error::AppError;
use crate::io::{RunPaths, load_json, load_records, write_donations_csv, write_unmatched_csv};
use crate::mail::{Mailer, ReportMail};
use crate::report::{count_mismatches, status_label};

/// Validate one run, load its inputs and write both reports.
pub fn process_run(output_root: &Path, run_id: RunId, registry: &[RunEntry]) -> Result<RunReport, AppError> {
    let paths = RunPaths::locate(output_root, run_id)?;
    tracing::debug!(run_id, dir = %paths.dir.display(), "run inputs present");

    if let Some(entry) = registry.iter().find(|e| e.num == run_id) {
        if entry.status != RunStatus::Finished {
            tracing::warn!(
                run_id,
                status = status_label(entry.status),
                "run is not marked finished; reports may be incomplete"
            );
        }
    }

    let summary: RunSummary = load_json(&paths.summary)?;
    let donations: Vec<DonationRecord> = load_records(&paths.donations)?;
    let unmatched: Vec<UnmatchedAccount> = load_records(&paths.unmatched)?;

    let label = summary.file_label();
    let summary_report = paths.summary_report(&label);
    let unmatched_report = paths.unmatched_report(&label);

    let donation_rows = write_donations_csv(&summary_report, &donations)?;
    tracing::info!(run_id, path = %summary_report.display(), rows = donation_rows, "wrote donations report");

    let unmatched_rows = write_unmatched_csv(&unmatched_report, &unmatched)?;
    tracing::info!(run_id, path = %unmatched_report.display(), rows = unmatched_rows, "wrote unmatched report");

    let report = RunReport {
        run_id,
        summary,
        donation_rows,
        unmatched_rows,
        summary_report,
        unmatched_report,
    };
    for msg in count_mismatches(&report) {
        tracing::warn!("{msg}");
    }
    Ok(report)
}

/// Process runs in order, stopping at the first failure.
///
/// `on_run` sees each completed run before the next one starts. Reports of
/// runs completed before a failure stay on disk.
pub fn process_runs(
    output_root: &Path,
    run_ids: &[RunId],
    registry: &[RunEntry],
    mut on_run: impl FnMut(&RunReport),
) -> Result<Vec<RunReport>, AppError> {
    let mut reports = Vec::with_capacity(run_ids.len());
    for &run_id in run_ids {
        let report = process_run(output_root, run_id, registry)?;
        on_run(&report);
        reports.push(report);
    }
    Ok(reports)
}

/// All written report files, in attachment order.
pub fn report_files(reports: &[RunReport]) -> Vec<PathBuf> {
    reports
        .iter()
        .flat_map(|r| r.files().map(PathBuf::clone))
        .collect()
}

/// Send the reports if `smtp.enabled` is set. Returns whether mail was sent.
///
/// SMTP settings are only resolved, and `connect` only called, when mail is
/// enabled.
pub fn mail_reports<M, F>(
    config: &ReportConfig,
    password_override: Option<String>,
    files: Vec<PathBuf>,
    connect: F,
) -> Result<bool, AppError>
where
    M: Mailer,
    F: FnOnce(&SmtpSettings) -> Result<M, AppError>,
{
    if !config.smtp_enabled()? {
        tracing::info!("smtp.enabled is false; not sending mail");
        return Ok(false);
    }

    let settings = config.smtp_settings(password_override)?;
    let mail = ReportMail::new(&settings, files);
    let mailer = connect(&settings)?;
    mailer.send(&mail)?;
    Ok(true)
}
