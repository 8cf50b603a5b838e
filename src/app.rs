//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments (prompting for run ids when none are given)
//! - loads the configuration
//! - writes the reports for every requested run
//! - mails the reports when enabled

use clap::Parser;

use crate::cli::Cli;
use crate::config::{PASSWORD_ENV, ReportConfig};
use crate::error::AppError;
use crate::io::{load_registry, parse_run_ids};
use crate::mail::SmtpMailer;

pub mod pipeline;

/// Entry point for the `reportgen` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = ReportConfig::load(&cli.config)?;
    tracing::debug!(path = %config.path().display(), "loaded config");

    let registry = load_registry(&cli.output_dir);
    let raw_ids = match cli.run_ids {
        Some(ids) => ids,
        None => crate::cli::prompt::prompt_for_run_ids(&registry)?,
    };
    // The whole list is parsed before any run is touched.
    let run_ids = parse_run_ids(&raw_ids)?;

    let reports = pipeline::process_runs(&cli.output_dir, &run_ids, &registry, |report| {
        println!("{}", crate::report::format_run_summary(report));
    })?;

    if cli.no_mail {
        tracing::info!("--no-mail given; not sending mail");
        return Ok(());
    }

    let files = pipeline::report_files(&reports);
    let password_override = std::env::var(PASSWORD_ENV).ok();
    if pipeline::mail_reports(&config, password_override, files, SmtpMailer::from_settings)? {
        println!("Mailed {} report(s).", reports.len() * 2);
    }

    Ok(())
}
