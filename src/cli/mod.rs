//! Command-line parsing for the report generator.
//!
//! Keeps **argument parsing** separate from the pipeline; the interactive
//! run id prompt lives in [`prompt`].

use std::path::PathBuf;

use clap::Parser;

use crate::config::DEFAULT_CONFIG_PATH;

pub mod prompt;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "reportgen",
    version,
    about = "Publish donor-matching run results as CSV reports and mail them out"
)]
pub struct Cli {
    /// Comma-separated run IDs (e.g. "1,2,3"). Prompted for when omitted.
    #[arg(value_name = "RUN_IDS")]
    pub run_ids: Option<String>,

    /// Configuration file (SMTP settings).
    #[arg(long, env = "REPORTGEN_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Directory holding one sub-directory per run.
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Write the reports but do not send mail, even if `smtp.enabled` is set.
    #[arg(long)]
    pub no_mail: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_layout() {
        let cli = Cli::try_parse_from(["reportgen"]).unwrap();
        assert_eq!(cli.run_ids, None);
        assert_eq!(cli.output_dir, PathBuf::from("output"));
        assert!(!cli.no_mail);
    }

    #[test]
    fn run_ids_are_positional() {
        let cli = Cli::try_parse_from(["reportgen", "1, 2,3", "--no-mail"]).unwrap();
        assert_eq!(cli.run_ids.as_deref(), Some("1, 2,3"));
        assert!(cli.no_mail);
    }
}
