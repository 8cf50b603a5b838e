//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the run inputs as written upstream (`DonationRecord`, `UnmatchedAccount`, `RunSummary`)
//! - the run registry entries (`RunEntry`, `RunStatus`)
//! - the report rows (`DonationRow`, `UnmatchedRow`)

pub mod types;

pub use types::*;
