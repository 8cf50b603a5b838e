//! `reportgen` library crate.
//!
//! Publishes the results of donor-matching runs: each run's JSON outputs are
//! turned into CSV reports, and the reports are optionally mailed out.
//!
//! The binary (`reportgen`) is a thin wrapper around this library so the
//! pipeline is testable without spawning processes.

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod mail;
pub mod report;
