#![deny(warnings)]

//! Core library for repostat, a VCS statistics report generator.
//!
//! Takes an in-memory repository model (directory tree, file revision
//! histories) and renders a static HTML report: an index page, an
//! interactive repository treemap, per-directory pages, and monthly
//! commit-log pages with calendar navigation.
//!
//! Global invariants enforced:
//! - Generation is single-threaded and single-pass; page order and file
//!   contents are deterministic for a given model and configuration.
//! - Pages form an ownership tree and are written children-first; each
//!   page is written at most once.
//! - A failure to write one page or asset is logged and skipped; it never
//!   aborts the rest of the report.

pub mod assets;
pub mod config;
pub mod dirtree;
pub mod html;
pub mod model;
pub mod nav;
pub mod page;
pub mod suite;
pub mod treemap;
pub mod weight;

pub use config::{load_config_file, ReportConfig, ReportConfigFile};
pub use model::{Directory, Repository, Revision, VersionedFile};
pub use page::Page;
pub use suite::ReportSuite;

use anyhow::Result;
use std::path::PathBuf;

/// Generate the full report for `repository` into the configured output
/// directory. Returns the path of the generated index page.
pub fn generate_report(repository: &Repository, config: &ReportConfig) -> Result<PathBuf> {
    ReportSuite::new(config, repository).generate()
}
