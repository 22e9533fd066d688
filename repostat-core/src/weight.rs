//! Per-file weight metrics for the visualization tree
//!
//! Global invariants enforced:
//! - The dead-file fallback (`size = |change|` when LOC is 0) lives here
//!   and nowhere else; every caller goes through `tree_weight`.
//! - A final size of 0 means the file has no measurable weight and must be
//!   omitted from output, never reported as an error.

use crate::model::VersionedFile;
use chrono::{DateTime, Duration, Utc};

/// Length of the sliding "recent change" window.
pub const RECENT_WINDOW_DAYS: i64 = 30;

/// Size and recent-change magnitude of one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeWeight {
    /// Current line count, or `|change|` for dead files.
    pub size: u64,
    /// Net line delta inside the recent-change window.
    pub change: i64,
}

impl TreeWeight {
    /// Files with zero size carry no weight and are excluded from output.
    pub fn is_zero(&self) -> bool {
        self.size == 0
    }

    /// Recent change relative to size, in percent. Only meaningful when
    /// `size > 0`; zero-size weights never reach a percentage call because
    /// their files are dropped first.
    pub fn percentage(&self) -> f64 {
        self.change as f64 / self.size as f64 * 100.0
    }
}

/// Cutoff date bounding the recent-change window: reference date minus
/// [`RECENT_WINDOW_DAYS`]. The reference is the repository's last known
/// activity date, or "now" when the history is empty.
pub fn deadline(reference: DateTime<Utc>) -> DateTime<Utc> {
    reference - Duration::days(RECENT_WINDOW_DAYS)
}

/// Compute the weight of one file against a cutoff date.
///
/// `change` sums the line deltas of all revisions strictly after the
/// deadline. `size` is the current line count; dead files fall back to
/// `|change|` so recent activity on a deleted file still registers.
pub fn tree_weight(file: &VersionedFile, deadline: DateTime<Utc>) -> TreeWeight {
    let change: i64 = file
        .revisions
        .iter()
        .filter(|r| r.date > deadline)
        .map(|r| r.lines_delta)
        .sum();
    let mut size = file.current_loc;
    if size == 0 {
        size = change.unsigned_abs();
    }
    TreeWeight { size, change }
}
