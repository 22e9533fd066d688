//! In-memory repository model
//!
//! The model is produced by an external history parser and consumed
//! read-only by every report generator in this crate. `Repository::new`
//! runs a finalize pass (sorting, path/depth computation) so that all
//! later traversals are deterministic.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A single revision of a versioned file.
#[derive(Debug, Clone, Deserialize)]
pub struct Revision {
    /// Commit date.
    pub date: DateTime<Utc>,
    /// Lines added minus lines removed by this revision.
    pub lines_delta: i64,
}

/// A file with its revision history.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionedFile {
    pub name: String,
    /// Current line count; 0 when the file is deleted or was never measured.
    #[serde(default)]
    pub current_loc: u64,
    /// Revisions, sorted by date after the finalize pass.
    #[serde(default)]
    pub revisions: Vec<Revision>,
}

impl VersionedFile {
    /// A file with no current lines is dead (deleted or never measured).
    pub fn is_dead(&self) -> bool {
        self.current_loc == 0
    }
}

/// A directory node. Subdirectories and files are owned by their parent,
/// so the directory graph is a tree by construction.
#[derive(Debug, Clone, Deserialize)]
pub struct Directory {
    pub name: String,
    #[serde(default)]
    pub subdirectories: Vec<Directory>,
    #[serde(default)]
    pub files: Vec<VersionedFile>,
    /// Full path with trailing separator; the root's path is `""`.
    /// Computed by the finalize pass.
    #[serde(skip)]
    pub path: String,
    /// Distance from the root. Computed by the finalize pass.
    #[serde(skip)]
    pub depth: usize,
}

impl Directory {
    /// Sort children deterministically and assign paths and depths.
    /// Child path = parent path + name + `/`.
    fn finalize(&mut self, parent_path: &str, depth: usize) {
        self.depth = depth;
        self.path = if depth == 0 {
            String::new()
        } else {
            format!("{}{}/", parent_path, self.name)
        };
        self.subdirectories.sort_by(|a, b| a.name.cmp(&b.name));
        self.files.sort_by(|a, b| a.name.cmp(&b.name));
        for file in &mut self.files {
            file.revisions.sort_by_key(|r| r.date);
        }
        let path = self.path.clone();
        for sub in &mut self.subdirectories {
            sub.finalize(&path, depth + 1);
        }
    }

    pub fn is_root(&self) -> bool {
        self.depth == 0
    }

    /// Number of current (non-dead) files directly in this directory.
    pub fn current_file_count(&self) -> usize {
        self.files.iter().filter(|f| !f.is_dead()).count()
    }

    /// Total current line count of the files directly in this directory.
    pub fn current_loc(&self) -> u64 {
        self.files.iter().map(|f| f.current_loc).sum()
    }

    /// True when this directory and all of its descendants contain no
    /// current files.
    pub fn is_empty(&self) -> bool {
        self.current_file_count() == 0 && self.subdirectories.iter().all(Directory::is_empty)
    }

    /// Visit this directory and all descendants depth-first, pre-order.
    pub fn walk_preorder<'a>(&'a self, visit: &mut dyn FnMut(&'a Directory)) {
        visit(self);
        for sub in &self.subdirectories {
            sub.walk_preorder(visit);
        }
    }

    fn last_date(&self) -> Option<DateTime<Utc>> {
        let own = self
            .files
            .iter()
            .flat_map(|f| f.revisions.iter().map(|r| r.date))
            .max();
        let sub = self.subdirectories.iter().filter_map(Directory::last_date).max();
        own.max(sub)
    }
}

/// The repository model handed to the report suite.
#[derive(Debug, Clone)]
pub struct Repository {
    pub root: Directory,
}

impl Repository {
    /// Build a repository from a raw directory tree, running the finalize
    /// pass so every traversal afterwards is deterministic.
    pub fn new(mut root: Directory) -> Self {
        root.finalize("", 0);
        Repository { root }
    }

    /// Date of the last known activity, if any revision exists.
    pub fn last_date(&self) -> Option<DateTime<Utc>> {
        self.root.last_date()
    }

    /// Number of current files in the whole repository.
    pub fn total_current_files(&self) -> usize {
        let mut total = 0;
        self.root.walk_preorder(&mut |dir| total += dir.current_file_count());
        total
    }

    /// Total current line count of the whole repository.
    pub fn total_current_loc(&self) -> u64 {
        let mut total = 0;
        self.root.walk_preorder(&mut |dir| total += dir.current_loc());
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn sample() -> Repository {
        Repository::new(Directory {
            name: String::new(),
            subdirectories: vec![
                Directory {
                    name: "src".to_string(),
                    subdirectories: vec![Directory {
                        name: "util".to_string(),
                        subdirectories: vec![],
                        files: vec![],
                        path: String::new(),
                        depth: 0,
                    }],
                    files: vec![VersionedFile {
                        name: "main.rs".to_string(),
                        current_loc: 120,
                        revisions: vec![
                            Revision {
                                date: date(2024, 3, 10),
                                lines_delta: 20,
                            },
                            Revision {
                                date: date(2024, 1, 5),
                                lines_delta: 100,
                            },
                        ],
                    }],
                    path: String::new(),
                    depth: 0,
                },
                Directory {
                    name: "docs".to_string(),
                    subdirectories: vec![],
                    files: vec![VersionedFile {
                        name: "old.txt".to_string(),
                        current_loc: 0,
                        revisions: vec![Revision {
                            date: date(2023, 6, 1),
                            lines_delta: -30,
                        }],
                    }],
                    path: String::new(),
                    depth: 0,
                },
            ],
            files: vec![],
            path: String::new(),
            depth: 0,
        })
    }

    #[test]
    fn finalize_assigns_paths_and_depths() {
        let repo = sample();
        assert_eq!(repo.root.path, "");
        assert_eq!(repo.root.depth, 0);
        // children are sorted by name: docs before src
        assert_eq!(repo.root.subdirectories[0].name, "docs");
        assert_eq!(repo.root.subdirectories[1].path, "src/");
        assert_eq!(repo.root.subdirectories[1].subdirectories[0].path, "src/util/");
        assert_eq!(repo.root.subdirectories[1].subdirectories[0].depth, 2);
    }

    #[test]
    fn finalize_sorts_revisions_by_date() {
        let repo = sample();
        let revisions = &repo.root.subdirectories[1].files[0].revisions;
        assert!(revisions[0].date < revisions[1].date);
    }

    #[test]
    fn emptiness_is_recursive() {
        let repo = sample();
        let docs = &repo.root.subdirectories[0];
        let src = &repo.root.subdirectories[1];
        assert!(docs.is_empty(), "only a dead file beneath docs");
        assert!(!src.is_empty());
        assert!(src.subdirectories[0].is_empty(), "util has no files at all");
    }

    #[test]
    fn totals_count_current_files_only() {
        let repo = sample();
        assert_eq!(repo.total_current_files(), 1);
        assert_eq!(repo.total_current_loc(), 120);
    }

    #[test]
    fn last_date_is_global_maximum() {
        let repo = sample();
        assert_eq!(repo.last_date(), Some(date(2024, 3, 10)));
    }
}
