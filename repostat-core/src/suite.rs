//! Report suite assembly
//!
//! Builds the full page tree (index, repository map, directory pages,
//! monthly commit-log pages), links the pages into navigation groups, and
//! writes everything depth-first through the index page.

use crate::assets;
use crate::config::ReportConfig;
use crate::dirtree::DirectoryTreeFormatter;
use crate::html::{self, ROOT_LABEL};
use crate::model::{Directory, Repository};
use crate::nav::{LogPageMeta, NavEntry, NavGroup, MONTH_NAMES};
use crate::page::Page;
use crate::treemap;
use crate::weight;
use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Utc};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// File holding the serialized visualization tree.
pub const REPOMAP_DATA_FILE: &str = "repomap-data.js";

/// Page file name (without extension) for a directory page.
pub fn directory_page_name(path: &str) -> String {
    if path.is_empty() {
        "dir_root".to_string()
    } else {
        format!("dir_{}", path.trim_end_matches('/').replace('/', "_"))
    }
}

/// URL of a directory page.
pub fn directory_page_url(path: &str) -> String {
    format!("{}.html", directory_page_name(path))
}

/// Single-pass, single-threaded report builder.
pub struct ReportSuite<'a> {
    config: &'a ReportConfig,
    repository: &'a Repository,
    /// Last known activity, or "now" for an empty history.
    reference: DateTime<Utc>,
    /// Cutoff of the recent-change window.
    deadline: DateTime<Utc>,
}

impl<'a> ReportSuite<'a> {
    pub fn new(config: &'a ReportConfig, repository: &'a Repository) -> Self {
        let reference = repository.last_date().unwrap_or_else(Utc::now);
        ReportSuite {
            config,
            repository,
            reference,
            deadline: weight::deadline(reference),
        }
    }

    /// Generate the whole report. Returns the path of the index page.
    /// Individual page and asset failures are logged and skipped; only a
    /// missing output directory is fatal.
    pub fn generate(&self) -> Result<PathBuf> {
        fs::create_dir_all(&self.config.output_dir).with_context(|| {
            format!(
                "failed to create output directory {}",
                self.config.output_dir.display()
            )
        })?;
        assets::write_web_files(&self.config.output_dir);

        let repomap = self.make_repomap_page();
        let log_pages = self.make_commit_log_pages();
        let directory_pages = self.make_directory_pages();

        let mut index = self.make_index_page(&repomap, log_pages.first());
        index.add_child(repomap);
        for page in log_pages {
            index.add_child(page);
        }
        for page in directory_pages {
            index.add_child(page);
        }
        index.write(self.config, None);

        Ok(self.config.output_dir.join(index.url()))
    }

    fn make_index_page(&self, repomap: &Page, latest_log: Option<&Page>) -> Page {
        let full_title = format!("Development Statistics for {}", self.config.project_name);
        let mut page = self.config.create_page("index", "Overview", &full_title);
        if self.repository.last_date().is_some() {
            page.add_raw_attribute("Last activity", &html::date_time(&self.reference));
        }
        page.add_attribute("Files", &self.repository.total_current_files().to_string());
        page.add_attribute(
            "Lines of Code",
            &self.repository.total_current_loc().to_string(),
        );

        page.add_section("Reports");
        page.add_link(&repomap.url(), "Repository Map");
        if let Some(log) = latest_log {
            page.add_link(&log.url(), "Commit Logs");
        }

        page.add_section("Directory Tree");
        page.add_raw_content(&DirectoryTreeFormatter::new(&self.repository.root, false).format());
        page
    }

    fn make_repomap_page(&self) -> Page {
        let mut page = self
            .config
            .create_page("repomap", "Repository Map", "Repository Map");
        page.add_raw_attribute("Start date", &html::date(&self.deadline));
        page.add_raw_attribute("End date", &html::date(&self.reference));
        page.add_raw_content(
            "<p>Each box is a file. The box area tracks the current line count; \
             the colour tracks the lines changed over the last 30 days \
             (green added, red removed). Click a directory box to drill down.</p>\n",
        );
        page.add_raw_content("<div id=\"repomap\" style=\"width:940px;height:600px;\"></div>\n");
        page.add_raw_content(&format!(
            "<link rel=\"stylesheet\" href=\"{}\" />\n",
            assets::REPOMAP_CSS_FILE
        ));
        // the data loads via a script tag so the report works from file://
        page.add_raw_content(&format!(
            "<script src=\"{}\"></script>\n",
            REPOMAP_DATA_FILE
        ));
        page.add_raw_content(&format!(
            "<script src=\"{}\"></script>\n",
            assets::REPOMAP_JS_FILE
        ));
        self.write_repomap_data();
        page
    }

    /// Serialize the visualization tree. A failed write loses the treemap
    /// data but not the page that references it.
    fn write_repomap_data(&self) {
        let tree = treemap::build(&self.repository.root, self.deadline);
        let target = self.config.output_dir.join(REPOMAP_DATA_FILE);
        if let Err(e) = fs::write(&target, treemap::data_script(&tree)) {
            eprintln!(
                "Warning: failed to write treemap data {}: {}",
                target.display(),
                e
            );
        }
    }

    fn make_directory_pages(&self) -> Vec<Page> {
        let mut directories: Vec<&Directory> = Vec::new();
        self.repository
            .root
            .walk_preorder(&mut |dir| directories.push(dir));

        let entries: Vec<NavEntry> = directories
            .iter()
            .map(|dir| NavEntry {
                url: directory_page_url(&dir.path),
                short_title: display_name(dir).to_string(),
                log: None,
            })
            .collect();
        let group = NavGroup::new("Directories", entries);

        directories
            .iter()
            .map(|dir| {
                let name = display_name(dir);
                let full_title = format!("Directory {}", name);
                let mut page = self.config.create_page(
                    &directory_page_name(&dir.path),
                    name,
                    &full_title,
                );
                page.add_attribute("Files", &dir.current_file_count().to_string());
                page.add_attribute("Lines of Code", &dir.current_loc().to_string());
                page.add_section("Directory Tree");
                page.add_raw_content(&DirectoryTreeFormatter::new(dir, true).format());
                page.set_siblings(group.clone());
                page
            })
            .collect()
    }

    /// One page per (year, month) with commit activity, newest first, all
    /// sharing a calendar navigation group.
    fn make_commit_log_pages(&self) -> Vec<Page> {
        let activity = self.monthly_activity();

        let entries: Vec<NavEntry> = activity
            .iter()
            .rev()
            .map(|((year, month), summary)| NavEntry {
                url: format!("{}.html", log_page_name(*year, *month)),
                short_title: log_page_title(*year, *month),
                log: Some(LogPageMeta {
                    year: *year,
                    month: *month,
                    commit_count: summary.commits,
                }),
            })
            .collect();
        let group = NavGroup::new("Commit Logs", entries);

        activity
            .iter()
            .rev()
            .map(|((year, month), summary)| {
                let title = log_page_title(*year, *month);
                let full_title = format!("Commit Log {}", title);
                let mut page =
                    self.config
                        .create_page(&log_page_name(*year, *month), &title, &full_title);
                page.set_log_page_metadata(LogPageMeta {
                    year: *year,
                    month: *month,
                    commit_count: summary.commits,
                });
                page.set_siblings(group.clone());
                page.set_show_link_to_previous_sibling(true);
                page.add_attribute("Commits", &summary.commits.to_string());
                page.add_section("Changed Files");
                page.add_raw_content("<ul>\n");
                for (path, file) in &summary.files {
                    page.add_raw_content(&format!(
                        "    <li>{} ({} commits, {:+} lines)</li>\n",
                        html::escape(path),
                        file.commits,
                        file.lines_delta
                    ));
                }
                page.add_raw_content("</ul>\n");
                page
            })
            .collect()
    }

    /// Group the repository's revisions by calendar month, ascending.
    fn monthly_activity(&self) -> BTreeMap<(i32, u32), MonthlyActivity> {
        let mut months: BTreeMap<(i32, u32), MonthlyActivity> = BTreeMap::new();
        self.repository.root.walk_preorder(&mut |dir| {
            for file in &dir.files {
                let path = format!("{}{}", dir.path, file.name);
                for revision in &file.revisions {
                    let key = (revision.date.year(), revision.date.month0());
                    let month = months.entry(key).or_default();
                    month.commits += 1;
                    let entry = month.files.entry(path.clone()).or_default();
                    entry.commits += 1;
                    entry.lines_delta += revision.lines_delta;
                }
            }
        });
        months
    }
}

#[derive(Debug, Default)]
struct MonthlyActivity {
    commits: u32,
    files: BTreeMap<String, FileActivity>,
}

#[derive(Debug, Default)]
struct FileActivity {
    commits: u32,
    lines_delta: i64,
}

fn display_name(dir: &Directory) -> &str {
    if dir.is_root() {
        ROOT_LABEL
    } else {
        &dir.name
    }
}

fn log_page_name(year: i32, month: u32) -> String {
    format!("log-{}-{:02}", year, month + 1)
}

fn log_page_title(year: i32, month: u32) -> String {
    format!("{} {}", MONTH_NAMES[month as usize], year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Revision, VersionedFile};
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn sample() -> Repository {
        Repository::new(Directory {
            name: String::new(),
            subdirectories: vec![Directory {
                name: "lib".to_string(),
                subdirectories: vec![],
                files: vec![VersionedFile {
                    name: "a.txt".to_string(),
                    current_loc: 100,
                    revisions: vec![
                        Revision {
                            date: date(2024, 1, 10),
                            lines_delta: 80,
                        },
                        Revision {
                            date: date(2024, 3, 20),
                            lines_delta: 20,
                        },
                    ],
                }],
                path: String::new(),
                depth: 0,
            }],
            files: vec![],
            path: String::new(),
            depth: 0,
        })
    }

    #[test]
    fn directory_page_names_flatten_paths() {
        assert_eq!(directory_page_name(""), "dir_root");
        assert_eq!(directory_page_name("src/"), "dir_src");
        assert_eq!(directory_page_name("src/util/"), "dir_src_util");
        assert_eq!(directory_page_url("src/util/"), "dir_src_util.html");
    }

    #[test]
    fn monthly_activity_groups_by_calendar_month() {
        let repo = sample();
        let config = ReportConfig::default();
        let suite = ReportSuite::new(&config, &repo);
        let months = suite.monthly_activity();
        assert_eq!(months.len(), 2);
        let january = &months[&(2024, 0)];
        assert_eq!(january.commits, 1);
        assert_eq!(january.files["lib/a.txt"].lines_delta, 80);
        let march = &months[&(2024, 2)];
        assert_eq!(march.commits, 1);
    }

    #[test]
    fn log_page_naming_uses_one_based_months() {
        assert_eq!(log_page_name(2024, 0), "log-2024-01");
        assert_eq!(log_page_title(2024, 0), "January 2024");
        assert_eq!(log_page_name(2023, 11), "log-2023-12");
    }

    #[test]
    fn reference_date_is_last_activity() {
        let repo = sample();
        let config = ReportConfig::default();
        let suite = ReportSuite::new(&config, &repo);
        assert_eq!(suite.reference, date(2024, 3, 20));
        assert_eq!(suite.deadline, date(2024, 2, 19));
    }
}
