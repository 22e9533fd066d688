//! Sibling navigation
//!
//! A navigation group is a titled, ordered set of pages shown together on
//! each member's page. Groups render either as a simple link list or, when
//! members carry commit-log metadata, as a year/month calendar grid.
//!
//! Global invariants enforced:
//! - Grouping and ordering never depend on hash-table iteration order.
//! - The group's form is decided once when the group is assembled.

use crate::html::{self, Markup};
use std::collections::BTreeMap;

/// Full month names; the calendar grid headers use the first three letters.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Commit-log metadata carried by log pages. `month` is 0-based
/// (0 = January .. 11 = December).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogPageMeta {
    pub year: i32,
    pub month: u32,
    pub commit_count: u32,
}

impl LogPageMeta {
    /// Only entries with a real year and at least one commit appear in the
    /// calendar grid.
    fn is_valid(&self) -> bool {
        self.year >= 0 && self.commit_count > 0
    }
}

/// One member of a navigation group.
#[derive(Debug, Clone)]
pub struct NavEntry {
    pub url: String,
    pub short_title: String,
    pub log: Option<LogPageMeta>,
}

/// Rendering form of a navigation group, chosen at assembly time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKind {
    Simple,
    Calendar,
}

/// A named, ordered sibling set. The list may include the page it is
/// rendered on; that entry is shown emphasized instead of linked.
#[derive(Debug, Clone)]
pub struct NavGroup {
    pub title: String,
    kind: NavKind,
    pub entries: Vec<NavEntry>,
}

impl NavGroup {
    /// Assemble a group. The form is fixed here: a group is a calendar
    /// group iff any member carries log metadata with a real year.
    pub fn new(title: impl Into<String>, entries: Vec<NavEntry>) -> Self {
        let kind = if entries
            .iter()
            .any(|e| e.log.is_some_and(|m| m.year >= 0))
        {
            NavKind::Calendar
        } else {
            NavKind::Simple
        };
        NavGroup {
            title: title.into(),
            kind,
            entries,
        }
    }

    pub fn kind(&self) -> NavKind {
        self.kind
    }

    /// Render the navigation block for the page at `current_url`.
    /// `current` is that page's own log metadata, used to emphasize its
    /// calendar cell. An empty group renders nothing.
    pub fn render(&self, current_url: &str, current: Option<LogPageMeta>, markup: Markup) -> String {
        if self.entries.is_empty() {
            return String::new();
        }
        match self.kind {
            NavKind::Simple => self.render_list(current_url, markup),
            NavKind::Calendar => self.render_calendar(current_url, current, markup),
        }
    }

    /// The entry following the current page in group order, if any.
    pub fn previous_sibling(&self, current_url: &str) -> Option<&NavEntry> {
        let position = self.entries.iter().position(|e| e.url == current_url)?;
        self.entries.get(position + 1)
    }

    fn render_list(&self, current_url: &str, markup: Markup) -> String {
        let mut s = markup.start_section2_classed(&self.title, "section nav");
        s.push_str("<ul>\n");
        for entry in &self.entries {
            s.push_str("    <li>");
            if entry.url == current_url {
                s.push_str(&format!(
                    "<span class=\"here\">{}</span>",
                    html::escape(&entry.short_title)
                ));
            } else {
                s.push_str(&html::link(&entry.url, &entry.short_title));
            }
            s.push_str("</li>\n");
        }
        s.push_str("</ul>\n");
        s.push_str(markup.end_section2());
        s
    }

    fn render_calendar(
        &self,
        current_url: &str,
        current: Option<LogPageMeta>,
        markup: Markup,
    ) -> String {
        // year -> month -> (url, commit count)
        let mut years: BTreeMap<i32, BTreeMap<u32, (&str, u32)>> = BTreeMap::new();
        for entry in &self.entries {
            if let Some(meta) = entry.log.filter(LogPageMeta::is_valid) {
                years
                    .entry(meta.year)
                    .or_default()
                    .insert(meta.month, (entry.url.as_str(), meta.commit_count));
            }
        }
        if years.is_empty() {
            return self.render_list(current_url, markup);
        }

        let mut s = markup.start_section2_classed(&self.title, "section nav monthly-calendar");
        s.push_str("<table class=\"monthly-calendar\">\n");
        s.push_str("  <thead><tr class=\"header\"><th class=\"month-header\">Year</th>");
        for name in MONTH_NAMES {
            s.push_str(&format!("<th>{}</th>", &name[..3]));
        }
        s.push_str("</tr></thead>\n  <tbody>\n");

        // most recent year first; rows alternate odd/even starting odd
        for (row, (year, months)) in years.iter().rev().enumerate() {
            let row_class = if row % 2 == 0 { "odd" } else { "even" };
            s.push_str(&format!(
                "    <tr class=\"{}\"><td class=\"year-cell\">{}</td>",
                row_class, year
            ));
            for month in 0..12u32 {
                let is_current =
                    current.is_some_and(|m| m.year == *year && m.month == month);
                if is_current {
                    s.push_str("<td class=\"current-month\">");
                } else {
                    s.push_str("<td>");
                }
                match months.get(&month) {
                    Some((_, count)) if is_current => {
                        s.push_str(&format!("<strong>{}</strong>", count));
                    }
                    Some((url, count)) => s.push_str(&html::link(url, &count.to_string())),
                    None => s.push_str("&nbsp;"),
                }
                s.push_str("</td>");
            }
            s.push_str("</tr>\n");
        }

        s.push_str("  </tbody>\n</table>\n");
        s.push_str(markup.end_section2());
        s
    }
}
