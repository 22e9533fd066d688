//! Navigation page tree and writer
//!
//! A page owns its children outright, so the navigation structure is a
//! strict forest: self-parenting and cycles are unrepresentable. The
//! parent back-reference needed for breadcrumbs is materialized as a
//! breadcrumb chain threaded through the depth-first write pass.
//!
//! Global invariants enforced:
//! - A page is written at most once; a repeated `write` is a no-op.
//! - A failed page write is logged and never aborts sibling pages.

use crate::assets;
use crate::config::ReportConfig;
use crate::html::{self, Markup};
use crate::nav::{LogPageMeta, NavGroup};
use std::fs;

const PROJECT_SHORTNAME: &str = "repostat";
const PROJECT_URL: &str = "https://github.com/repostat/repostat";

/// One unit of generated output in the parent/child/sibling structure.
#[derive(Debug)]
pub struct Page {
    file_name: String,
    short_title: String,
    full_title: String,
    markup: Markup,
    content: String,
    attributes: Vec<(String, String)>,
    children: Vec<Page>,
    nav: Option<NavGroup>,
    show_link_to_previous_sibling: bool,
    log_meta: Option<LogPageMeta>,
    in_section: bool,
    written: bool,
}

impl Page {
    /// `file_name` is the page's stable identifier, without extension.
    /// Identity and titles are fixed for the page's lifetime.
    pub fn new(file_name: &str, short_title: &str, full_title: &str, markup: Markup) -> Self {
        Page {
            file_name: file_name.to_string(),
            short_title: short_title.to_string(),
            full_title: full_title.to_string(),
            markup,
            content: String::new(),
            attributes: Vec::new(),
            children: Vec::new(),
            nav: None,
            show_link_to_previous_sibling: false,
            log_meta: None,
            in_section: false,
            written: false,
        }
    }

    pub fn url(&self) -> String {
        format!("{}.{}", self.file_name, self.markup.extension())
    }

    pub fn short_title(&self) -> &str {
        &self.short_title
    }

    pub fn is_written(&self) -> bool {
        self.written
    }

    /// Attach a sibling group. The group may contain this page itself.
    pub fn set_siblings(&mut self, nav: NavGroup) {
        self.nav = Some(nav);
    }

    /// Attach a child page. The child is owned by this page and written
    /// during this page's own write pass.
    pub fn add_child(&mut self, child: Page) {
        self.children.push(child);
    }

    pub fn set_log_page_metadata(&mut self, meta: LogPageMeta) {
        self.log_meta = Some(meta);
    }

    pub fn log_page_metadata(&self) -> Option<LogPageMeta> {
        self.log_meta
    }

    pub fn set_show_link_to_previous_sibling(&mut self, show: bool) {
        self.show_link_to_previous_sibling = show;
    }

    /// Add an attribute with an HTML-escaped value.
    pub fn add_attribute(&mut self, key: &str, value: &str) {
        self.add_raw_attribute(key, &html::escape(value));
    }

    /// Add an attribute whose value is already valid markup.
    pub fn add_raw_attribute(&mut self, key: &str, raw_value: &str) {
        self.attributes
            .push((key.to_string(), raw_value.to_string()));
    }

    pub fn add_raw_content(&mut self, s: &str) {
        self.content.push_str(s);
    }

    /// Open a level-2 section, closing any section left open.
    pub fn add_section(&mut self, title: &str) {
        if self.in_section {
            self.content.push_str(self.markup.end_section2());
        }
        self.content.push_str(&self.markup.start_section2(title));
        self.in_section = true;
    }

    pub fn add_link(&mut self, url: &str, text: &str) {
        self.add_raw_content(&format!("<p>{}</p>\n", html::link(url, text)));
    }

    /// Write this page and, depth-first, all of its children. Each child
    /// receives this page's breadcrumb chain before its own write, which
    /// finalizes parent links ahead of serialization. A page that was
    /// already written is skipped entirely.
    pub fn write(&mut self, config: &ReportConfig, parent_crumb: Option<&str>) {
        if self.written {
            return;
        }
        self.written = true;
        if self.in_section {
            self.content.push_str(self.markup.end_section2());
            self.in_section = false;
        }

        let own_crumb = match parent_crumb {
            Some(p) => format!("{} {}", p, self.crumb_fragment()),
            None => self.crumb_fragment(),
        };
        for child in &mut self.children {
            child.write(config, Some(&own_crumb));
        }

        let target = config.output_dir.join(self.url());
        let document = self.render(config, parent_crumb);
        if let Err(e) = fs::write(&target, document) {
            eprintln!("Warning: failed to write page {}: {}", target.display(), e);
        }

        // body content is never needed again
        self.content = String::new();
    }

    /// This page's own contribution to descendants' breadcrumbs.
    fn crumb_fragment(&self) -> String {
        format!("&#171; {}", html::link(&self.url(), &self.short_title))
    }

    fn render(&self, config: &ReportConfig, parent_crumb: Option<&str>) -> String {
        let mut out = self.markup.header(
            &self.full_title,
            assets::REPORT_CSS_FILE,
            &config.charset,
        );
        out.push_str(&self.markup.start_section1(&self.full_title));
        if let Some(crumb) = parent_crumb {
            out.push_str(&format!("<div id=\"parentlink\">{}</div>\n", crumb));
        }
        if let Some(nav) = &self.nav {
            out.push_str(&nav.render(&self.url(), self.log_meta, self.markup));
        }
        out.push_str(&self.rendered_attributes());
        out.push_str(&self.content);
        out.push_str(&self.link_to_previous_sibling());
        out.push_str(self.markup.end_section1());
        out.push_str(&generated_by());
        out.push_str(self.markup.end_of_page());
        out
    }

    fn rendered_attributes(&self) -> String {
        if self.attributes.is_empty() {
            return String::new();
        }
        let mut s = String::from("<dl class=\"attributes\">\n");
        for (key, value) in &self.attributes {
            s.push_str(&format!("    <dt>{}:</dt>\n", html::escape(key)));
            s.push_str(&format!("    <dd>{}</dd>\n", value));
        }
        s.push_str("</dl>\n");
        s
    }

    fn link_to_previous_sibling(&self) -> String {
        if !self.show_link_to_previous_sibling {
            return String::new();
        }
        let Some(previous) = self
            .nav
            .as_ref()
            .and_then(|nav| nav.previous_sibling(&self.url()))
        else {
            return String::new();
        };
        format!(
            "<p class=\"previous\">{} &#187;</p>\n",
            html::link(&previous.url, &previous.short_title)
        )
    }
}

fn generated_by() -> String {
    format!(
        "<div id=\"generatedby\">Generated by {} {}</div>\n",
        html::link(PROJECT_URL, PROJECT_SHORTNAME),
        env!("CARGO_PKG_VERSION"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::NavEntry;
    use std::path::Path;

    fn test_config(dir: &Path) -> ReportConfig {
        ReportConfig {
            output_dir: dir.to_path_buf(),
            ..ReportConfig::default()
        }
    }

    fn read(dir: &Path, name: &str) -> String {
        fs::read_to_string(dir.join(name)).expect("page file")
    }

    #[test]
    fn write_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        let mut page = config.create_page("once", "Once", "Written Once");
        page.add_raw_content("<p>body</p>");
        page.write(&config, None);
        assert!(page.is_written());
        assert!(tmp.path().join("once.html").exists());

        // remove the artifact; a second write must not recreate it
        fs::remove_file(tmp.path().join("once.html")).unwrap();
        page.write(&config, None);
        assert!(!tmp.path().join("once.html").exists());
    }

    #[test]
    fn children_are_written_with_parent_breadcrumbs() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        let mut index = config.create_page("index", "Home", "Home Page");
        let mut section = config.create_page("section", "Section", "A Section");
        section.add_child(config.create_page("detail", "Detail", "A Detail"));
        index.add_child(section);
        index.write(&config, None);

        let index_out = read(tmp.path(), "index.html");
        assert!(!index_out.contains("parentlink"), "root has no breadcrumb");

        let section_out = read(tmp.path(), "section.html");
        assert!(section_out
            .contains("<div id=\"parentlink\">&#171; <a href=\"index.html\">Home</a></div>"));

        let detail_out = read(tmp.path(), "detail.html");
        assert!(detail_out.contains(
            "&#171; <a href=\"index.html\">Home</a> &#171; <a href=\"section.html\">Section</a>"
        ));
    }

    #[test]
    fn page_layout_orders_blocks() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        let mut page = config.create_page("layout", "Layout", "Layout Page");
        page.set_siblings(NavGroup::new(
            "Pages",
            vec![
                NavEntry {
                    url: "layout.html".to_string(),
                    short_title: "Layout".to_string(),
                    log: None,
                },
                NavEntry {
                    url: "other.html".to_string(),
                    short_title: "Other".to_string(),
                    log: None,
                },
            ],
        ));
        page.set_show_link_to_previous_sibling(true);
        page.add_attribute("Files", "3");
        page.add_section("Body");
        page.add_raw_content("<p>body text</p>\n");
        let mut parent = config.create_page("parent", "Parent", "Parent Page");
        parent.add_child(page);
        parent.write(&config, None);

        let out = read(tmp.path(), "layout.html");
        let positions = [
            out.find("<h1>Layout Page</h1>").unwrap(),
            out.find("parentlink").unwrap(),
            out.find("class=\"section nav\"").unwrap(),
            out.find("<dl class=\"attributes\">").unwrap(),
            out.find("body text").unwrap(),
            out.find("class=\"previous\"").unwrap(),
            out.find("generatedby").unwrap(),
        ];
        let mut sorted = positions.to_vec();
        sorted.sort_unstable();
        assert_eq!(positions.to_vec(), sorted, "blocks must appear in order");
        assert!(out.contains("<a href=\"other.html\">Other</a> &#187;"));
    }

    #[test]
    fn open_section_is_closed_at_write() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        let mut page = config.create_page("sectioned", "S", "Sectioned");
        page.add_section("First");
        page.add_section("Second");
        page.write(&config, None);
        let out = read(tmp.path(), "sectioned.html");
        let opens = out.matches("<div class=\"section\">").count();
        assert_eq!(opens, 2);
        assert!(out.contains("<h2>First</h2>"));
        assert!(out.contains("<h2>Second</h2>"));
    }

    #[test]
    fn failed_write_does_not_abort_siblings() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        let mut index = config.create_page("index", "Home", "Home");
        // a separator in the identifier points the write at a directory
        // that does not exist; the sibling after it must still be written
        index.add_child(config.create_page("missing/broken", "Broken", "Broken"));
        index.add_child(config.create_page("healthy", "Healthy", "Healthy"));
        index.write(&config, None);
        assert!(tmp.path().join("healthy.html").exists());
        assert!(tmp.path().join("index.html").exists());
    }
}
