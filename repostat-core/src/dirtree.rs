//! Directory tree text formatter
//!
//! Renders a directory subtree as an indented, collapsible HTML fragment.
//! Empty directories are tagged with a `deleted-directory` class; a
//! client-side checkbox toggles their visibility without any server state.

use crate::html::{self, ROOT_LABEL};
use crate::model::Directory;
use crate::suite::directory_page_url;

const SPACE_COUNT: usize = 4;

const DIRECTORY_ICON: &str = "&#128193;";
const DELETED_DIRECTORY_ICON: &str = "&#128465;";

/// Pure formatter over the read-only directory model.
pub struct DirectoryTreeFormatter<'a> {
    directory: &'a Directory,
    with_root_links: bool,
}

impl<'a> DirectoryTreeFormatter<'a> {
    /// `with_root_links` renders the start node's ancestor chain as a
    /// breadcrumb line above the tree instead of a tree line for the node
    /// itself.
    pub fn new(directory: &'a Directory, with_root_links: bool) -> Self {
        DirectoryTreeFormatter {
            directory,
            with_root_links,
        }
    }

    pub fn format(&self) -> String {
        let mut out = String::from("<div class=\"dirtree-container\">\n");
        out.push_str("<label class=\"dirtree-checkbox-label\">");
        out.push_str(
            "<input type=\"checkbox\" id=\"showDeletedDirs\" class=\"dirtree-checkbox\" />",
        );
        out.push_str(" Show Deleted Directories</label>\n");
        out.push_str("<p class=\"dirtree\">\n");
        let base_depth = self.directory.depth;
        if self.with_root_links {
            out.push_str(&self.root_links());
            out.push_str("<br/>\n");
            for sub in &self.directory.subdirectories {
                format_subtree(sub, base_depth, &mut out);
            }
        } else {
            format_subtree(self.directory, base_depth, &mut out);
        }
        out.push_str("</p>\n</div>\n");
        out.push_str(TOGGLE_STYLE);
        out.push_str(TOGGLE_SCRIPT);
        out
    }

    /// Breadcrumb for the start node: linked ancestors (derived from the
    /// node's path prefixes) joined by `/`, the node itself bold and
    /// unlinked.
    fn root_links(&self) -> String {
        let dir = self.directory;
        let own = format!("<strong>{}</strong>", html::escape(display_name(dir)));
        if dir.is_root() {
            return own;
        }
        let mut result = html::link(&directory_page_url(""), ROOT_LABEL);
        let trimmed = dir.path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').collect();
        let mut prefix = String::new();
        for segment in &segments[..segments.len() - 1] {
            prefix.push_str(segment);
            prefix.push('/');
            result.push('/');
            result.push_str(&html::link(&directory_page_url(&prefix), segment));
        }
        result.push('/');
        result.push_str(&own);
        result
    }
}

fn display_name(dir: &Directory) -> &str {
    if dir.is_root() {
        ROOT_LABEL
    } else {
        &dir.name
    }
}

fn format_subtree(dir: &Directory, base_depth: usize, out: &mut String) {
    format_line(dir, base_depth, out);
    for sub in &dir.subdirectories {
        format_subtree(sub, base_depth, out);
    }
}

fn format_line(dir: &Directory, base_depth: usize, out: &mut String) {
    let deleted = dir.is_empty();
    if deleted {
        out.push_str("<div class=\"deleted-directory\">\n");
    } else {
        out.push_str("<div>\n");
    }
    out.push_str(&spaces(dir.depth.saturating_sub(base_depth)));
    if deleted {
        out.push_str(&html::icon(DELETED_DIRECTORY_ICON, "Deleted directory"));
    } else {
        out.push_str(&html::icon(DIRECTORY_ICON, "Directory"));
    }
    out.push(' ');
    out.push_str(&html::link(
        &directory_page_url(&dir.path),
        display_name(dir),
    ));
    out.push_str(&format!(
        " ({} files, {} lines)\n",
        dir.current_file_count(),
        dir.current_loc()
    ));
    out.push_str("</div>\n");
}

fn spaces(count: usize) -> String {
    "&#160;".repeat(count * SPACE_COUNT)
}

const TOGGLE_STYLE: &str = "<style type=\"text/css\">\n\
    .deleted-directory { display: none; }\n\
    .dirtree-container.show-deleted .deleted-directory { display: block; }\n\
    </style>\n";

const TOGGLE_SCRIPT: &str = "<script type=\"text/javascript\">\n\
    (function() {\n\
      var checkbox = document.getElementById('showDeletedDirs');\n\
      var container = document.querySelector('.dirtree-container');\n\
      checkbox.addEventListener('change', function() {\n\
        if (checkbox.checked) {\n\
          container.classList.add('show-deleted');\n\
        } else {\n\
          container.classList.remove('show-deleted');\n\
        }\n\
      });\n\
    })();\n\
    </script>\n";
