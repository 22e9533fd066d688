//! HTML and markup primitives shared by all page makers.

use chrono::{DateTime, Utc};

/// Display label for the repository root in trees and navigation.
pub const ROOT_LABEL: &str = "[root]";

/// Escape text for embedding in HTML.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// An anchor tag with escaped URL and text.
pub fn link(url: &str, text: &str) -> String {
    format!("<a href=\"{}\">{}</a>", escape(url), escape(text))
}

/// A small inline icon rendered as a glyph span.
pub fn icon(glyph: &str, alt: &str) -> String {
    format!("<span class=\"icon\" title=\"{}\">{}</span>", escape(alt), glyph)
}

pub fn date(d: &DateTime<Utc>) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub fn date_time(d: &DateTime<Utc>) -> String {
    d.format("%Y-%m-%d %H:%M").to_string()
}

/// Output markup profile. Pages hold one and derive their file extension
/// and document scaffolding from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Markup {
    #[default]
    Html,
}

impl Markup {
    pub fn extension(self) -> &'static str {
        match self {
            Markup::Html => "html",
        }
    }

    pub fn header(self, title: &str, css_url: &str, charset: &str) -> String {
        match self {
            Markup::Html => format!(
                "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
                 <meta charset=\"{}\">\n<title>{}</title>\n\
                 <link rel=\"stylesheet\" href=\"{}\">\n</head>\n<body>\n",
                escape(charset),
                escape(title),
                escape(css_url),
            ),
        }
    }

    pub fn end_of_page(self) -> &'static str {
        match self {
            Markup::Html => "</body>\n</html>\n",
        }
    }

    pub fn start_section1(self, title: &str) -> String {
        match self {
            Markup::Html => format!("<div class=\"page\">\n<h1>{}</h1>\n", escape(title)),
        }
    }

    pub fn end_section1(self) -> &'static str {
        match self {
            Markup::Html => "</div>\n",
        }
    }

    pub fn start_section2(self, title: &str) -> String {
        self.start_section2_classed(title, "section")
    }

    pub fn start_section2_classed(self, title: &str, css_class: &str) -> String {
        match self {
            Markup::Html => format!(
                "<div class=\"{}\">\n<h2>{}</h2>\n",
                escape(css_class),
                escape(title)
            ),
        }
    }

    pub fn end_section2(self) -> &'static str {
        match self {
            Markup::Html => "</div>\n",
        }
    }
}
