//! Report configuration
//!
//! Loads optional settings from a JSON file. All fields are optional;
//! CLI flags take precedence over config file values, which take
//! precedence over defaults.

use crate::html::Markup;
use crate::page::Page;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Raw config file contents; every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfigFile {
    /// Output directory for the generated site.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Project name shown in report titles.
    #[serde(default)]
    pub project_name: Option<String>,

    /// Character set declared in page headers (default: UTF-8).
    #[serde(default)]
    pub charset: Option<String>,
}

/// Load and parse a config file.
pub fn load_config_file(path: &Path) -> Result<ReportConfigFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

/// Resolved configuration, immutable for the duration of one report build.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub output_dir: PathBuf,
    pub project_name: String,
    pub charset: String,
    pub markup: Markup,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            output_dir: PathBuf::from("repostat-report"),
            project_name: "Repository".to_string(),
            charset: "UTF-8".to_string(),
            markup: Markup::Html,
        }
    }
}

impl ReportConfig {
    /// Merge defaults, config file values, and CLI overrides (highest).
    pub fn resolve(
        file: Option<ReportConfigFile>,
        output_dir: Option<PathBuf>,
        project_name: Option<String>,
    ) -> Self {
        let file = file.unwrap_or_default();
        let defaults = ReportConfig::default();
        ReportConfig {
            output_dir: output_dir.or(file.output_dir).unwrap_or(defaults.output_dir),
            project_name: project_name
                .or(file.project_name)
                .unwrap_or(defaults.project_name),
            charset: file.charset.unwrap_or(defaults.charset),
            markup: defaults.markup,
        }
    }

    /// Create a page bound to this configuration's markup profile.
    /// `file_name` is the page's file name without extension.
    pub fn create_page(&self, file_name: &str, short_title: &str, full_title: &str) -> Page {
        Page::new(file_name, short_title, full_title, self.markup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_file_or_flags() {
        let config = ReportConfig::resolve(None, None, None);
        assert_eq!(config.output_dir, PathBuf::from("repostat-report"));
        assert_eq!(config.project_name, "Repository");
        assert_eq!(config.charset, "UTF-8");
    }

    #[test]
    fn cli_flags_override_file_values() {
        let file = ReportConfigFile {
            output_dir: Some(PathBuf::from("from-file")),
            project_name: Some("File Project".to_string()),
            charset: Some("ISO-8859-1".to_string()),
        };
        let config = ReportConfig::resolve(
            Some(file),
            Some(PathBuf::from("from-cli")),
            Some("CLI Project".to_string()),
        );
        assert_eq!(config.output_dir, PathBuf::from("from-cli"));
        assert_eq!(config.project_name, "CLI Project");
        assert_eq!(config.charset, "ISO-8859-1");
    }

    #[test]
    fn unknown_config_keys_are_rejected() {
        let parsed: Result<ReportConfigFile, _> =
            serde_json::from_str(r#"{"outputdir": "typo"}"#);
        assert!(parsed.is_err());
    }
}
