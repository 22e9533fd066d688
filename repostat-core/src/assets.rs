//! Static web assets shipped with the generated report
//!
//! The treemap stylesheet and script, plus the report stylesheet, are
//! embedded at compile time and copied into the output directory. The copy
//! is best-effort: the report is still usable without the visualization
//! enhancement, so a failed copy is logged and generation continues.

use std::fs;
use std::path::Path;

pub const REPOMAP_JS_FILE: &str = "repomap.js";
pub const REPOMAP_CSS_FILE: &str = "repomap.css";
pub const REPORT_CSS_FILE: &str = "repostat.css";

const REPOMAP_JS: &str = include_str!("../assets/repomap.js");
const REPOMAP_CSS: &str = include_str!("../assets/repomap.css");
const REPORT_CSS: &str = include_str!("../assets/repostat.css");

/// Copy the client-side assets into the output directory.
pub fn write_web_files(output_dir: &Path) {
    let files = [
        (REPOMAP_JS_FILE, REPOMAP_JS),
        (REPOMAP_CSS_FILE, REPOMAP_CSS),
        (REPORT_CSS_FILE, REPORT_CSS),
    ];
    for (name, contents) in files {
        let target = output_dir.join(name);
        if let Err(e) = fs::write(&target, contents) {
            eprintln!(
                "Warning: failed to copy web asset {}: {}",
                target.display(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assets_land_in_the_output_directory() {
        let tmp = tempfile::tempdir().unwrap();
        write_web_files(tmp.path());
        for name in [REPOMAP_JS_FILE, REPOMAP_CSS_FILE, REPORT_CSS_FILE] {
            let contents = fs::read_to_string(tmp.path().join(name)).expect("asset file");
            assert!(!contents.is_empty());
        }
    }

    #[test]
    fn missing_output_directory_is_not_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        write_web_files(&tmp.path().join("does-not-exist"));
    }
}
