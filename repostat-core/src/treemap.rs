//! Visualization tree builder
//!
//! Walks the directory hierarchy and produces the weighted tree consumed by
//! the client-side treemap: branch nodes mirror directories, leaf nodes are
//! files sized by current LOC and colored by recent change. Zero-weight
//! leaves are dropped; empty branches are kept so the client can still
//! drill into them.

use crate::html::ROOT_LABEL;
use crate::model::Directory;
use crate::weight::{self, TreeWeight};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Global variable the data script assigns the tree to.
pub const DATA_VARIABLE: &str = "window.repomapData";

/// One node of the weighted visualization tree. Exists only for the
/// duration of a report build.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum WeightedNode {
    Branch(Branch),
    Leaf(Leaf),
}

/// A directory node. The synthetic root carries no path.
#[derive(Debug, Serialize)]
pub struct Branch {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub children: Vec<WeightedNode>,
}

/// A file node. Invariant: `size > 0` (zero-size files are never emitted).
#[derive(Debug, Serialize)]
pub struct Leaf {
    pub label: String,
    pub weight: u64,
    pub size: u64,
    pub change: i64,
    pub value: f64,
    pub path: String,
}

/// Build the visualization tree for a directory subtree.
///
/// Subdirectories recurse first, in the model's sorted order, then files.
/// The leaf path is the directory's full path plus the filename, which is
/// globally unique even when leaf names collide across directories.
pub fn build(dir: &Directory, deadline: DateTime<Utc>) -> WeightedNode {
    let label = if dir.is_root() {
        ROOT_LABEL.to_string()
    } else {
        dir.name.clone()
    };
    let mut children = Vec::new();
    for sub in &dir.subdirectories {
        children.push(build(sub, deadline));
    }
    for file in &dir.files {
        let w = weight::tree_weight(file, deadline);
        if w.is_zero() {
            continue;
        }
        children.push(WeightedNode::Leaf(make_leaf(
            &file.name, &dir.path, w,
        )));
    }
    WeightedNode::Branch(Branch {
        label,
        path: if dir.is_root() {
            None
        } else {
            Some(dir.path.clone())
        },
        children,
    })
}

fn make_leaf(file_name: &str, dir_path: &str, w: TreeWeight) -> Leaf {
    Leaf {
        label: file_name.to_string(),
        weight: w.size,
        size: w.size,
        change: w.change,
        value: w.percentage(),
        path: format!("{}{}", dir_path, file_name),
    }
}

/// Render the tree as a script that assigns the JSON value to
/// [`DATA_VARIABLE`]. Loading it via a script tag avoids CORS restrictions
/// when the report is opened from the local filesystem.
pub fn data_script(root: &WeightedNode) -> String {
    let json = serde_json::to_string(root).unwrap_or_else(|_| "{}".to_string());
    format!("{} = {};\n", DATA_VARIABLE, json)
}
