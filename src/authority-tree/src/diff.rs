//! Pairwise diff report
//!
//! Walks authorities in display order and, for each adjacent pair, lists the
//! keys of the next authority that the current one lacks.

use crate::hierarchy::TreeNode;
use crate::model::PermissionKey;
use crate::render::Glyphs;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Order in which authorities are compared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffOrder {
    /// Declaration order of the input
    #[default]
    Declaration,
    /// Descending key count, ties kept in declaration order
    Cardinality,
}

impl fmt::Display for DiffOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declaration => write!(f, "declaration"),
            Self::Cardinality => write!(f, "cardinality"),
        }
    }
}

impl FromStr for DiffOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "declaration" => Ok(Self::Declaration),
            "cardinality" => Ok(Self::Cardinality),
            other => Err(format!(
                "unknown diff order '{}', expected 'declaration' or 'cardinality'",
                other
            )),
        }
    }
}

/// Arrange nodes for the diff report
pub fn display_order(nodes: &[TreeNode], order: DiffOrder) -> Vec<&TreeNode> {
    let mut ordered: Vec<&TreeNode> = nodes.iter().collect();
    if order == DiffOrder::Cardinality {
        // stable sort keeps declaration order among equal sizes
        ordered.sort_by(|a, b| b.keys.len().cmp(&a.keys.len()));
    }
    ordered
}

/// Keys of `next` absent from `current`, in `next`'s order
pub fn sets_diff(next: &[PermissionKey], current: &[PermissionKey]) -> Vec<PermissionKey> {
    let current: HashSet<&str> = current.iter().map(String::as_str).collect();
    next.iter()
        .filter(|key| !current.contains(key.as_str()))
        .cloned()
        .collect()
}

/// Produce the diff blocks for adjacent pairs
///
/// Each block is a `"{next} - {current}:"` header, one indented line per key
/// of `next` missing from `current`, then a blank line.
pub fn diff<'a, I>(nodes_in_display_order: I, glyphs: &Glyphs) -> Vec<String>
where
    I: IntoIterator<Item = &'a TreeNode>,
{
    let nodes: Vec<&TreeNode> = nodes_in_display_order.into_iter().collect();
    let indent = glyphs.tab.repeat(2);

    let mut lines = Vec::new();
    for pair in nodes.windows(2) {
        let (current, next) = (pair[0], pair[1]);

        lines.push(format!("{} - {}:", next.authority, current.authority));
        lines.extend(
            sets_diff(&next.keys, &current.keys)
                .into_iter()
                .map(|key| format!("{}{}", indent, key)),
        );
        lines.push(String::new());
    }

    lines
}
