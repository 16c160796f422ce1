//! Tree rendering
//!
//! Draws the hierarchy below a root authority as branch-drawing text lines,
//! listing only the new keys of every authority:
//!
//! ```text
//! ┌─ROLE_ADMIN
//! │        b
//! │        c
//! └───┐
//!     ├─ROLE_USER
//!     │        a
//!     └───┐
//!         ├─ROLE_GUEST
//! ```
//!
//! The walk uses an explicit work list, so depth is bounded by heap rather
//! than stack.

use crate::error::{HierarchyError, Result};
use crate::hierarchy::TreeNode;
use std::collections::VecDeque;

/// Indentation added per tree depth, in units of [`Glyphs::tab`]
pub const LEVEL_STEP: usize = 2;

/// Indentation of key lines after the vertical bar, in units of [`Glyphs::tab`]
pub const KEY_INDENT: usize = 4;

/// Branch-drawing glyphs used by the renderer and the diff reporter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyphs {
    /// One indentation unit
    pub tab: &'static str,
    /// Vertical bar in front of key lines
    pub vertical: &'static str,
    /// Marker in front of nested authorities
    pub middle: &'static str,
    /// Marker in front of the root authority
    pub top: &'static str,
    /// Corner opening a child subtree
    pub bottom: &'static str,
    /// Horizontal stroke
    pub horizontal: &'static str,
    /// Corner turning down into a child subtree
    pub right_top: &'static str,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            tab: "  ",
            vertical: "│",
            middle: "├─",
            top: "┌─",
            bottom: "└─",
            horizontal: "─",
            right_top: "┐",
        }
    }
}

impl Glyphs {
    /// Plain ASCII glyphs for terminals without box-drawing support
    pub fn ascii() -> Self {
        Self {
            tab: "  ",
            vertical: "|",
            middle: "+-",
            top: "+-",
            bottom: "`-",
            horizontal: "-",
            right_top: "+",
        }
    }
}

/// Pending work item of the depth-first walk
#[derive(Debug)]
enum Frame<'a> {
    /// A resolved node
    Node { node: &'a TreeNode, level: usize },
    /// A child reference, resolved when popped
    Child {
        parent: &'a str,
        name: &'a str,
        level: usize,
    },
}

/// Lazy sequence of rendered lines
///
/// Yields `Err` once if a child reference cannot be resolved, then stops.
#[derive(Debug)]
pub struct RenderedTree<'a> {
    all: &'a [TreeNode],
    glyphs: &'a Glyphs,
    stack: Vec<Frame<'a>>,
    pending: VecDeque<String>,
    failed: bool,
}

/// Render the hierarchy below `root`
///
/// Children are looked up by name in `all`. Each call walks the structure
/// anew.
pub fn render<'a>(root: &'a TreeNode, all: &'a [TreeNode], glyphs: &'a Glyphs) -> RenderedTree<'a> {
    RenderedTree {
        all,
        glyphs,
        stack: vec![Frame::Node { node: root, level: 0 }],
        pending: VecDeque::new(),
        failed: false,
    }
}

/// Render the hierarchy below `root` into a vector
pub fn render_lines(root: &TreeNode, all: &[TreeNode], glyphs: &Glyphs) -> Result<Vec<String>> {
    render(root, all, glyphs).collect()
}

impl<'a> RenderedTree<'a> {
    fn emit_node(&mut self, node: &'a TreeNode, level: usize) {
        let glyphs = self.glyphs;
        let indent = glyphs.tab.repeat(level);
        let branch = if level == 0 { glyphs.top } else { glyphs.middle };

        self.pending
            .push_back(format!("{}{}{}", indent, branch, node.authority));

        for key in &node.new_keys {
            self.pending.push_back(format!(
                "{}{}{}{}",
                indent,
                glyphs.vertical,
                glyphs.tab.repeat(KEY_INDENT),
                key
            ));
        }

        if !node.new_keys.is_empty() {
            let corner = if node.is_leaf() {
                format!("{}{}", indent, glyphs.vertical)
            } else {
                format!(
                    "{}{}{}{}",
                    indent,
                    glyphs.bottom,
                    glyphs.horizontal.repeat(2),
                    glyphs.right_top
                )
            };
            self.pending.push_back(corner);
        }

        for child in node.subsets.iter().rev() {
            self.stack.push(Frame::Child {
                parent: &node.authority,
                name: child,
                level: level + LEVEL_STEP,
            });
        }
    }
}

impl<'a> Iterator for RenderedTree<'a> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(Ok(line));
            }

            if self.failed {
                return None;
            }

            match self.stack.pop()? {
                Frame::Node { node, level } => self.emit_node(node, level),
                Frame::Child {
                    parent,
                    name,
                    level,
                } => {
                    let all = self.all;
                    match all.iter().find(|node| node.authority == name) {
                        Some(node) => self.emit_node(node, level),
                        None => {
                            self.failed = true;
                            self.stack.clear();
                            return Some(Err(HierarchyError::DanglingChild {
                                parent: parent.to_string(),
                                child: name.to_string(),
                            }));
                        }
                    }
                }
            }
        }
    }
}

impl std::iter::FusedIterator for RenderedTree<'_> {}
