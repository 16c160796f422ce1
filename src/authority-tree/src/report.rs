//! Report assembly
//!
//! Produces the full output of one invocation: the rendered tree below the
//! root authority, followed by the diff blocks when requested.

use crate::diff::{diff, display_order, DiffOrder};
use crate::error::Result;
use crate::hierarchy::Hierarchy;
use crate::model::RoleSet;
use crate::render::{render, Glyphs};
use crate::DEFAULT_ROOT_ROLE;
use tracing::{info, warn};

/// Options resolved by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Authority the tree is drawn from
    pub root_role: String,

    /// Append the pairwise diff after the tree
    pub show_diff: bool,

    /// Order used by the diff report
    pub diff_order: DiffOrder,

    /// Glyphs for tree and diff output
    pub glyphs: Glyphs,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            root_role: DEFAULT_ROOT_ROLE.to_string(),
            show_diff: false,
            diff_order: DiffOrder::default(),
            glyphs: Glyphs::default(),
        }
    }
}

impl ReportOptions {
    /// Set the root authority
    pub fn with_root(mut self, root_role: impl Into<String>) -> Self {
        self.root_role = root_role.into();
        self
    }

    /// Enable or disable the diff report
    pub fn with_diff(mut self, show_diff: bool) -> Self {
        self.show_diff = show_diff;
        self
    }

    /// Set the diff order
    pub fn with_diff_order(mut self, diff_order: DiffOrder) -> Self {
        self.diff_order = diff_order;
        self
    }

    /// Set the glyphs
    pub fn with_glyphs(mut self, glyphs: Glyphs) -> Self {
        self.glyphs = glyphs;
        self
    }
}

/// Build the report lines for a role set
///
/// An empty role set yields no lines. Otherwise the root authority must be
/// present; nothing is produced when it is not.
///
/// # Errors
///
/// - [`HierarchyError::MissingRoot`](crate::HierarchyError::MissingRoot) if
///   the root authority is absent from a non-empty role set
/// - [`HierarchyError::DanglingChild`](crate::HierarchyError::DanglingChild)
///   if the tree references an authority without a node
pub fn report(roles: &RoleSet, options: &ReportOptions) -> Result<Vec<String>> {
    if roles.is_empty() {
        warn!("Role set is empty, nothing to render");
        return Ok(Vec::new());
    }

    let hierarchy = Hierarchy::analyze(roles)?;
    let root = hierarchy.root(&options.root_role)?;

    info!(
        root = %options.root_role,
        authorities = hierarchy.len(),
        edges = hierarchy.edge_count(),
        "Analyzed authority hierarchy"
    );

    let mut lines = render(root, hierarchy.nodes(), &options.glyphs).collect::<Result<Vec<_>>>()?;

    if options.show_diff {
        let ordered = display_order(hierarchy.nodes(), options.diff_order);
        lines.extend(diff(ordered, &options.glyphs));
    }

    Ok(lines)
}
