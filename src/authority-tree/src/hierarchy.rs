//! Authority hierarchy
//!
//! Runs the analysis pipeline over a [`RoleSet`]: subset order, reduction to
//! direct children, then new-key attribution. The result is one immutable
//! [`TreeNode`] per authority, in declaration order.

use crate::attribute::attribute_new_keys;
use crate::error::{HierarchyError, Result};
use crate::model::{PermissionKey, RoleName, RoleSet};
use crate::order::{build_dominance, Dominance};
use crate::reduce::reduce_to_direct_children;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Rendering-ready view of one authority
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Authority name
    pub authority: RoleName,

    /// Keys introduced by this authority, sorted
    pub new_keys: Vec<PermissionKey>,

    /// Direct children, in declaration order
    pub subsets: Vec<RoleName>,

    /// Full sorted key set
    pub keys: Vec<PermissionKey>,
}

impl TreeNode {
    /// Whether the node has no direct children
    pub fn is_leaf(&self) -> bool {
        self.subsets.is_empty()
    }
}

/// Analyzed authority hierarchy
#[derive(Debug, Clone)]
pub struct Hierarchy {
    nodes: Vec<TreeNode>,
    dominance: Dominance,
}

impl Hierarchy {
    /// Analyze a role set
    ///
    /// # Example
    ///
    /// ```rust
    /// use cretoai_authority_tree::{Hierarchy, RoleSet};
    ///
    /// # fn example() -> cretoai_authority_tree::Result<()> {
    /// let roles = RoleSet::normalize(vec![
    ///     ("ROLE_ADMIN".to_string(), vec!["a".to_string(), "b".to_string()]),
    ///     ("ROLE_USER".to_string(), vec!["a".to_string()]),
    /// ]);
    ///
    /// let hierarchy = Hierarchy::analyze(&roles)?;
    /// let admin = hierarchy.root("ROLE_ADMIN")?;
    ///
    /// assert_eq!(admin.subsets, vec!["ROLE_USER"]);
    /// assert_eq!(admin.new_keys, vec!["b"]);
    /// # Ok(())
    /// # }
    /// # example().unwrap();
    /// ```
    pub fn analyze(roles: &RoleSet) -> Result<Self> {
        let dominance = build_dominance(roles);

        let mut nodes = Vec::with_capacity(roles.len());
        for (authority, keys) in roles.iter() {
            let subsets = reduce_to_direct_children(authority, roles, &dominance)?;
            let new_keys = attribute_new_keys(keys, &subsets, roles)?;

            debug!(
                authority,
                dominated = dominance.get(authority).map_or(0, Vec::len),
                direct = subsets.len(),
                new_keys = new_keys.len(),
                "Attributed authority"
            );

            nodes.push(TreeNode {
                authority: authority.to_string(),
                new_keys,
                subsets,
                keys: keys.to_vec(),
            });
        }

        Ok(Self { nodes, dominance })
    }

    /// All nodes, in declaration order
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Look up the node of an authority
    pub fn node(&self, authority: &str) -> Option<&TreeNode> {
        self.nodes.iter().find(|node| node.authority == authority)
    }

    /// Look up the node to render from
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::MissingRoot`] if the authority is absent.
    pub fn root(&self, authority: &str) -> Result<&TreeNode> {
        self.node(authority)
            .ok_or_else(|| HierarchyError::MissingRoot(authority.to_string()))
    }

    /// Unreduced dominance lists
    pub fn dominance(&self) -> &Dominance {
        &self.dominance
    }

    /// Number of direct-child edges
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.subsets.len()).sum()
    }

    /// Number of authorities
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the hierarchy holds no authorities
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role_set(entries: &[(&str, &[&str])]) -> RoleSet {
        RoleSet::normalize(entries.iter().map(|(name, keys)| {
            (
                name.to_string(),
                keys.iter().map(|k| k.to_string()).collect::<Vec<_>>(),
            )
        }))
    }

    #[test]
    fn test_admin_user_guest() {
        let roles = role_set(&[
            ("ROLE_ADMIN", &["a", "b", "c"]),
            ("ROLE_USER", &["a"]),
            ("ROLE_GUEST", &[]),
        ]);
        let hierarchy = Hierarchy::analyze(&roles).unwrap();

        let admin = hierarchy.node("ROLE_ADMIN").unwrap();
        assert_eq!(admin.subsets, vec!["ROLE_USER"]);
        assert_eq!(admin.new_keys, vec!["b", "c"]);

        let user = hierarchy.node("ROLE_USER").unwrap();
        assert_eq!(user.subsets, vec!["ROLE_GUEST"]);
        assert_eq!(user.new_keys, vec!["a"]);

        let guest = hierarchy.node("ROLE_GUEST").unwrap();
        assert!(guest.is_leaf());
        assert!(guest.new_keys.is_empty());

        assert_eq!(hierarchy.edge_count(), 2);
        assert_eq!(hierarchy.dominance()["ROLE_ADMIN"], vec!["ROLE_USER", "ROLE_GUEST"]);
    }

    #[test]
    fn test_disjoint_roles() {
        let roles = role_set(&[("ROLE_ADMIN", &["a"]), ("ROLE_X", &["b"])]);
        let hierarchy = Hierarchy::analyze(&roles).unwrap();

        let admin = hierarchy.root("ROLE_ADMIN").unwrap();
        assert!(admin.is_leaf());
        assert_eq!(admin.new_keys, vec!["a"]);
        assert_eq!(hierarchy.edge_count(), 0);
    }

    #[test]
    fn test_missing_root() {
        let roles = role_set(&[("ROLE_USER", &["a"])]);
        let hierarchy = Hierarchy::analyze(&roles).unwrap();

        let result = hierarchy.root("ROLE_ADMIN");
        assert!(matches!(result, Err(HierarchyError::MissingRoot(name)) if name == "ROLE_ADMIN"));
    }

    #[test]
    fn test_nodes_follow_declaration_order() {
        let roles = role_set(&[("b", &["x"]), ("a", &["x", "y"]), ("c", &[])]);
        let hierarchy = Hierarchy::analyze(&roles).unwrap();

        let names: Vec<_> = hierarchy.nodes().iter().map(|n| n.authority.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(hierarchy.len(), 3);
    }

    #[test]
    fn test_empty_role_set() {
        let hierarchy = Hierarchy::analyze(&RoleSet::default()).unwrap();
        assert!(hierarchy.is_empty());
        assert_eq!(hierarchy.edge_count(), 0);
    }
}
