//! New-key attribution
//!
//! A key is attributed to the most specific authority that introduces it: an
//! authority's new keys are its own keys minus everything its direct children
//! already grant.

use crate::error::{HierarchyError, Result};
use crate::model::{PermissionKey, RoleName, RoleSet};
use std::collections::HashSet;

/// Keys of an authority not granted by any of its direct children
///
/// `full_keys` order is preserved. With no direct children the full set is
/// returned.
///
/// # Errors
///
/// Returns [`HierarchyError::UnknownRole`] if a child is not part of `roles`.
pub fn attribute_new_keys(
    full_keys: &[PermissionKey],
    direct_children: &[RoleName],
    roles: &RoleSet,
) -> Result<Vec<PermissionKey>> {
    let mut inherited: HashSet<&str> = HashSet::new();
    for child in direct_children {
        let child_keys = roles
            .keys(child)
            .ok_or_else(|| HierarchyError::UnknownRole(child.clone()))?;
        inherited.extend(child_keys.iter().map(String::as_str));
    }

    Ok(full_keys
        .iter()
        .filter(|key| !inherited.contains(key.as_str()))
        .cloned()
        .collect())
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
    fn test_leaf_keeps_all_keys() {
        let roles = role_set(&[("ROLE_USER", &["a", "b"])]);
        let full = roles.keys("ROLE_USER").unwrap();

        assert_eq!(attribute_new_keys(full, &[], &roles).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_subtracts_union_of_children() {
        let roles = role_set(&[
            ("ROLE_ADMIN", &["a", "b", "c", "d"]),
            ("left", &["a", "b"]),
            ("right", &["b", "c"]),
        ]);
        let full = roles.keys("ROLE_ADMIN").unwrap();
        let children = vec!["left".to_string(), "right".to_string()];

        assert_eq!(attribute_new_keys(full, &children, &roles).unwrap(), vec!["d"]);
    }

    #[test]
    fn test_equal_child_leaves_nothing_new() {
        let roles = role_set(&[("A", &["x", "y"]), ("B", &["x", "y"])]);
        let full = roles.keys("A").unwrap();

        assert!(attribute_new_keys(full, &["B".to_string()], &roles)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_unknown_child() {
        let roles = role_set(&[("A", &["x"])]);
        let full = roles.keys("A").unwrap();

        let result = attribute_new_keys(full, &["ghost".to_string()], &roles);
        assert!(matches!(result, Err(HierarchyError::UnknownRole(_))));
    }
}
