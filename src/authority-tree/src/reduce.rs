//! Transitive reduction of the dominance relation
//!
//! Each authority keeps only its *direct* children: dominated authorities that
//! are not already implied through another dominated authority. The result is
//! the covering relation (Hasse diagram) of the subset order.
//!
//! # Equal key sets
//!
//! Authorities with identical key sets dominate each other, which on its own
//! would let each one hide the other from every parent. Ties are broken by
//! declaration order: the earlier authority sits above the later one. The
//! earlier authority stays the direct child of the common parent and the
//! later one hangs beneath it. With this rule the direct-child relation is a
//! strict order, so every walk of the tree terminates.

use crate::error::{HierarchyError, Result};
use crate::model::{RoleName, RoleSet};
use crate::order::{dominates, Dominance};

/// Reduce the dominance list of `authority` to its direct children
///
/// A candidate is dropped when another candidate of the same list strictly
/// precedes it. Output keeps dominance list order.
///
/// # Errors
///
/// Returns [`HierarchyError::UnknownRole`] if `authority` is not part of
/// `roles` or has no dominance entry.
pub fn reduce_to_direct_children(
    authority: &str,
    roles: &RoleSet,
    dominance: &Dominance,
) -> Result<Vec<RoleName>> {
    let dominated = dominance
        .get(authority)
        .ok_or_else(|| HierarchyError::UnknownRole(authority.to_string()))?;

    // Equal-set authorities declared earlier sit above `authority`.
    let mut candidates = Vec::with_capacity(dominated.len());
    for candidate in dominated {
        if strictly_precedes(authority, candidate, roles, dominance)? {
            candidates.push(candidate.as_str());
        }
    }

    let mut direct = Vec::with_capacity(candidates.len());
    for &candidate in &candidates {
        let mut implied = false;
        for &other in &candidates {
            if other != candidate && strictly_precedes(other, candidate, roles, dominance)? {
                implied = true;
                break;
            }
        }

        if !implied {
            direct.push(candidate.to_string());
        }
    }

    Ok(direct)
}

/// Whether `upper` sits strictly above `lower` in the subset order
///
/// True when `upper` dominates `lower` and either their key sets differ or
/// `upper` is declared first.
pub fn strictly_precedes(
    upper: &str,
    lower: &str,
    roles: &RoleSet,
    dominance: &Dominance,
) -> Result<bool> {
    if !dominates(dominance, upper, lower) {
        return Ok(false);
    }

    let upper_keys = roles
        .keys(upper)
        .ok_or_else(|| HierarchyError::UnknownRole(upper.to_string()))?;
    let lower_keys = roles
        .keys(lower)
        .ok_or_else(|| HierarchyError::UnknownRole(lower.to_string()))?;

    if upper_keys != lower_keys {
        return Ok(true);
    }

    Ok(roles.position(upper) < roles.position(lower))
}
