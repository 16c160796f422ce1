//! Subset order over permission sets
//!
//! For every authority `A`, its dominance list holds each other authority `B`
//! whose keys are all contained in `A`'s keys. Authorities with equal key sets
//! dominate each other.

use crate::model::{is_subset_sorted, RoleName, RoleSet};
use indexmap::IndexMap;

/// Authority -> authorities it dominates, both in declaration order
pub type Dominance = IndexMap<RoleName, Vec<RoleName>>;

/// Compute the dominance list of every authority
///
/// Runs in O(R² · K) for R authorities of K keys on average.
pub fn build_dominance(roles: &RoleSet) -> Dominance {
    roles
        .iter()
        .map(|(authority, keys)| {
            let dominated = roles
                .iter()
                .filter(|(other, other_keys)| {
                    *other != authority && is_subset_sorted(other_keys, keys)
                })
                .map(|(other, _)| other.to_string())
                .collect();

            (authority.to_string(), dominated)
        })
        .collect()
}

/// Whether `upper` dominates `lower`
pub fn dominates(dominance: &Dominance, upper: &str, lower: &str) -> bool {
    dominance
        .get(upper)
        .is_some_and(|dominated| dominated.iter().any(|name| name == lower))
}
