//! Role set model
//!
//! Normalizes raw `authority -> feature_key` data into per-authority sorted,
//! deduplicated key sequences. Authorities keep the order in which they were
//! first seen, which every later stage relies on for stable output.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Authority (role) name
pub type RoleName = String;

/// Opaque permission identifier
pub type PermissionKey = String;

/// One row of the `authority_feature_key` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityFeatureKey {
    /// Authority the key is granted to
    pub authority: RoleName,

    /// Granted feature key
    pub feature_key: PermissionKey,
}

impl AuthorityFeatureKey {
    /// Create a new row
    pub fn new(authority: impl Into<RoleName>, feature_key: impl Into<PermissionKey>) -> Self {
        Self {
            authority: authority.into(),
            feature_key: feature_key.into(),
        }
    }
}

/// Normalized, immutable mapping of authorities to their permission keys
///
/// Keys of every authority are sorted lexicographically with duplicates
/// removed. Iteration follows declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet {
    roles: IndexMap<RoleName, Vec<PermissionKey>>,
}

impl RoleSet {
    /// Normalize a raw mapping
    ///
    /// An authority listed more than once has its keys merged into the slot
    /// of its first occurrence.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cretoai_authority_tree::RoleSet;
    ///
    /// let roles = RoleSet::normalize(vec![
    ///     ("ROLE_ADMIN".to_string(), vec!["b".to_string(), "a".to_string(), "a".to_string()]),
    ///     ("ROLE_USER".to_string(), vec![]),
    /// ]);
    ///
    /// assert_eq!(roles.keys("ROLE_ADMIN").unwrap(), ["a", "b"]);
    /// assert_eq!(roles.names().collect::<Vec<_>>(), ["ROLE_ADMIN", "ROLE_USER"]);
    /// ```
    pub fn normalize<I, K>(raw: I) -> Self
    where
        I: IntoIterator<Item = (RoleName, K)>,
        K: IntoIterator<Item = PermissionKey>,
    {
        let mut builder = RoleSetBuilder::new();
        for (authority, keys) in raw {
            builder.extend_role(authority, keys);
        }
        builder.build()
    }

    /// Build a role set from table rows, in row order
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = AuthorityFeatureKey>,
    {
        let mut builder = RoleSetBuilder::new();
        for row in rows {
            builder.push(row.authority, row.feature_key);
        }
        builder.build()
    }

    /// Sorted keys of an authority
    pub fn keys(&self, authority: &str) -> Option<&[PermissionKey]> {
        self.roles.get(authority).map(Vec::as_slice)
    }

    /// Declaration index of an authority
    pub fn position(&self, authority: &str) -> Option<usize> {
        self.roles.get_index_of(authority)
    }

    /// Whether the authority is part of the set
    pub fn contains(&self, authority: &str) -> bool {
        self.roles.contains_key(authority)
    }

    /// Authority names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.roles.keys().map(String::as_str)
    }

    /// `(authority, keys)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PermissionKey])> {
        self.roles
            .iter()
            .map(|(name, keys)| (name.as_str(), keys.as_slice()))
    }

    /// Number of authorities
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Whether the set holds no authorities
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

/// Mutable accumulator for a [`RoleSet`]
///
/// Rows are appended one at a time; [`RoleSetBuilder::build`] freezes the
/// result, sorting and deduplicating every key sequence.
#[derive(Debug, Default)]
pub struct RoleSetBuilder {
    roles: IndexMap<RoleName, Vec<PermissionKey>>,
}

impl RoleSetBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single key to an authority, registering the authority if new
    pub fn push(&mut self, authority: impl Into<RoleName>, feature_key: impl Into<PermissionKey>) {
        self.roles
            .entry(authority.into())
            .or_default()
            .push(feature_key.into());
    }

    /// Register an authority and append all of its keys
    ///
    /// The authority is registered even when `keys` is empty.
    pub fn extend_role<K>(&mut self, authority: impl Into<RoleName>, keys: K)
    where
        K: IntoIterator<Item = PermissionKey>,
    {
        self.roles.entry(authority.into()).or_default().extend(keys);
    }

    /// Freeze into a normalized role set
    pub fn build(self) -> RoleSet {
        let roles = self
            .roles
            .into_iter()
            .map(|(authority, mut keys)| {
                keys.sort();
                keys.dedup();
                (authority, keys)
            })
            .collect();

        RoleSet { roles }
    }
}

/// Whether every key of `subset` appears in `superset`
///
/// Both slices must be sorted and deduplicated.
pub fn is_subset_sorted(subset: &[PermissionKey], superset: &[PermissionKey]) -> bool {
    if subset.len() > superset.len() {
        return false;
    }

    let mut candidates = superset.iter();
    subset
        .iter()
        .all(|key| candidates.by_ref().any(|candidate| candidate == key))
}
