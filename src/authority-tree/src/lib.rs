//! # CretoAI Authority Tree
//!
//! Derives the permission hierarchy among authorities from their flat
//! feature key sets, and renders it as a tree.
//!
//! ## Pipeline
//!
//! - **Model**: rows are grouped per authority, keys sorted and deduplicated
//! - **Subset order**: every authority dominates the authorities whose keys it
//!   fully contains
//! - **Reduction**: redundant transitive edges are removed, leaving the direct
//!   children (Hasse diagram)
//! - **Attribution**: each authority keeps only the keys none of its direct
//!   children grant
//! - **Output**: a branch-drawing tree from a root authority, optionally
//!   followed by a pairwise diff
//!
//! ## Example
//!
//! ```rust
//! use cretoai_authority_tree::{report, ReportOptions, RoleSet};
//!
//! # fn example() -> cretoai_authority_tree::Result<()> {
//! let roles = RoleSet::normalize(vec![
//!     ("ROLE_ADMIN".to_string(), vec!["a".to_string(), "b".to_string()]),
//!     ("ROLE_USER".to_string(), vec!["a".to_string()]),
//! ]);
//!
//! for line in report(&roles, &ReportOptions::default())? {
//!     println!("{}", line);
//! }
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod attribute;
pub mod config;
pub mod diff;
pub mod error;
pub mod hierarchy;
pub mod model;
pub mod order;
pub mod reduce;
pub mod render;
pub mod report;
pub mod source;

// Re-export commonly used types
pub use diff::DiffOrder;
pub use error::{HierarchyError, Result};
pub use hierarchy::{Hierarchy, TreeNode};
pub use model::{AuthorityFeatureKey, PermissionKey, RoleName, RoleSet, RoleSetBuilder};
pub use render::{render, Glyphs, RenderedTree};
pub use report::{report, ReportOptions};
pub use source::AuthoritySource;

/// Root authority used when none is given
pub const DEFAULT_ROOT_ROLE: &str = "ROLE_ADMIN";

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
