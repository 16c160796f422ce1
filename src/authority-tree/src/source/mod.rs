//! Authority sources
//!
//! A source delivers the complete `authority -> feature_key` data before any
//! analysis starts. Failures are returned as-is; nothing is retried.

use crate::error::Result;
use crate::model::{AuthorityFeatureKey, RoleSet};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::PostgresSource;

/// Provider of the raw authority data
#[async_trait]
pub trait AuthoritySource: Send + Sync {
    /// Fetch every row, in source order
    async fn fetch_rows(&self) -> Result<Vec<AuthorityFeatureKey>>;

    /// Fetch and normalize into a role set
    async fn fetch(&self) -> Result<RoleSet> {
        let rows = self.fetch_rows().await?;
        let roles = RoleSet::from_rows(rows);
        debug!(authorities = roles.len(), "Normalized authority rows");
        Ok(roles)
    }

    /// Release connections held by the source
    async fn close(&self) {}
}

/// In-memory rows
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    rows: Vec<AuthorityFeatureKey>,
}

impl StaticSource {
    /// Create a source over the given rows
    pub fn new(rows: Vec<AuthorityFeatureKey>) -> Self {
        Self { rows }
    }

    /// Create a source from `(authority, keys)` pairs
    pub fn from_mapping<A, K>(mapping: Vec<(A, Vec<K>)>) -> Self
    where
        A: Into<String>,
        K: Into<String>,
    {
        let mut rows = Vec::new();
        for (authority, keys) in mapping {
            let authority = authority.into();
            rows.extend(
                keys.into_iter()
                    .map(|key| AuthorityFeatureKey::new(authority.clone(), key)),
            );
        }
        Self { rows }
    }
}

#[async_trait]
impl AuthoritySource for StaticSource {
    async fn fetch_rows(&self) -> Result<Vec<AuthorityFeatureKey>> {
        Ok(self.rows.clone())
    }
}

/// JSON file holding an array of `{"authority": .., "feature_key": ..}` rows
#[derive(Debug, Clone)]
pub struct JsonRowsSource {
    path: PathBuf,
}

impl JsonRowsSource {
    /// Create a source reading from `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the rows file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AuthoritySource for JsonRowsSource {
    async fn fetch_rows(&self) -> Result<Vec<AuthorityFeatureKey>> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        let rows: Vec<AuthorityFeatureKey> = serde_json::from_str(&contents)?;

        info!(path = %self.path.display(), rows = rows.len(), "Loaded authority rows");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HierarchyError;

    #[tokio::test]
    async fn test_static_source_from_mapping() {
        let source = StaticSource::from_mapping(vec![
            ("ROLE_ADMIN", vec!["b", "a"]),
            ("ROLE_GUEST", vec![]),
        ]);

        let rows = source.fetch_rows().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], AuthorityFeatureKey::new("ROLE_ADMIN", "b"));

        // authorities without rows cannot be represented
        let roles = source.fetch().await.unwrap();
        assert_eq!(roles.len(), 1);
        assert_eq!(roles.keys("ROLE_ADMIN").unwrap(), ["a", "b"]);
    }

    #[tokio::test]
    async fn test_json_rows_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        std::fs::write(
            &path,
            r#"[
                {"authority": "ROLE_USER", "feature_key": "read"},
                {"authority": "ROLE_ADMIN", "feature_key": "write"},
                {"authority": "ROLE_ADMIN", "feature_key": "read"}
            ]"#,
        )
        .unwrap();

        let source = JsonRowsSource::new(&path);
        let roles = source.fetch().await.unwrap();

        assert_eq!(roles.names().collect::<Vec<_>>(), vec!["ROLE_USER", "ROLE_ADMIN"]);
        assert_eq!(roles.keys("ROLE_ADMIN").unwrap(), ["read", "write"]);
    }

    #[tokio::test]
    async fn test_json_rows_source_missing_file() {
        let source = JsonRowsSource::new("/nonexistent/rows.json");
        let result = source.fetch().await;

        assert!(matches!(result, Err(HierarchyError::Io(_))));
    }

    #[tokio::test]
    async fn test_json_rows_source_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        std::fs::write(&path, r#"{"ROLE_ADMIN": ["a"]}"#).unwrap();

        let result = JsonRowsSource::new(&path).fetch().await;
        assert!(matches!(result, Err(HierarchyError::Json(_))));
    }

    #[tokio::test]
    async fn test_close_after_fetch() {
        let source: Box<dyn AuthoritySource> =
            Box::new(StaticSource::from_mapping(vec![("ROLE_ADMIN", vec!["a"])]));

        let roles = source.fetch().await.unwrap();
        source.close().await;

        assert_eq!(roles.len(), 1);
    }
}
