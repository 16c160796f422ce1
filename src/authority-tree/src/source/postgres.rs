//! PostgreSQL authority source

use crate::config::DatabaseTarget;
use crate::error::{HierarchyError, Result};
use crate::model::AuthorityFeatureKey;
use crate::source::AuthoritySource;
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::Row;
use std::time::Duration;
use tracing::{debug, info};

const AUTHORITY_FEATURE_KEY_QUERY: &str =
    "SELECT authority, feature_key FROM authority_feature_key";

/// Reads the `authority_feature_key` table
pub struct PostgresSource {
    pool: PgPool,
}

impl PostgresSource {
    /// Connect to a database target
    ///
    /// # Example
    /// ```no_run
    /// use cretoai_authority_tree::config::DatabaseTarget;
    /// use cretoai_authority_tree::source::{AuthoritySource, PostgresSource};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let target = DatabaseTarget::from_env("local")?;
    /// let source = PostgresSource::connect(&target).await?;
    /// let _roles = source.fetch().await?;
    /// source.close().await;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(target: &DatabaseTarget) -> Result<Self> {
        target.validate()?;

        let options = PgConnectOptions::new()
            .host(&target.host)
            .port(target.port)
            .username(&target.user)
            .password(&target.password)
            .database(&target.database);

        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await
            .map_err(|e| HierarchyError::Database(format!("Failed to connect to database: {}", e)))?;

        info!(url = %target.display_url(), "Connected to database");

        Ok(Self { pool })
    }

}

#[async_trait]
impl AuthoritySource for PostgresSource {
    async fn fetch_rows(&self) -> Result<Vec<AuthorityFeatureKey>> {
        let rows = sqlx::query(AUTHORITY_FEATURE_KEY_QUERY)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| HierarchyError::Database(format!("Failed to query authority feature keys: {}", e)))?;

        let mut result = Vec::with_capacity(rows.len());
        for row in rows {
            let authority: String = row
                .try_get("authority")
                .map_err(|e| HierarchyError::Database(format!("Failed to parse authority: {}", e)))?;
            let feature_key: String = row
                .try_get("feature_key")
                .map_err(|e| HierarchyError::Database(format!("Failed to parse feature key: {}", e)))?;

            result.push(AuthorityFeatureKey {
                authority,
                feature_key,
            });
        }

        info!(rows = result.len(), "Loaded authority rows from database");
        Ok(result)
    }

    async fn close(&self) {
        self.pool.close().await;
        debug!("Closed database pool");
    }
}
