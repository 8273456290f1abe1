//! libSQL backend — async `PreferenceStore` implementation.
//!
//! Supports local file and in-memory databases.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::info;

use crate::error::StoreError;
use crate::store::traits::PreferenceStore;

/// libSQL preference store.
///
/// Stores a single connection that is reused for all operations.
pub struct LibSqlPreferenceStore {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlPreferenceStore {
    /// Open (or create) a local database file and ensure the schema.
    pub async fn new_local(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Connection(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to open libSQL database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| StoreError::Connection(format!("Failed to create connection: {e}")))?;

        let store = Self {
            db: Arc::new(db),
            conn,
        };
        store.init_schema().await?;
        info!(path = %path.display(), "Preference store opened");
        Ok(store)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, StoreError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                StoreError::Connection(format!("Failed to create in-memory database: {e}"))
            })?;

        let conn = db
            .connect()
            .map_err(|e| StoreError::Connection(format!("Failed to create connection: {e}")))?;

        let store = Self {
            db: Arc::new(db),
            conn,
        };
        store.init_schema().await?;
        Ok(store)
    }

    /// Create the `preferences` table if it is missing.
    async fn init_schema(&self) -> Result<(), StoreError> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS preferences (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
                )",
                (),
            )
            .await
            .map_err(|e| StoreError::Schema(format!("Failed to create preferences table: {e}")))?;
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for LibSqlPreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let read_err = |e: libsql::Error| StoreError::Read {
            key: key.to_string(),
            reason: e.to_string(),
        };

        let mut rows = self
            .conn
            .query("SELECT value FROM preferences WHERE key = ?1", params![key])
            .await
            .map_err(read_err)?;

        match rows.next().await.map_err(read_err)? {
            Some(row) => Ok(Some(row.get::<String>(0).map_err(read_err)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let now = Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO preferences (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT (key) DO UPDATE SET value = ?2, updated_at = ?3",
                params![key, value, now],
            )
            .await
            .map_err(|e| StoreError::Write {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> LibSqlPreferenceStore {
        LibSqlPreferenceStore::new_memory().await.unwrap()
    }

    #[tokio::test]
    async fn preferences_crud() {
        let store = test_store().await;

        store.set("onboarding_complete", "true").await.unwrap();
        let fetched = store.get("onboarding_complete").await.unwrap();
        assert_eq!(fetched.as_deref(), Some("true"));

        // Upsert
        store.set("onboarding_complete", "false").await.unwrap();
        let fetched = store.get("onboarding_complete").await.unwrap();
        assert_eq!(fetched.as_deref(), Some("false"));
    }

    #[tokio::test]
    async fn schema_init_is_idempotent() {
        let store = test_store().await;
        store.set("k", "v").await.unwrap();
        store.init_schema().await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn preferences_get_nonexistent() {
        let store = test_store().await;
        assert!(store.get("nothing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn values_stored_verbatim() {
        let store = test_store().await;
        let raw = r#"{"dreamGoals":"Visit a person or place"}"#;
        store.set("onboarding_answers", raw).await.unwrap();
        assert_eq!(store.get("onboarding_answers").await.unwrap().as_deref(), Some(raw));
    }

    #[tokio::test]
    async fn file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/prefs.db");

        {
            let store = LibSqlPreferenceStore::new_local(&path).await.unwrap();
            store.set("k", "v").await.unwrap();
        }

        let reopened = LibSqlPreferenceStore::new_local(&path).await.unwrap();
        assert_eq!(reopened.get("k").await.unwrap().as_deref(), Some("v"));
    }
}
