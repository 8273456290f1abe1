//! `PreferenceStore` trait — async string key-value persistence.

use async_trait::async_trait;

use crate::error::StoreError;

/// Backend-agnostic preference store.
///
/// Values are opaque strings. There are no guarantees across keys: two
/// `set` calls are two independent writes.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Read a value. `Ok(None)` when the key was never written.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Insert or overwrite a value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
