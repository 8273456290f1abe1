//! Typed access to the onboarding preferences.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::error::StoreError;
use crate::onboarding::model::AnswerSet;
use crate::store::traits::PreferenceStore;

/// Keys used for onboarding persistence.
pub mod preference_keys {
    /// Literal `"true"` once onboarding finished; absent before.
    pub const ONBOARDING_COMPLETE: &str = "onboarding_complete";
    /// JSON object mapping question id to chosen option.
    pub const ONBOARDING_ANSWERS: &str = "onboarding_answers";
}

const COMPLETE_VALUE: &str = "true";

/// Onboarding-specific view over a [`PreferenceStore`].
///
/// Every call is bounded by the optional timeout; expiry surfaces as
/// [`StoreError::Timeout`].
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn PreferenceStore>,
    timeout: Option<Duration>,
}

impl Preferences {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            store,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether the completion flag reads exactly `"true"`.
    pub async fn is_onboarding_complete(&self) -> Result<bool, StoreError> {
        let key = preference_keys::ONBOARDING_COMPLETE;
        let value = self.bounded(key, self.store.get(key)).await?;
        Ok(value.as_deref() == Some(COMPLETE_VALUE))
    }

    pub async fn set_onboarding_complete(&self) -> Result<(), StoreError> {
        let key = preference_keys::ONBOARDING_COMPLETE;
        self.bounded(key, self.store.set(key, COMPLETE_VALUE)).await
    }

    /// Stored answers, `None` if onboarding never saved any.
    pub async fn onboarding_answers(&self) -> Result<Option<AnswerSet>, StoreError> {
        let key = preference_keys::ONBOARDING_ANSWERS;
        match self.bounded(key, self.store.get(key)).await? {
            Some(raw) if !raw.is_empty() => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StoreError::Serialization(format!("{key}: {e}"))),
            _ => Ok(None),
        }
    }

    pub async fn save_onboarding_answers(&self, answers: &AnswerSet) -> Result<(), StoreError> {
        let key = preference_keys::ONBOARDING_ANSWERS;
        let raw =
            serde_json::to_string(answers).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.bounded(key, self.store.set(key, &raw)).await
    }

    async fn bounded<T>(
        &self,
        key: &str,
        op: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        match self.timeout {
            Some(after) => tokio::time::timeout(after, op)
                .await
                .map_err(|_| StoreError::Timeout {
                    key: key.to_string(),
                    after,
                })?,
            None => op.await,
        }
    }
}
