//! Stub collaborators shared by unit tests.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{PermissionError, StoreError};
use crate::platform::{
    Advisory, AdvisorySink, Navigator, NotificationPermissions, PermissionStatus, Route,
};
use crate::store::{MemoryPreferenceStore, PreferenceStore};

/// Memory store with switchable read failures and per-key write failures.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryPreferenceStore,
    fail_reads: AtomicBool,
    failing_keys: Mutex<HashSet<String>>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inner(&self) -> &MemoryPreferenceStore {
        &self.inner
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes_to(&self, key: &str) {
        self.failing_keys.lock().unwrap().insert(key.to_string());
    }
}

#[async_trait]
impl PreferenceStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Read {
                key: key.to_string(),
                reason: "injected".to_string(),
            });
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.failing_keys.lock().unwrap().contains(key) {
            return Err(StoreError::Write {
                key: key.to_string(),
                reason: "injected".to_string(),
            });
        }
        self.inner.set(key, value).await
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn replace_route(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

#[derive(Default)]
pub struct RecordingAdvisories {
    shown: Mutex<Vec<Advisory>>,
}

impl RecordingAdvisories {
    pub fn shown(&self) -> Vec<Advisory> {
        self.shown.lock().unwrap().clone()
    }
}

impl AdvisorySink for RecordingAdvisories {
    fn show_advisory(&self, advisory: &Advisory) {
        self.shown.lock().unwrap().push(advisory.clone());
    }
}

/// Permission stub with a fixed current status and a fixed request outcome.
pub struct StubPermissions {
    current: Result<PermissionStatus, PermissionError>,
    on_request: Result<PermissionStatus, PermissionError>,
    requests: AtomicUsize,
}

impl StubPermissions {
    pub fn new(
        current: Result<PermissionStatus, PermissionError>,
        on_request: Result<PermissionStatus, PermissionError>,
    ) -> Self {
        Self {
            current,
            on_request,
            requests: AtomicUsize::new(0),
        }
    }

    /// Undetermined until asked, then whatever the user picks.
    pub fn answering(status: PermissionStatus) -> Self {
        Self::new(Ok(PermissionStatus::Undetermined), Ok(status))
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationPermissions for StubPermissions {
    async fn permission_status(&self) -> Result<PermissionStatus, PermissionError> {
        self.current.clone()
    }

    async fn request_permission(&self) -> Result<PermissionStatus, PermissionError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.on_request.clone()
    }
}
