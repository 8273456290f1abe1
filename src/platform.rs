//! Platform collaborators — navigation, notification permissions, and
//! user-visible advisories.
//!
//! The core never renders anything. It calls these traits and the
//! presentation layer decides what they look like.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PermissionError;

/// Top-level destinations the core can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// The questionnaire.
    Onboarding,
    /// The tabbed app, opened on the methods screen.
    Main,
}

impl Route {
    /// Router path for this destination.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Onboarding => "/onboarding",
            Self::Main => "/(tabs)/methods",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Replaces the current screen. There is no push and no back stack entry.
pub trait Navigator: Send + Sync {
    fn replace_route(&self, route: Route);
}

/// Notification permission as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// The user has not been asked yet.
    Undetermined,
}

#[async_trait]
pub trait NotificationPermissions: Send + Sync {
    async fn permission_status(&self) -> Result<PermissionStatus, PermissionError>;

    /// Prompt the user. Platforms may answer without prompting if the user
    /// already decided.
    async fn request_permission(&self) -> Result<PermissionStatus, PermissionError>;
}

/// A dismissable, non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    pub title: String,
    pub message: String,
}

impl Advisory {
    /// Shown when reminders were requested but notifications stay disabled.
    pub fn notifications_disabled() -> Self {
        Self {
            title: "Permission Required".to_string(),
            message: "Please enable notifications in your device settings to receive reminders."
                .to_string(),
        }
    }
}

pub trait AdvisorySink: Send + Sync {
    fn show_advisory(&self, advisory: &Advisory);
}
