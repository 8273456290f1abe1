//! Launch routing — picks the first screen once per app start.

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::platform::{Navigator, Route};
use crate::store::Preferences;

/// Decides between onboarding and the main app on startup.
///
/// Until [`launch`](Self::launch) resolves, [`decided_route`](Self::decided_route)
/// is `None` and the presentation layer should show a loading indicator.
pub struct LaunchRouter {
    preferences: Preferences,
    decided: OnceCell<Route>,
}

impl LaunchRouter {
    pub fn new(preferences: Preferences) -> Self {
        Self {
            preferences,
            decided: OnceCell::new(),
        }
    }

    /// Read the completion flag and map it to a route.
    ///
    /// An unreadable flag counts as "not onboarded".
    pub async fn decide_initial_route(&self) -> Route {
        match self.preferences.is_onboarding_complete().await {
            Ok(true) => Route::Main,
            Ok(false) => Route::Onboarding,
            Err(e) => {
                warn!(error = %e, "Failed to read onboarding status, routing to onboarding");
                Route::Onboarding
            }
        }
    }

    /// Decide the initial route and navigate to it.
    ///
    /// Navigation happens on the first call only; later calls return the
    /// same route without touching the store or the navigator.
    pub async fn launch(&self, navigator: &dyn Navigator) -> Route {
        *self
            .decided
            .get_or_init(|| async {
                let route = self.decide_initial_route().await;
                info!(route = %route, "Initial route decided");
                navigator.replace_route(route);
                route
            })
            .await
    }

    /// The route chosen by [`launch`](Self::launch), if it has resolved.
    pub fn decided_route(&self) -> Option<Route> {
        self.decided.get().copied()
    }
}
