//! Host Lifecycle Bridge
//!
//! Forwards the host's native screen callbacks into a [`LifecycleHub`].

use super::LifecycleHub;
use crate::bootstrap::InitRegistry;
use crate::error::Result;
use crate::handle::{ApplicationHandle, ScreenHandle};
use crate::host::LifecycleCallbacks;
use std::sync::Arc;

/// Native lifecycle observer that feeds a hub.
pub struct LifecycleBridge {
    hub: LifecycleHub,
}

impl LifecycleBridge {
    pub fn new(hub: LifecycleHub) -> Self {
        Self { hub }
    }

    /// Register a bridge for `hub` with the application's host.
    pub fn attach(hub: LifecycleHub, application: &ApplicationHandle) -> Result<()> {
        application.register_lifecycle_callbacks(Arc::new(Self::new(hub)))?;
        tracing::info!(
            application = application.name(),
            "Screen lifecycle bridge attached"
        );
        Ok(())
    }

    /// Attach a bridge for `hub` as soon as `registry` publishes the
    /// application handle, or right away if it already has.
    ///
    /// A host refusing the registration is logged; it does not reach the host.
    pub fn install(registry: &InitRegistry, hub: LifecycleHub) {
        registry.listen(move |application| {
            if let Err(e) = Self::attach(hub, application) {
                tracing::error!(
                    application = application.name(),
                    "Failed to attach lifecycle bridge: {}",
                    e
                );
            }
        });
    }
}

impl LifecycleCallbacks for LifecycleBridge {
    fn on_screen_created(&self, screen: &ScreenHandle) {
        self.hub.ping_created_listeners(screen);
    }

    fn on_screen_started(&self, screen: &ScreenHandle) {
        self.hub.ping_started_listeners(screen);
    }

    fn on_screen_resumed(&self, screen: &ScreenHandle) {
        self.hub.ping_resumed_listeners(screen);
    }

    fn on_screen_paused(&self, screen: &ScreenHandle) {
        self.hub.ping_paused_listeners(screen);
    }

    fn on_screen_stopped(&self, screen: &ScreenHandle) {
        self.hub.ping_stopped_listeners(screen);
    }

    fn on_screen_destroyed(&self, screen: &ScreenHandle) {
        self.hub.ping_destroyed_listeners(screen);
    }
}
