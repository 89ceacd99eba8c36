//! Host Platform Seam
//!
//! The traits a host platform implements so the provider can hook into it,
//! plus [`LocalHost`], an in-process host used by tests and demos.
//!
//! ```text
//! host start ─▶ bootstrap(app) ─▶ InitRegistry ─▶ LifecycleBridge
//!                                                      │ register_lifecycle_callbacks
//!                                                      ▼
//! host screen transition ─▶ LifecycleCallbacks ─▶ LifecycleHub ─▶ subscribers
//! ```

mod local;

pub use local::LocalHost;

use crate::error::Result;
use crate::handle::ScreenHandle;
use std::sync::Arc;

/// The host's process-wide application object.
pub trait Application: Send + Sync + 'static {
    /// Human readable application name, used in logs.
    fn name(&self) -> &str;

    /// Register an observer for every screen transition the host produces.
    ///
    /// Registration spans the process lifetime; there is no unregister.
    fn register_lifecycle_callbacks(&self, callbacks: Arc<dyn LifecycleCallbacks>) -> Result<()>;
}

/// Native per-screen transition callbacks, invoked on the host's UI timeline.
pub trait LifecycleCallbacks: Send + Sync {
    fn on_screen_created(&self, screen: &ScreenHandle);

    fn on_screen_started(&self, screen: &ScreenHandle);

    fn on_screen_resumed(&self, screen: &ScreenHandle);

    fn on_screen_paused(&self, screen: &ScreenHandle);

    fn on_screen_stopped(&self, screen: &ScreenHandle);

    fn on_screen_destroyed(&self, screen: &ScreenHandle);

    /// The host is about to persist screen state. Most observers ignore it.
    fn on_screen_save_state(&self, _screen: &ScreenHandle) {}
}
