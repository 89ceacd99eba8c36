//! # App Provider
//!
//! Process-wide access to the running application and to the screen in the
//! foreground, without threading either through every constructor.
//!
//! ## Features
//!
//! - **Automatic capture**: `#[app_provider::main]` installs the host hook
//!   before any of `main`'s own code runs
//! - **Run-once init**: [`InitRegistry`] delivers the application handle to
//!   each listener exactly once, whenever it registers
//! - **Screen lifecycle hub**: six listener registries, a weakly tracked
//!   current screen, and replaying event streams
//! - **Leak-safe**: screens are never kept alive by the hub, and dropping a
//!   `listen_*` stream deregisters its listener
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use app_provider::host::LocalHost;
//! use app_provider::{LifecycleHub, ScreenHandle};
//!
//! #[app_provider::main(LocalHost::new("notes"))]
//! #[tokio::main]
//! async fn main() {
//!     let hub = LifecycleHub::global();
//!     tokio::spawn(async move {
//!         let screen = hub.wait_screen().await;
//!         tracing::info!(screen = %screen.id(), "first screen is up");
//!     });
//!
//!     // The host drives transitions from here on.
//!     let host = app_provider::application()
//!         .and_then(|app| app.downcast::<LocalHost>())
//!         .unwrap();
//!     host.open(&ScreenHandle::new("editor"));
//! }
//! ```

pub mod bootstrap;
pub mod config;
pub mod di;
pub mod error;
pub mod handle;
pub mod host;
pub mod lifecycle;

// Re-export core types
pub use bootstrap::{HostHook, InitRegistry, Initializer, bootstrap};
pub use config::{ConfigService, HubConfig};
pub use error::{ProviderError, Result};
pub use handle::{ApplicationHandle, ScreenHandle, ScreenId, WeakScreen};
pub use lifecycle::{LifecycleEvent, LifecycleHub, ListenerError, Phase};

// Re-export macros
pub use app_provider_macro::main;

/// The application handle, if the host hook has published it
pub fn application() -> Option<ApplicationHandle> {
    InitRegistry::global().application()
}

/// The current screen of the process-wide hub
pub fn current_screen() -> Option<ScreenHandle> {
    LifecycleHub::global().current_screen()
}

/// Prelude module for convenient imports
///
/// ```
/// use app_provider::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bootstrap::{HostHook, InitRegistry, Initializer, bootstrap};
    pub use crate::error::{ProviderError, Result};
    pub use crate::handle::{ApplicationHandle, ScreenHandle, ScreenId, WeakScreen};
    pub use crate::host::{Application, LifecycleCallbacks};
    pub use crate::lifecycle::{
        LifecycleEvent, LifecycleHub, ListenerError, ListenerResult, ListenerStream,
        OnScreenCreated, OnScreenDestroyed, OnScreenPaused, OnScreenResumed, OnScreenStarted,
        OnScreenStopped, Phase,
    };
    pub use std::sync::Arc;
}
