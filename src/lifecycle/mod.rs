//! Screen Lifecycle Module
//!
//! Tracks which screen is in the foreground and broadcasts every screen
//! transition to any number of independent subscribers.
//!
//! # Event flow
//!
//! ```text
//! host UI timeline
//!    ↓  LifecycleCallbacks
//! LifecycleBridge
//!    ↓  ping_*_listeners
//! LifecycleHub
//!    ├─ current screen slot (weak)  → current_screen / screen_stream
//!    ├─ latest event + broadcast    → lifecycle_events / only_resumed_distinct
//!    └─ six listener registries     → OnScreen* impls / listen_* streams
//! ```
//!
//! # Example
//!
//! ```rust
//! use app_provider::lifecycle::{LifecycleHub, ListenerResult, OnScreenResumed};
//! use app_provider::ScreenHandle;
//! use std::sync::Arc;
//!
//! let hub = LifecycleHub::new();
//! let listener: Arc<dyn OnScreenResumed> = Arc::new(|screen: &ScreenHandle| -> ListenerResult {
//!     println!("resumed {}", screen.id());
//!     Ok(())
//! });
//! hub.add_resumed_listener(Arc::clone(&listener));
//! hub.remove_resumed_listener(&listener);
//! ```

mod bridge;
mod error;
mod hub;
mod phase;
mod registry;
mod stream;
mod traits;

pub use bridge::LifecycleBridge;
pub use error::{ListenerError, ListenerResult};
pub use hub::LifecycleHub;
pub use phase::{LifecycleEvent, Phase};
pub use registry::ListenerRegistry;
pub use stream::ListenerStream;
pub use traits::{
    OnScreenCreated, OnScreenDestroyed, OnScreenPaused, OnScreenResumed, OnScreenStarted,
    OnScreenStopped,
};
