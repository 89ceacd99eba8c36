//! Screen lifecycle listener traits
//!
//! One trait per phase, so a type can opt into exactly the transitions it
//! cares about. Every trait is also implemented for plain closures of the
//! shape `Fn(&ScreenHandle) -> ListenerResult`.
//!
//! Listeners run synchronously on the host's UI timeline and should return
//! quickly; hand long work off to a task.

use super::ListenerResult;
use crate::handle::ScreenHandle;

/// Called when the host creates a screen
///
/// # Example
///
/// ```rust
/// use app_provider::lifecycle::{ListenerResult, OnScreenCreated};
/// use app_provider::ScreenHandle;
///
/// struct Analytics;
///
/// impl OnScreenCreated for Analytics {
///     fn on_screen_created(&self, screen: &ScreenHandle) -> ListenerResult {
///         tracing::info!(screen = %screen.id(), "screen opened");
///         Ok(())
///     }
/// }
/// ```
pub trait OnScreenCreated: Send + Sync {
    fn on_screen_created(&self, screen: &ScreenHandle) -> ListenerResult;
}

/// Called when a screen becomes visible
pub trait OnScreenStarted: Send + Sync {
    fn on_screen_started(&self, screen: &ScreenHandle) -> ListenerResult;
}

/// Called when a screen reaches the foreground and accepts input
pub trait OnScreenResumed: Send + Sync {
    fn on_screen_resumed(&self, screen: &ScreenHandle) -> ListenerResult;
}

/// Called when a screen leaves the foreground
pub trait OnScreenPaused: Send + Sync {
    fn on_screen_paused(&self, screen: &ScreenHandle) -> ListenerResult;
}

/// Called when a screen is no longer visible
pub trait OnScreenStopped: Send + Sync {
    fn on_screen_stopped(&self, screen: &ScreenHandle) -> ListenerResult;
}

/// Called when the host tears a screen down
///
/// The handle is still valid for the duration of the call.
pub trait OnScreenDestroyed: Send + Sync {
    fn on_screen_destroyed(&self, screen: &ScreenHandle) -> ListenerResult;
}

impl<F> OnScreenCreated for F
where
    F: Fn(&ScreenHandle) -> ListenerResult + Send + Sync,
{
    fn on_screen_created(&self, screen: &ScreenHandle) -> ListenerResult {
        self(screen)
    }
}

impl<F> OnScreenStarted for F
where
    F: Fn(&ScreenHandle) -> ListenerResult + Send + Sync,
{
    fn on_screen_started(&self, screen: &ScreenHandle) -> ListenerResult {
        self(screen)
    }
}

impl<F> OnScreenResumed for F
where
    F: Fn(&ScreenHandle) -> ListenerResult + Send + Sync,
{
    fn on_screen_resumed(&self, screen: &ScreenHandle) -> ListenerResult {
        self(screen)
    }
}

impl<F> OnScreenPaused for F
where
    F: Fn(&ScreenHandle) -> ListenerResult + Send + Sync,
{
    fn on_screen_paused(&self, screen: &ScreenHandle) -> ListenerResult {
        self(screen)
    }
}

impl<F> OnScreenStopped for F
where
    F: Fn(&ScreenHandle) -> ListenerResult + Send + Sync,
{
    fn on_screen_stopped(&self, screen: &ScreenHandle) -> ListenerResult {
        self(screen)
    }
}

impl<F> OnScreenDestroyed for F
where
    F: Fn(&ScreenHandle) -> ListenerResult + Send + Sync,
{
    fn on_screen_destroyed(&self, screen: &ScreenHandle) -> ListenerResult {
        self(screen)
    }
}
