//! Handles to the application object and to screens.
//!
//! The application handle is strong and lives for the whole process. Screen
//! handles are strong too, but the hub only ever keeps the [`WeakScreen`]
//! produced by [`ScreenHandle::downgrade`], so a screen torn down by the host
//! can never be kept alive by lifecycle bookkeeping.

mod application;
mod screen;

pub use application::ApplicationHandle;
pub use screen::{ScreenHandle, ScreenId, WeakScreen};
