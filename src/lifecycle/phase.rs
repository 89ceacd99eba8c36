use crate::handle::{ScreenHandle, ScreenId, WeakScreen};
use chrono::{DateTime, Utc};
use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumIter};

/// One stage of a screen's lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Create,
    Start,
    Resume,
    Pause,
    Stop,
    Destroy,
}

/// A single screen transition as seen by the hub.
#[derive(Debug, Clone, Serialize)]
pub struct LifecycleEvent {
    pub screen_id: ScreenId,
    pub phase: Phase,
    /// Position of this event in the hub's event history, starting at 1
    pub sequence: u64,
    pub at: DateTime<Utc>,
    #[serde(skip)]
    screen: WeakScreen,
}

impl LifecycleEvent {
    pub(crate) fn new(sequence: u64, phase: Phase, screen: &ScreenHandle) -> Self {
        Self {
            screen_id: screen.id().clone(),
            phase,
            sequence,
            at: Utc::now(),
            screen: screen.downgrade(),
        }
    }

    /// The screen this event is about, if the host still holds it.
    pub fn screen(&self) -> Option<ScreenHandle> {
        self.screen.upgrade()
    }
}
