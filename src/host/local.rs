use super::{Application, LifecycleCallbacks};
use crate::error::Result;
use crate::handle::ScreenHandle;
use std::sync::{Arc, PoisonError, RwLock};

/// An in-process host that drives screen transitions on demand.
///
/// Callbacks are invoked in registration order on the calling thread, which
/// plays the role of the host's UI timeline.
///
/// # Example
///
/// ```rust
/// use app_provider::host::LocalHost;
/// use app_provider::ScreenHandle;
///
/// let host = LocalHost::new("demo");
/// let screen = ScreenHandle::new("main");
/// host.open(&screen);
/// host.close(&screen);
/// ```
pub struct LocalHost {
    name: String,
    callbacks: RwLock<Vec<Arc<dyn LifecycleCallbacks>>>,
}

impl LocalHost {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            callbacks: RwLock::new(Vec::new()),
        }
    }

    /// Number of registered callback objects
    pub fn callback_count(&self) -> usize {
        self.callbacks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn create(&self, screen: &ScreenHandle) {
        self.each(|cb| cb.on_screen_created(screen));
    }

    pub fn start(&self, screen: &ScreenHandle) {
        self.each(|cb| cb.on_screen_started(screen));
    }

    pub fn resume(&self, screen: &ScreenHandle) {
        self.each(|cb| cb.on_screen_resumed(screen));
    }

    pub fn pause(&self, screen: &ScreenHandle) {
        self.each(|cb| cb.on_screen_paused(screen));
    }

    pub fn stop(&self, screen: &ScreenHandle) {
        self.each(|cb| cb.on_screen_stopped(screen));
    }

    pub fn destroy(&self, screen: &ScreenHandle) {
        self.each(|cb| cb.on_screen_destroyed(screen));
    }

    pub fn save_state(&self, screen: &ScreenHandle) {
        self.each(|cb| cb.on_screen_save_state(screen));
    }

    /// Create, start and resume a screen.
    pub fn open(&self, screen: &ScreenHandle) {
        self.create(screen);
        self.start(screen);
        self.resume(screen);
    }

    /// Pause, stop and destroy a screen.
    pub fn close(&self, screen: &ScreenHandle) {
        self.pause(screen);
        self.stop(screen);
        self.destroy(screen);
    }

    fn each(&self, f: impl Fn(&dyn LifecycleCallbacks)) {
        // Snapshot so callbacks may register further observers.
        let callbacks = self
            .callbacks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for cb in &callbacks {
            f(cb.as_ref());
        }
    }
}

impl Application for LocalHost {
    fn name(&self) -> &str {
        &self.name
    }

    fn register_lifecycle_callbacks(&self, callbacks: Arc<dyn LifecycleCallbacks>) -> Result<()> {
        self.callbacks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(callbacks);
        tracing::debug!(host = %self.name, "Lifecycle callbacks registered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<&'static str>>,
    }

    impl Recorder {
        fn push(&self, what: &'static str) {
            self.seen.lock().unwrap().push(what);
        }
    }

    impl LifecycleCallbacks for Recorder {
        fn on_screen_created(&self, _: &ScreenHandle) {
            self.push("create");
        }
        fn on_screen_started(&self, _: &ScreenHandle) {
            self.push("start");
        }
        fn on_screen_resumed(&self, _: &ScreenHandle) {
            self.push("resume");
        }
        fn on_screen_paused(&self, _: &ScreenHandle) {
            self.push("pause");
        }
        fn on_screen_stopped(&self, _: &ScreenHandle) {
            self.push("stop");
        }
        fn on_screen_destroyed(&self, _: &ScreenHandle) {
            self.push("destroy");
        }
    }

    #[test]
    fn test_open_and_close_drive_all_phases_in_order() {
        let host = LocalHost::new("test");
        let recorder = Arc::new(Recorder::default());
        host.register_lifecycle_callbacks(recorder.clone()).unwrap();

        let screen = ScreenHandle::new(1u8);
        host.open(&screen);
        host.save_state(&screen);
        host.close(&screen);

        assert_eq!(host.callback_count(), 1);
        assert_eq!(
            *recorder.seen.lock().unwrap(),
            vec!["create", "start", "resume", "pause", "stop", "destroy"]
        );
    }
}
