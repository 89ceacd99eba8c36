//! Lifecycle Hub
//!
//! Fans every screen transition out to the per-phase listener registries and
//! to the reactive views built on top of them.

use super::registry::ListenerRegistry;
use super::stream::{ListenerStream, Subscription};
use super::{
    LifecycleEvent, ListenerError, ListenerResult, OnScreenCreated, OnScreenDestroyed,
    OnScreenPaused, OnScreenResumed, OnScreenStarted, OnScreenStopped, Phase,
};
use crate::config::{ConfigService, HubConfig};
use crate::error::{ProviderError, Result};
use crate::handle::{ScreenHandle, ScreenId, WeakScreen};
use futures::future;
use futures::stream::{self, BoxStream, StreamExt};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch};
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::{BroadcastStream, WatchStream};

static GLOBAL_HUB: LazyLock<LifecycleHub> =
    LazyLock::new(|| LifecycleHub::with_config(HubConfig::from_config(&ConfigService::new())));

/// Distributes screen lifecycle events to listeners and streams.
///
/// `LifecycleHub` is a cheap-clone handle; clones share the same registries
/// and state. Use [`LifecycleHub::global`] for the process-wide hub fed by
/// the host, or [`LifecycleHub::new`] for an isolated one.
///
/// # Current screen
///
/// The hub tracks the current screen through a weak reference only. A
/// RESUME makes its screen current unless it already is. A CREATE only
/// fills the slot when nothing live occupies it, so a screen being built
/// behind the foreground does not displace it before it resumes.
///
/// As a result, a CREATE does not always make its screen current:
/// right after CREATE(B) while A is current and alive, `current_screen()`
/// still returns A. A replace-on-every-CREATE policy would return B here.
///
/// # Example
///
/// ```rust,ignore
/// use app_provider::LifecycleHub;
/// use futures::StreamExt;
///
/// let hub = LifecycleHub::global();
/// let mut changes = hub.only_resumed_distinct();
/// while let Some(event) = changes.next().await {
///     tracing::info!(screen = %event.screen_id, "now in foreground");
/// }
/// ```
#[derive(Clone)]
pub struct LifecycleHub {
    inner: Arc<HubInner>,
}

struct HubInner {
    config: HubConfig,
    created: Arc<ListenerRegistry<dyn OnScreenCreated>>,
    started: Arc<ListenerRegistry<dyn OnScreenStarted>>,
    resumed: Arc<ListenerRegistry<dyn OnScreenResumed>>,
    paused: Arc<ListenerRegistry<dyn OnScreenPaused>>,
    stopped: Arc<ListenerRegistry<dyn OnScreenStopped>>,
    destroyed: Arc<ListenerRegistry<dyn OnScreenDestroyed>>,
    current: watch::Sender<Option<WeakScreen>>,
    events: Mutex<EventLog>,
    event_tx: broadcast::Sender<LifecycleEvent>,
    faults: AtomicU64,
}

#[derive(Default)]
struct EventLog {
    latest: Option<LifecycleEvent>,
    sequence: u64,
}

impl Default for LifecycleHub {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleHub {
    pub fn new() -> Self {
        Self::with_config(HubConfig::default())
    }

    pub fn with_config(config: HubConfig) -> Self {
        let (current, _) = watch::channel(None);
        let (event_tx, _) = broadcast::channel(config.event_buffer.max(1));
        Self {
            inner: Arc::new(HubInner {
                config,
                created: Arc::default(),
                started: Arc::default(),
                resumed: Arc::default(),
                paused: Arc::default(),
                stopped: Arc::default(),
                destroyed: Arc::default(),
                current,
                events: Mutex::new(EventLog::default()),
                event_tx,
                faults: AtomicU64::new(0),
            }),
        }
    }

    /// The process-wide hub, configured from the environment on first use
    pub fn global() -> &'static LifecycleHub {
        &GLOBAL_HUB
    }

    pub fn config(&self) -> &HubConfig {
        &self.inner.config
    }

    pub fn add_created_listener(&self, listener: Arc<dyn OnScreenCreated>) {
        self.inner.created.add(listener);
    }

    pub fn remove_created_listener(&self, listener: &Arc<dyn OnScreenCreated>) -> bool {
        self.inner.created.remove(listener)
    }

    pub fn add_started_listener(&self, listener: Arc<dyn OnScreenStarted>) {
        self.inner.started.add(listener);
    }

    pub fn remove_started_listener(&self, listener: &Arc<dyn OnScreenStarted>) -> bool {
        self.inner.started.remove(listener)
    }

    pub fn add_resumed_listener(&self, listener: Arc<dyn OnScreenResumed>) {
        self.inner.resumed.add(listener);
    }

    pub fn remove_resumed_listener(&self, listener: &Arc<dyn OnScreenResumed>) -> bool {
        self.inner.resumed.remove(listener)
    }

    pub fn add_paused_listener(&self, listener: Arc<dyn OnScreenPaused>) {
        self.inner.paused.add(listener);
    }

    pub fn remove_paused_listener(&self, listener: &Arc<dyn OnScreenPaused>) -> bool {
        self.inner.paused.remove(listener)
    }

    pub fn add_stopped_listener(&self, listener: Arc<dyn OnScreenStopped>) {
        self.inner.stopped.add(listener);
    }

    pub fn remove_stopped_listener(&self, listener: &Arc<dyn OnScreenStopped>) -> bool {
        self.inner.stopped.remove(listener)
    }

    pub fn add_destroyed_listener(&self, listener: Arc<dyn OnScreenDestroyed>) {
        self.inner.destroyed.add(listener);
    }

    pub fn remove_destroyed_listener(&self, listener: &Arc<dyn OnScreenDestroyed>) -> bool {
        self.inner.destroyed.remove(listener)
    }

    pub(crate) fn ping_created_listeners(&self, screen: &ScreenHandle) {
        self.dispatch(Phase::Create, screen, &self.inner.created, |l, s| {
            l.on_screen_created(s)
        });
    }

    pub(crate) fn ping_started_listeners(&self, screen: &ScreenHandle) {
        self.dispatch(Phase::Start, screen, &self.inner.started, |l, s| {
            l.on_screen_started(s)
        });
    }

    pub(crate) fn ping_resumed_listeners(&self, screen: &ScreenHandle) {
        self.dispatch(Phase::Resume, screen, &self.inner.resumed, |l, s| {
            l.on_screen_resumed(s)
        });
    }

    pub(crate) fn ping_paused_listeners(&self, screen: &ScreenHandle) {
        self.dispatch(Phase::Pause, screen, &self.inner.paused, |l, s| {
            l.on_screen_paused(s)
        });
    }

    pub(crate) fn ping_stopped_listeners(&self, screen: &ScreenHandle) {
        self.dispatch(Phase::Stop, screen, &self.inner.stopped, |l, s| {
            l.on_screen_stopped(s)
        });
    }

    pub(crate) fn ping_destroyed_listeners(&self, screen: &ScreenHandle) {
        self.dispatch(Phase::Destroy, screen, &self.inner.destroyed, |l, s| {
            l.on_screen_destroyed(s)
        });
    }

    /// The current screen, or `None` if none was set or the host dropped it.
    pub fn current_screen(&self) -> Option<ScreenHandle> {
        self.inner
            .current
            .borrow()
            .as_ref()
            .and_then(WeakScreen::upgrade)
    }

    /// Wait until a live current screen exists.
    ///
    /// Never resolves if no screen is ever created or resumed.
    pub async fn wait_screen(&self) -> ScreenHandle {
        let mut current = self.inner.current.subscribe();
        loop {
            let screen = current
                .borrow_and_update()
                .as_ref()
                .and_then(WeakScreen::upgrade);
            if let Some(screen) = screen {
                return screen;
            }
            if current.changed().await.is_err() {
                // The sender lives in `self`; unreachable while borrowed.
                return future::pending().await;
            }
        }
    }

    pub async fn wait_screen_timeout(&self, timeout: Duration) -> Result<ScreenHandle> {
        tokio::time::timeout(timeout, self.wait_screen())
            .await
            .map_err(|_| ProviderError::timeout("a current screen", timeout))
    }

    /// The current screen now, then on every change.
    ///
    /// Slots whose screen has already been dropped are skipped.
    pub fn screen_stream(&self) -> BoxStream<'static, ScreenHandle> {
        WatchStream::new(self.inner.current.subscribe())
            .filter_map(|slot| future::ready(slot.and_then(|weak| weak.upgrade())))
            .boxed()
    }

    /// The most recent event, if any
    pub fn last_event(&self) -> Option<LifecycleEvent> {
        self.lock_events().latest.clone()
    }

    /// The most recent event now, then every later event.
    ///
    /// A subscriber that falls more than `event_buffer` events behind skips
    /// the overflow.
    pub fn lifecycle_events(&self) -> BoxStream<'static, LifecycleEvent> {
        let (replay, receiver) = {
            let log = self.lock_events();
            (log.latest.clone(), self.inner.event_tx.subscribe())
        };

        let live = BroadcastStream::new(receiver).filter_map(|item| {
            future::ready(match item {
                Ok(event) => Some(event),
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Lifecycle event subscriber lagged");
                    None
                }
            })
        });

        stream::iter(replay).chain(live).boxed()
    }

    /// RESUME events, without consecutive repeats of the same screen.
    pub fn only_resumed_distinct(&self) -> BoxStream<'static, LifecycleEvent> {
        let events = self.lifecycle_events();
        async_stream::stream! {
            let mut previous: Option<ScreenId> = None;
            for await event in events {
                if event.phase != Phase::Resume || previous.as_ref() == Some(&event.screen_id) {
                    continue;
                }
                previous = Some(event.screen_id.clone());
                yield event;
            }
        }
        .boxed()
    }

    pub fn listen_created(&self) -> ListenerStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let listener: Arc<dyn OnScreenCreated> = Arc::new(forward(tx));
        attach(&self.inner.created, listener, rx)
    }

    pub fn listen_started(&self) -> ListenerStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let listener: Arc<dyn OnScreenStarted> = Arc::new(forward(tx));
        attach(&self.inner.started, listener, rx)
    }

    pub fn listen_resumed(&self) -> ListenerStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let listener: Arc<dyn OnScreenResumed> = Arc::new(forward(tx));
        attach(&self.inner.resumed, listener, rx)
    }

    pub fn listen_paused(&self) -> ListenerStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let listener: Arc<dyn OnScreenPaused> = Arc::new(forward(tx));
        attach(&self.inner.paused, listener, rx)
    }

    pub fn listen_stopped(&self) -> ListenerStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let listener: Arc<dyn OnScreenStopped> = Arc::new(forward(tx));
        attach(&self.inner.stopped, listener, rx)
    }

    pub fn listen_destroyed(&self) -> ListenerStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let listener: Arc<dyn OnScreenDestroyed> = Arc::new(forward(tx));
        attach(&self.inner.destroyed, listener, rx)
    }

    /// Number of listeners registered for `phase`, stream-backed ones included
    pub fn listener_count(&self, phase: Phase) -> usize {
        match phase {
            Phase::Create => self.inner.created.len(),
            Phase::Start => self.inner.started.len(),
            Phase::Resume => self.inner.resumed.len(),
            Phase::Pause => self.inner.paused.len(),
            Phase::Stop => self.inner.stopped.len(),
            Phase::Destroy => self.inner.destroyed.len(),
        }
    }

    /// Listener failures contained since the hub was created
    pub fn listener_faults(&self) -> u64 {
        self.inner.faults.load(Ordering::Relaxed)
    }

    fn dispatch<L: ?Sized>(
        &self,
        phase: Phase,
        screen: &ScreenHandle,
        registry: &ListenerRegistry<L>,
        deliver: impl Fn(&L, &ScreenHandle) -> ListenerResult,
    ) {
        // Streams and the current slot move first so listeners observe them up to date.
        match phase {
            Phase::Create => self.offer_current(screen, false),
            Phase::Resume => self.offer_current(screen, true),
            _ => {}
        }
        self.record(phase, screen);

        let listeners = registry.snapshot();
        tracing::debug!(
            %phase,
            screen = %screen.id(),
            listeners = listeners.len(),
            "Delivering lifecycle event"
        );

        for listener in &listeners {
            let outcome = catch_unwind(AssertUnwindSafe(|| deliver(listener.as_ref(), screen)))
                .unwrap_or_else(|payload| Err(ListenerError::from_panic(payload)));

            if let Err(e) = outcome {
                self.inner.faults.fetch_add(1, Ordering::Relaxed);
                tracing::error!(%phase, screen = %screen.id(), "Lifecycle listener failed: {}", e);
            }
        }
    }

    fn offer_current(&self, screen: &ScreenHandle, replace_live: bool) {
        let changed = self.inner.current.send_if_modified(|slot| {
            let keep = match slot {
                Some(occupant) if occupant.refers_to(screen) => true,
                Some(occupant) => !replace_live && occupant.is_alive(),
                None => false,
            };
            if !keep {
                *slot = Some(screen.downgrade());
            }
            !keep
        });

        if changed {
            tracing::debug!(screen = %screen.id(), "Current screen changed");
        }
    }

    fn record(&self, phase: Phase, screen: &ScreenHandle) {
        let mut log = self.lock_events();
        log.sequence += 1;
        let event = LifecycleEvent::new(log.sequence, phase, screen);
        log.latest = Some(event.clone());
        // Sent under the lock so a new subscriber sees either the replay or the send, never both.
        let _ = self.inner.event_tx.send(event);
    }

    fn lock_events(&self) -> std::sync::MutexGuard<'_, EventLog> {
        self.inner
            .events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn forward(
    sender: mpsc::UnboundedSender<ScreenHandle>,
) -> impl Fn(&ScreenHandle) -> ListenerResult + Send + Sync + 'static {
    move |screen: &ScreenHandle| -> ListenerResult {
        // The receiving stream may already be gone; its subscription removes us shortly.
        let _ = sender.send(screen.clone());
        Ok(())
    }
}

fn attach<L>(
    registry: &Arc<ListenerRegistry<L>>,
    listener: Arc<L>,
    receiver: mpsc::UnboundedReceiver<ScreenHandle>,
) -> ListenerStream
where
    L: ?Sized + Send + Sync + 'static,
{
    registry.add(Arc::clone(&listener));
    let registry = Arc::clone(registry);
    ListenerStream::new(
        receiver,
        Subscription::new(move || {
            registry.remove(&listener);
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use tokio::time::timeout;

    struct Screen(&'static str);

    async fn next<S: futures::Stream + Unpin>(stream: &mut S) -> S::Item {
        timeout(Duration::from_secs(1), stream.next())
            .await
            .expect("stream stalled")
            .expect("stream ended")
    }

    async fn assert_quiet<S: futures::Stream + Unpin>(stream: &mut S) {
        assert!(
            timeout(Duration::from_millis(50), stream.next())
                .await
                .is_err()
        );
    }

    fn counting_created(count: &Arc<AtomicUsize>) -> Arc<dyn OnScreenCreated> {
        let count = Arc::clone(count);
        Arc::new(move |_: &ScreenHandle| -> ListenerResult {
            count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    #[test]
    fn test_created_listener_add_then_remove() {
        let hub = LifecycleHub::new();
        let count = Arc::new(AtomicUsize::new(0));
        let listener = counting_created(&count);

        hub.add_created_listener(Arc::clone(&listener));
        hub.ping_created_listeners(&ScreenHandle::new(Screen("a")));
        assert_eq!(count.load(Ordering::SeqCst), 1);

        assert!(hub.remove_created_listener(&listener));
        hub.ping_created_listeners(&ScreenHandle::new(Screen("b")));
        assert_eq!(count.load(Ordering::SeqCst), 1);

        assert!(!hub.remove_created_listener(&listener));
    }

    #[test]
    fn test_listener_receives_the_pinged_screen() {
        let hub = LifecycleHub::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let listener: Arc<dyn OnScreenPaused> =
            Arc::new(move |screen: &ScreenHandle| -> ListenerResult {
                sink.lock().unwrap().push(screen.clone());
                Ok(())
            });
        hub.add_paused_listener(listener);

        let a = ScreenHandle::new(Screen("a"));
        hub.ping_paused_listeners(&a);
        hub.ping_resumed_listeners(&a);

        assert_eq!(*seen.lock().unwrap(), vec![a]);
    }

    #[test]
    fn test_duplicate_registration_delivers_twice() {
        let hub = LifecycleHub::new();
        let count = Arc::new(AtomicUsize::new(0));
        let listener = counting_created(&count);

        hub.add_created_listener(Arc::clone(&listener));
        hub.add_created_listener(Arc::clone(&listener));
        hub.ping_created_listeners(&ScreenHandle::new(Screen("a")));

        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(hub.listener_count(Phase::Create), 2);
    }

    #[test]
    fn test_current_screen_is_weak() {
        let hub = LifecycleHub::new();
        assert!(hub.current_screen().is_none());

        let a = ScreenHandle::new(Screen("a"));
        hub.ping_created_listeners(&a);
        assert_eq!(hub.current_screen(), Some(a.clone()));

        drop(a);
        assert!(hub.current_screen().is_none());
    }

    #[test]
    fn test_current_screen_progression() {
        let hub = LifecycleHub::new();
        let a = ScreenHandle::new(Screen("a"));
        let b = ScreenHandle::new(Screen("b"));

        let steps: [(fn(&LifecycleHub, &ScreenHandle), &ScreenHandle); 6] = [
            (LifecycleHub::ping_created_listeners, &a),
            (LifecycleHub::ping_started_listeners, &a),
            (LifecycleHub::ping_resumed_listeners, &a),
            (LifecycleHub::ping_paused_listeners, &a),
            (LifecycleHub::ping_created_listeners, &b),
            (LifecycleHub::ping_resumed_listeners, &b),
        ];

        let mut progression = Vec::new();
        for (ping, screen) in steps {
            ping(&hub, screen);
            let current = hub.current_screen().expect("a screen is current");
            progression.push(current.downcast_ref::<Screen>().map(|s| s.0));
        }

        let expected: Vec<Option<&str>> =
            ["a", "a", "a", "a", "a", "b"].into_iter().map(Some).collect();
        assert_eq!(progression, expected);
    }

    #[test]
    fn test_create_replaces_stale_occupant() {
        let hub = LifecycleHub::new();
        let a = ScreenHandle::new(Screen("a"));
        hub.ping_resumed_listeners(&a);
        drop(a);

        let b = ScreenHandle::new(Screen("b"));
        hub.ping_created_listeners(&b);
        assert_eq!(hub.current_screen(), Some(b));
    }

    #[test]
    fn test_resuming_current_screen_does_not_republish() {
        let hub = LifecycleHub::new();
        let mut current = hub.inner.current.subscribe();
        let a = ScreenHandle::new(Screen("a"));

        hub.ping_resumed_listeners(&a);
        assert!(current.has_changed().unwrap());
        current.borrow_and_update();

        hub.ping_resumed_listeners(&a);
        hub.ping_created_listeners(&a);
        assert!(!current.has_changed().unwrap());
    }

    #[test]
    fn test_listener_sees_current_screen_up_to_date() {
        let hub = LifecycleHub::new();
        let observed = Arc::new(Mutex::new(None));

        let probe = hub.clone();
        let sink = Arc::clone(&observed);
        let listener: Arc<dyn OnScreenResumed> =
            Arc::new(move |_: &ScreenHandle| -> ListenerResult {
                *sink.lock().unwrap() = probe.current_screen();
                Ok(())
            });
        hub.add_resumed_listener(Arc::clone(&listener));

        let a = ScreenHandle::new(Screen("a"));
        hub.ping_resumed_listeners(&a);
        assert_eq!(*observed.lock().unwrap(), Some(a));

        hub.remove_resumed_listener(&listener);
    }

    #[test]
    fn test_faulty_listeners_are_isolated() {
        let hub = LifecycleHub::new();
        let count = Arc::new(AtomicUsize::new(0));

        let failing: Arc<dyn OnScreenCreated> = Arc::new(|_: &ScreenHandle| -> ListenerResult {
            Err(ListenerError::failed("boom"))
        });
        let panicking: Arc<dyn OnScreenCreated> =
            Arc::new(|_: &ScreenHandle| -> ListenerResult { panic!("listener bug") });
        hub.add_created_listener(failing);
        hub.add_created_listener(panicking);
        hub.add_created_listener(counting_created(&count));

        let a = ScreenHandle::new(Screen("a"));
        hub.ping_created_listeners(&a);

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(hub.listener_faults(), 2);
        assert_eq!(hub.current_screen(), Some(a));
    }

    #[test]
    fn test_listener_panic_never_reaches_the_caller() {
        let config = ConfigService::default();
        config.set("APP_PROVIDER_CATCH_PANICS", "false");
        let hub = LifecycleHub::with_config(HubConfig::from_config(&config));
        let count = Arc::new(AtomicUsize::new(0));

        let panicking: Arc<dyn OnScreenCreated> =
            Arc::new(|_: &ScreenHandle| -> ListenerResult { panic!("listener bug") });
        hub.add_created_listener(panicking);
        hub.add_created_listener(counting_created(&count));

        let a = ScreenHandle::new(Screen("a"));
        let unwound = catch_unwind(AssertUnwindSafe(|| hub.ping_created_listeners(&a))).is_err();

        assert!(!unwound);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(hub.listener_faults(), 1);
    }

    #[tokio::test]
    async fn test_screen_stream_replays_latest() {
        let hub = LifecycleHub::new();
        let a = ScreenHandle::new(Screen("a"));
        hub.ping_created_listeners(&a);

        let mut screens = hub.screen_stream();
        assert_eq!(next(&mut screens).await, a);

        let b = ScreenHandle::new(Screen("b"));
        hub.ping_resumed_listeners(&b);
        assert_eq!(next(&mut screens).await, b);
    }

    #[tokio::test]
    async fn test_screen_stream_waits_for_first_screen() {
        let hub = LifecycleHub::new();
        let mut screens = hub.screen_stream();
        assert_quiet(&mut screens).await;

        let a = ScreenHandle::new(Screen("a"));
        hub.ping_resumed_listeners(&a);
        assert_eq!(next(&mut screens).await, a);
    }

    #[tokio::test]
    async fn test_wait_screen_resolves_on_first_screen() {
        let hub = LifecycleHub::new();
        let waiter = {
            let hub = hub.clone();
            tokio::spawn(async move { hub.wait_screen().await })
        };
        tokio::task::yield_now().await;

        let a = ScreenHandle::new(Screen("a"));
        hub.ping_created_listeners(&a);

        let resolved = timeout(Duration::from_secs(1), waiter)
            .await
            .expect("wait_screen stalled")
            .unwrap();
        assert_eq!(resolved, a);
    }

    #[tokio::test]
    async fn test_wait_screen_timeout() {
        let hub = LifecycleHub::new();
        let err = hub
            .wait_screen_timeout(Duration::from_millis(20))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_lifecycle_events_replay_only_latest() {
        let hub = LifecycleHub::new();
        let a = ScreenHandle::new(Screen("a"));
        let b = ScreenHandle::new(Screen("b"));

        hub.ping_created_listeners(&a);
        hub.ping_started_listeners(&a);
        hub.ping_resumed_listeners(&a);
        hub.ping_paused_listeners(&a);
        hub.ping_created_listeners(&b);
        hub.ping_resumed_listeners(&b);

        let mut late = hub.lifecycle_events();
        let first = next(&mut late).await;
        assert_eq!(first.phase, Phase::Resume);
        assert_eq!(&first.screen_id, b.id());
        assert_eq!(first.sequence, 6);
        assert_eq!(first.screen(), Some(b));
        assert_quiet(&mut late).await;

        assert_eq!(hub.last_event().map(|e| e.sequence), Some(6));
    }

    #[tokio::test]
    async fn test_lifecycle_events_are_not_conflated() {
        let hub = LifecycleHub::new();
        let mut events = hub.lifecycle_events();
        let a = ScreenHandle::new(Screen("a"));

        hub.ping_created_listeners(&a);
        hub.ping_started_listeners(&a);
        hub.ping_resumed_listeners(&a);

        let mut phases = Vec::new();
        for _ in 0..3 {
            phases.push(next(&mut events).await.phase);
        }
        assert_eq!(phases, vec![Phase::Create, Phase::Start, Phase::Resume]);
    }

    #[tokio::test]
    async fn test_distinct_resumes_suppress_consecutive_repeats() {
        let hub = LifecycleHub::new();
        let mut changes = hub.only_resumed_distinct();
        let a = ScreenHandle::new(Screen("a"));
        let b = ScreenHandle::new(Screen("b"));

        hub.ping_created_listeners(&a);
        hub.ping_resumed_listeners(&a);
        hub.ping_resumed_listeners(&a);
        hub.ping_resumed_listeners(&b);

        assert_eq!(&next(&mut changes).await.screen_id, a.id());
        assert_eq!(&next(&mut changes).await.screen_id, b.id());
        assert_quiet(&mut changes).await;
    }

    #[tokio::test]
    async fn test_distinct_resumes_allow_returning_screen() {
        let hub = LifecycleHub::new();
        let mut changes = hub.only_resumed_distinct();
        let a = ScreenHandle::new(Screen("a"));
        let b = ScreenHandle::new(Screen("b"));

        hub.ping_resumed_listeners(&a);
        hub.ping_paused_listeners(&a);
        hub.ping_resumed_listeners(&b);
        hub.ping_resumed_listeners(&a);

        let mut order = Vec::new();
        for _ in 0..3 {
            order.push(next(&mut changes).await.screen_id);
        }
        assert_eq!(order, vec![a.id().clone(), b.id().clone(), a.id().clone()]);
    }

    #[tokio::test]
    async fn test_listen_stream_deregisters_on_drop() {
        let hub = LifecycleHub::new();
        let mut destroyed = hub.listen_destroyed();
        let mut other = hub.listen_destroyed();
        assert_eq!(hub.listener_count(Phase::Destroy), 2);

        let a = ScreenHandle::new(Screen("a"));
        hub.ping_destroyed_listeners(&a);
        assert_eq!(next(&mut destroyed).await, a);
        assert_eq!(next(&mut other).await, a);

        drop(destroyed);
        assert_eq!(hub.listener_count(Phase::Destroy), 1);
        drop(other);
        assert_eq!(hub.listener_count(Phase::Destroy), 0);
    }

    #[tokio::test]
    async fn test_listen_stream_deregisters_when_task_is_cancelled() {
        let hub = LifecycleHub::new();
        let task = {
            let hub = hub.clone();
            tokio::spawn(async move {
                let mut started = hub.listen_started();
                while started.next().await.is_some() {}
            })
        };

        while hub.listener_count(Phase::Start) == 0 {
            tokio::task::yield_now().await;
        }
        task.abort();
        let _ = task.await;

        assert_eq!(hub.listener_count(Phase::Start), 0);
    }

    #[tokio::test]
    async fn test_each_listen_call_is_independent() {
        let hub = LifecycleHub::new();
        let mut resumed = hub.listen_resumed();
        let a = ScreenHandle::new(Screen("a"));
        hub.ping_resumed_listeners(&a);

        let mut late = hub.listen_resumed();
        let b = ScreenHandle::new(Screen("b"));
        hub.ping_resumed_listeners(&b);

        assert_eq!(next(&mut resumed).await, a);
        assert_eq!(next(&mut resumed).await, b);
        assert_eq!(next(&mut late).await, b);

        let mut stopped = hub.listen_stopped();
        let mut paused = hub.listen_paused();
        let mut created = hub.listen_created();
        hub.ping_stopped_listeners(&a);
        assert_eq!(next(&mut stopped).await, a);
        assert_quiet(&mut paused).await;
        assert_quiet(&mut created).await;
    }
}
