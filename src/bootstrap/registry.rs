use crate::error::{ProviderError, Result};
use crate::handle::ApplicationHandle;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;

type InitCallback = Box<dyn FnOnce(&ApplicationHandle) + Send>;

static GLOBAL_REGISTRY: LazyLock<InitRegistry> = LazyLock::new(InitRegistry::new);

enum State {
    Pending(Vec<InitCallback>),
    Published(ApplicationHandle),
}

/// Run-once gate delivering the application handle to interested modules.
///
/// Every callback passed to [`listen`](Self::listen) runs exactly once:
/// immediately if the handle is already published, otherwise when
/// [`publish`](Self::publish) is first called.
///
/// # Example
///
/// ```rust
/// use app_provider::bootstrap::InitRegistry;
/// use app_provider::host::LocalHost;
/// use app_provider::ApplicationHandle;
///
/// let registry = InitRegistry::new();
/// registry.listen(|app| println!("ready: {}", app.name()));
/// registry.publish(ApplicationHandle::new(LocalHost::new("demo")));
/// ```
pub struct InitRegistry {
    state: Mutex<State>,
    published: watch::Sender<Option<ApplicationHandle>>,
}

impl Default for InitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InitRegistry {
    pub fn new() -> Self {
        let (published, _) = watch::channel(None);
        Self {
            state: Mutex::new(State::Pending(Vec::new())),
            published,
        }
    }

    /// The registry [`HostHook`](super::HostHook) publishes to
    pub fn global() -> &'static InitRegistry {
        &GLOBAL_REGISTRY
    }

    /// Run `callback` exactly once with the application handle.
    ///
    /// If the handle is already published the callback runs before this
    /// returns, on the caller's thread. Otherwise it runs on the thread
    /// that publishes.
    pub fn listen(&self, callback: impl FnOnce(&ApplicationHandle) + Send + 'static) {
        let application = {
            let mut state = self.lock();
            match &mut *state {
                State::Published(application) => application.clone(),
                State::Pending(callbacks) => {
                    callbacks.push(Box::new(callback));
                    return;
                }
            }
        };
        run(callback, &application);
    }

    /// Publish the application handle and flush pending callbacks.
    ///
    /// Returns false if a handle was already published; the registry keeps
    /// the first one.
    pub fn publish(&self, application: ApplicationHandle) -> bool {
        let pending = {
            let mut state = self.lock();
            if let State::Published(existing) = &*state {
                if !existing.ptr_eq(&application) {
                    tracing::warn!(
                        kept = existing.name(),
                        ignored = application.name(),
                        "Application handle already published"
                    );
                }
                return false;
            }
            match std::mem::replace(&mut *state, State::Published(application.clone())) {
                State::Pending(callbacks) => callbacks,
                State::Published(_) => Vec::new(),
            }
        };

        self.published.send_replace(Some(application.clone()));
        tracing::info!(
            application = application.name(),
            pending = pending.len(),
            "Application handle published"
        );

        for callback in pending {
            run(callback, &application);
        }
        true
    }

    /// The published handle, without waiting
    pub fn application(&self) -> Option<ApplicationHandle> {
        self.published.borrow().clone()
    }

    pub fn is_published(&self) -> bool {
        self.published.borrow().is_some()
    }

    /// Wait for the application handle.
    ///
    /// Never resolves if nothing publishes; see [`wait_timeout`](Self::wait_timeout).
    pub async fn wait(&self) -> ApplicationHandle {
        let mut published = self.published.subscribe();
        loop {
            let application = published.borrow_and_update().clone();
            if let Some(application) = application {
                return application;
            }
            if published.changed().await.is_err() {
                // The sender lives in `self`; unreachable while borrowed.
                return std::future::pending().await;
            }
        }
    }

    pub async fn wait_timeout(&self, timeout: Duration) -> Result<ApplicationHandle> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| ProviderError::timeout("the application handle", timeout))
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn run(callback: impl FnOnce(&ApplicationHandle), application: &ApplicationHandle) {
    // A failing consumer must not starve the remaining ones.
    if let Err(payload) = catch_unwind(AssertUnwindSafe(|| callback(application))) {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_default();
        tracing::error!(
            application = application.name(),
            "Init callback panicked: {}",
            message
        );
    }
}
