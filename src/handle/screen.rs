use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::Serialize;
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock, Weak};

/// Serial numbers handed out to live screen allocations, keyed by address.
static ISSUED: LazyLock<DashMap<usize, Issued>> = LazyLock::new(DashMap::new);
static NEXT_SERIAL: AtomicU64 = AtomicU64::new(1);

struct Issued {
    screen: Weak<dyn Any + Send + Sync>,
    serial: u64,
}

/// Identity of a screen instance, derived once from its type, address and a
/// process-wide serial.
///
/// Handles built over the same allocation share an id. A later screen that
/// reuses a dropped screen's address gets a new serial, so ids never repeat.
/// Only used to compare events with each other; never dereferenced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ScreenId(String);

impl ScreenId {
    fn of<S: Send + Sync + 'static>(screen: &Arc<S>) -> Self {
        let address = Arc::as_ptr(screen) as *const ();
        let erased: Arc<dyn Any + Send + Sync> = screen.clone();
        Self(format!(
            "{}@{:p}#{}",
            std::any::type_name::<S>(),
            address,
            serial_for(address as usize, &erased)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn serial_for(address: usize, screen: &Arc<dyn Any + Send + Sync>) -> u64 {
    let fresh = |screen: &Arc<dyn Any + Send + Sync>| Issued {
        screen: Arc::downgrade(screen),
        serial: NEXT_SERIAL.fetch_add(1, Ordering::Relaxed),
    };

    let serial = match ISSUED.entry(address) {
        // A live occupant at this address is this very allocation.
        Entry::Occupied(entry) if entry.get().screen.strong_count() > 0 => {
            return entry.get().serial;
        }
        Entry::Occupied(mut entry) => {
            entry.insert(fresh(screen));
            entry.get().serial
        }
        Entry::Vacant(entry) => entry.insert(fresh(screen)).serial,
    };

    ISSUED.retain(|_, issued| issued.screen.strong_count() > 0);
    serial
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strong handle to one screen owned by the host.
#[derive(Clone)]
pub struct ScreenHandle {
    inner: Arc<dyn Any + Send + Sync>,
    id: ScreenId,
}

impl ScreenHandle {
    pub fn new<S: Send + Sync + 'static>(screen: S) -> Self {
        Self::from_arc(Arc::new(screen))
    }

    pub fn from_arc<S: Send + Sync + 'static>(screen: Arc<S>) -> Self {
        let id = ScreenId::of(&screen);
        Self { inner: screen, id }
    }

    pub fn id(&self) -> &ScreenId {
        &self.id
    }

    pub fn downcast_ref<S: Send + Sync + 'static>(&self) -> Option<&S> {
        self.inner.downcast_ref::<S>()
    }

    pub fn downcast<S: Send + Sync + 'static>(&self) -> Option<Arc<S>> {
        self.inner.clone().downcast::<S>().ok()
    }

    pub fn downgrade(&self) -> WeakScreen {
        WeakScreen {
            inner: Arc::downgrade(&self.inner),
            id: self.id.clone(),
        }
    }

    pub fn ptr_eq(&self, other: &ScreenHandle) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.inner), Arc::as_ptr(&other.inner))
    }
}

impl PartialEq for ScreenHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ScreenHandle {}

impl fmt::Debug for ScreenHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScreenHandle").field(&self.id.0).finish()
    }
}

/// Non-owning reference to a screen.
#[derive(Clone)]
pub struct WeakScreen {
    inner: Weak<dyn Any + Send + Sync>,
    id: ScreenId,
}

impl WeakScreen {
    pub fn id(&self) -> &ScreenId {
        &self.id
    }

    /// Returns `None` once the host has dropped every strong handle.
    pub fn upgrade(&self) -> Option<ScreenHandle> {
        self.inner.upgrade().map(|inner| ScreenHandle {
            inner,
            id: self.id.clone(),
        })
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// True when this still points at the live allocation behind `screen`.
    ///
    /// Does not upgrade. A live allocation cannot share its address with
    /// another one, so the address check is only trusted while alive.
    pub fn refers_to(&self, screen: &ScreenHandle) -> bool {
        self.is_alive() && std::ptr::addr_eq(self.inner.as_ptr(), Arc::as_ptr(&screen.inner))
    }
}

impl fmt::Debug for WeakScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakScreen")
            .field("id", &self.id.0)
            .field("alive", &self.is_alive())
            .finish()
    }
}
