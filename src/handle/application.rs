use crate::error::Result;
use crate::host::{Application, LifecycleCallbacks};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Process-wide handle to the host's application object.
///
/// Cloning is cheap; every clone points at the same application.
#[derive(Clone)]
pub struct ApplicationHandle {
    inner: Arc<dyn Application>,
    any: Arc<dyn Any + Send + Sync>,
}

impl ApplicationHandle {
    pub fn new<A: Application>(application: A) -> Self {
        Self::from_arc(Arc::new(application))
    }

    pub fn from_arc<A: Application>(application: Arc<A>) -> Self {
        Self {
            inner: application.clone(),
            any: application,
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Register native lifecycle callbacks with the underlying host.
    pub fn register_lifecycle_callbacks(
        &self,
        callbacks: Arc<dyn LifecycleCallbacks>,
    ) -> Result<()> {
        self.inner.register_lifecycle_callbacks(callbacks)
    }

    pub fn downcast_ref<A: Application>(&self) -> Option<&A> {
        self.any.downcast_ref::<A>()
    }

    pub fn downcast<A: Application>(&self) -> Option<Arc<A>> {
        self.any.clone().downcast::<A>().ok()
    }

    pub fn ptr_eq(&self, other: &ApplicationHandle) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.any), Arc::as_ptr(&other.any))
    }
}

impl<A: Application> From<A> for ApplicationHandle {
    fn from(application: A) -> Self {
        Self::new(application)
    }
}

impl fmt::Debug for ApplicationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationHandle")
            .field("name", &self.name())
            .finish()
    }
}
