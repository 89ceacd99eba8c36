use super::InitRegistry;
use crate::handle::ApplicationHandle;
use std::sync::Once;

/// A lazily registered init step, declared as a `static`.
///
/// However many modules call [`ensure`](Self::ensure), the step is handed to
/// the registry only once, and so runs once the application handle exists.
///
/// # Example
///
/// ```rust
/// use app_provider::bootstrap::Initializer;
///
/// static INIT_PREFERENCES: Initializer = Initializer::new("preferences", |app| {
///     tracing::info!(application = app.name(), "opening preferences");
/// });
///
/// INIT_PREFERENCES.ensure();
/// INIT_PREFERENCES.ensure();
/// ```
pub struct Initializer {
    name: &'static str,
    init: fn(&ApplicationHandle),
    registered: Once,
}

impl Initializer {
    pub const fn new(name: &'static str, init: fn(&ApplicationHandle)) -> Self {
        Self {
            name,
            init,
            registered: Once::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Register with the process-wide registry, at most once.
    pub fn ensure(&self) {
        self.ensure_on(InitRegistry::global());
    }

    /// Register with `registry`, at most once over the initializer's life.
    pub fn ensure_on(&self, registry: &InitRegistry) {
        self.registered.call_once(|| {
            let name = self.name;
            let init = self.init;
            tracing::debug!(initializer = name, "Registering initializer");
            registry.listen(move |application| {
                tracing::debug!(initializer = name, "Running initializer");
                init(application);
            });
        });
    }

    pub fn is_registered(&self) -> bool {
        self.registered.is_completed()
    }
}
