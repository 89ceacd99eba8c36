//! Service wiring for consumers that prefer injection over globals.

mod container;

pub use container::Container;

use crate::handle::ApplicationHandle;
use crate::lifecycle::LifecycleHub;

/// Register the application handle and the hub so consumers can resolve them.
///
/// # Example
///
/// ```rust
/// use app_provider::bootstrap::InitRegistry;
/// use app_provider::di::{self, Container};
/// use app_provider::LifecycleHub;
///
/// InitRegistry::global().listen(|app| {
///     let mut container = Container::new();
///     di::register_providers(&mut container, app, LifecycleHub::global());
/// });
/// ```
pub fn register_providers(
    container: &mut Container,
    application: &ApplicationHandle,
    hub: &LifecycleHub,
) {
    container
        .register(application.clone())
        .register(hub.clone());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::LocalHost;

    #[test]
    fn test_register_providers() {
        let mut container = Container::new();
        let application = ApplicationHandle::new(LocalHost::new("di"));
        register_providers(&mut container, &application, &LifecycleHub::new());

        let resolved = container.resolve::<ApplicationHandle>().unwrap();
        assert!(resolved.ptr_eq(&application));
        assert!(container.contains::<LifecycleHub>());
        assert_eq!(container.len(), 2);
    }
}
