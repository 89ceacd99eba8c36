use super::InitRegistry;
use crate::handle::ApplicationHandle;
use crate::lifecycle::{LifecycleBridge, LifecycleHub};
use std::sync::{Once, OnceLock};

static HOOK: OnceLock<HostHook> = OnceLock::new();
static BRIDGE: Once = Once::new();

/// Process-wide capture of the application handle.
///
/// Exactly one hook exists per process. It is created by the first
/// [`install`](Self::install), normally expanded by `#[app_provider::main]`
/// at the top of `main` before any other code runs. Later installs are
/// no-ops that return the existing hook.
///
/// If nothing ever installs the hook, the application handle is never
/// published and every [`InitRegistry::global`] listener waits forever.
/// That is a setup mistake in the host binary, not a runtime condition.
#[derive(Debug)]
pub struct HostHook {
    application: ApplicationHandle,
}

impl HostHook {
    /// Capture `application` and publish it to [`InitRegistry::global`].
    pub fn install(application: ApplicationHandle) -> &'static HostHook {
        let mut installed = false;
        let hook = HOOK.get_or_init(|| {
            installed = true;
            HostHook {
                application: application.clone(),
            }
        });

        if installed {
            tracing::info!(application = application.name(), "Host hook installed");
        } else if !hook.application.ptr_eq(&application) {
            tracing::warn!(
                kept = hook.application.name(),
                ignored = application.name(),
                "Host hook already installed with another application"
            );
        }

        InitRegistry::global().publish(hook.application.clone());
        hook
    }

    /// The installed hook, if any
    pub fn get() -> Option<&'static HostHook> {
        HOOK.get()
    }

    pub fn application(&self) -> &ApplicationHandle {
        &self.application
    }
}

/// Install the host hook and feed the global [`LifecycleHub`] from the host.
///
/// This is what `#[app_provider::main(..)]` inserts; call it directly when
/// the attribute does not fit the binary's entry point.
pub fn bootstrap(application: impl Into<ApplicationHandle>) -> &'static HostHook {
    BRIDGE.call_once(|| {
        LifecycleBridge::install(InitRegistry::global(), LifecycleHub::global().clone());
    });
    HostHook::install(application.into())
}
