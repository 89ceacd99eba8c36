//! Bootstrap Module
//!
//! Captures the application handle once, at process start, and hands it to
//! every module that asked for it.
//!
//! # Startup sequence
//!
//! ```text
//! 1. main() entry
//!    ↓
//! 2. bootstrap(app)                    ← inserted by #[app_provider::main]
//!    ├─ LifecycleBridge::install       (listens on the global registry)
//!    └─ HostHook::install
//!          ↓
//! 3. InitRegistry::publish             ← pending listeners run here
//!    ↓
//! 4. user code; later listeners run immediately
//! ```

mod hook;
mod initializer;
mod registry;

pub use hook::{HostHook, bootstrap};
pub use initializer::Initializer;
pub use registry::InitRegistry;
