//! Listener fault types

use std::any::Any;
use thiserror::Error;

/// A listener failed while an event was being delivered to it.
///
/// Faults are contained by the hub: they are logged and counted, and the
/// remaining listeners still receive the event.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The listener reported a failure
    #[error("Listener failed: {0}")]
    Failed(String),

    /// The listener panicked
    #[error("Listener panicked: {0}")]
    Panicked(String),
}

/// Outcome of delivering one event to one listener
pub type ListenerResult = Result<(), ListenerError>;

impl ListenerError {
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }

    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(msg) => *msg,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(msg) => (*msg).to_string(),
                Err(_) => "non-string panic payload".to_string(),
            },
        };
        Self::Panicked(message)
    }
}
