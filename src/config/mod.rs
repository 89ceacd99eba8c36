use dashmap::DashMap;
use std::env;
use std::str::FromStr;
use std::sync::Arc;

pub const EVENT_BUFFER_KEY: &str = "APP_PROVIDER_EVENT_BUFFER";

/// Configuration service
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    /// Snapshot of the process environment
    pub fn new() -> Self {
        let service = Self::default();
        for (key, value) in env::vars() {
            service.set(&key, &value);
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }

    /// Parse `key`, falling back to `default` when absent or malformed.
    pub fn parse_or<T: FromStr>(&self, key: &str, default: T) -> T {
        match self.get(key) {
            None => default,
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(key, value = %raw, "Ignoring malformed config value");
                default
            }),
        }
    }
}

/// Tuning knobs for a [`LifecycleHub`](crate::lifecycle::LifecycleHub).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubConfig {
    /// Events a lifecycle stream subscriber may fall behind before it skips ahead.
    pub event_buffer: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self { event_buffer: 256 }
    }
}

impl HubConfig {
    pub fn from_config(config: &ConfigService) -> Self {
        let defaults = Self::default();
        let event_buffer = match config.parse_or(EVENT_BUFFER_KEY, defaults.event_buffer) {
            0 => {
                tracing::warn!(key = EVENT_BUFFER_KEY, "Event buffer must be non-zero");
                defaults.event_buffer
            }
            n => n,
        };
        Self { event_buffer }
    }

    pub fn event_buffer(mut self, capacity: usize) -> Self {
        self.event_buffer = capacity.max(1);
        self
    }
}
