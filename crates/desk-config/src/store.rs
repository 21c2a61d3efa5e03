//! Document store configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    ".desk/desk.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Path to the libSQL database file, or `":memory:"`.
    #[serde(default = "default_path")]
    pub path: String,

    /// Upper bound for a single store call, in milliseconds. `0` = unbounded.
    #[serde(default)]
    pub timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            timeout_ms: 0,
        }
    }
}

impl StoreConfig {
    /// The per-call timeout, if one is configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        if self.timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.timeout_ms))
        }
    }

    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }
}
