//! Integrity scan configuration.

use serde::{Deserialize, Serialize};

const fn default_scan_on_start() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IntegrityConfig {
    /// Delete orphaned tickets before serving any command.
    #[serde(default = "default_scan_on_start")]
    pub scan_on_start: bool,
}

impl Default for IntegrityConfig {
    fn default() -> Self {
        Self {
            scan_on_start: default_scan_on_start(),
        }
    }
}
