//! JSONL event trail configuration.

use serde::{Deserialize, Serialize};

const fn default_enabled() -> bool {
    true
}

fn default_dir() -> String {
    ".desk/trail".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrailConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Directory holding one `{run_id}.jsonl` file per process run.
    #[serde(default = "default_dir")]
    pub dir: String,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            dir: default_dir(),
        }
    }
}
