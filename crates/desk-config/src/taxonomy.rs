//! Taxonomy source configuration.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "categories.txt".to_string()
}

const fn default_reload_on_start() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TaxonomyConfig {
    /// Taxonomy definition file.
    #[serde(default = "default_path")]
    pub path: String,

    /// Replace the stored categories from `path` on every start.
    #[serde(default = "default_reload_on_start")]
    pub reload_on_start: bool,
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            reload_on_start: default_reload_on_start(),
        }
    }
}
