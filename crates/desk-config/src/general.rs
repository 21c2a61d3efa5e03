//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_unknown_category_label() -> String {
    "Unknown Category".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Check that a new ticket's category exists and allows its issue type.
    ///
    /// Off by default: the repository stores whatever it is given and the
    /// interactive menu only offers valid selections anyway.
    #[serde(default)]
    pub strict_issue_types: bool,

    /// Label shown for tickets whose category no longer resolves.
    #[serde(default = "default_unknown_category_label")]
    pub unknown_category_label: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            strict_issue_types: false,
            unknown_category_label: default_unknown_category_label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert!(!config.strict_issue_types);
        assert_eq!(config.unknown_category_label, "Unknown Category");
    }
}
