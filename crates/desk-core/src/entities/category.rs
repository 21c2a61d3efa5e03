use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A ticket category and the issue types that may be filed under it.
///
/// Categories are recreated wholesale on every taxonomy reload, so `id` is
/// only stable within one taxonomy generation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    /// Unique within a generation by convention only.
    pub name: String,
    /// Display order.
    pub issue_types: Vec<String>,
}

impl Category {
    /// Whether `issue_type` is one of this category's issue types.
    #[must_use]
    pub fn allows(&self, issue_type: &str) -> bool {
        self.issue_types.iter().any(|t| t == issue_type)
    }
}
