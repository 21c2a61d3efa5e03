use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::TicketStatus;
use crate::ids::{PREFIX_CATEGORY, is_well_formed};

/// Weak reference from a ticket to a category.
///
/// Holds only the category id. The target may have been deleted by a
/// taxonomy reload; resolving goes through the category catalog and a
/// dangling reference resolves to nothing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct CategoryRef(String);

impl CategoryRef {
    #[must_use]
    pub fn new(category_id: impl Into<String>) -> Self {
        Self(category_id.into())
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }

    /// Whether the referenced id has the shape of a category id at all.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        is_well_formed(PREFIX_CATEGORY, &self.0)
    }
}

impl std::fmt::Display for CategoryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A support ticket filed against a category.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Ticket {
    pub id: String,
    /// Stored as `category_id` in the document.
    #[serde(rename = "category_id")]
    pub category_ref: CategoryRef,
    pub issue_type: String,
    pub description: String,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
