//! Response types returned by joined views and rendered by the CLI.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Ticket;

/// Label shown for a ticket whose category no longer resolves.
pub const UNKNOWN_CATEGORY: &str = "Unknown Category";

/// A ticket joined with the display name of its category.
///
/// `category` is the sentinel label when the reference dangles.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LabeledTicket {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub category: String,
}

/// Result of deleting a single record.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DeleteResponse {
    pub id: String,
    pub deleted: bool,
}
