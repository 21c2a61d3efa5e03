//! JSONL trail operation envelope.
//!
//! Every mutation is recorded as a `TrailOperation` in a per-run
//! `{trail_dir}/{run_id}.jsonl` file. The trail is an event record only; the
//! document store stays the source of truth for reads.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{EntityType, TrailOp};

/// Default trail version for records without a `v` field.
const fn default_trail_version() -> u32 {
    1
}

/// A single operation recorded in the JSONL trail.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TrailOperation {
    #[serde(default = "default_trail_version")]
    pub v: u32,

    /// RFC 3339 timestamp of the operation.
    pub ts: String,

    /// Process run that produced this operation.
    pub run: String,

    pub op: TrailOp,

    pub entity: EntityType,

    /// ID of the affected entity.
    pub id: String,

    /// Operation payload. Full entity for `Create`, changed fields for
    /// `Update`, the dangling category id for `OrphanDeleted`.
    pub data: serde_json::Value,
}
