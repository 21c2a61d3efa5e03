//! JSONL trail writer.
//!
//! Appends `TrailOperation` records to `{trail_dir}/{run_id}.jsonl`. Uses
//! `serde_jsonlines::append_json_lines` for per-line appends.

use std::path::{Path, PathBuf};

use chrono::Utc;
use desk_core::enums::{EntityType, TrailOp};
use desk_core::trail::TrailOperation;

use crate::error::DatabaseError;

/// Trail format version stamped on every record.
const TRAIL_VERSION: u32 = 1;

/// Appends trail operations for one process run.
///
/// Components call [`TrailWriter::record_or_warn`] after the store call
/// succeeds, so a failed append never turns a committed write into an error.
/// A disabled writer accepts and drops everything.
pub struct TrailWriter {
    trail_dir: PathBuf,
    run_id: String,
    enabled: bool,
}

impl TrailWriter {
    /// Create a writer for `run_id` under `trail_dir`.
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the directory cannot be created.
    pub fn new(trail_dir: PathBuf, run_id: impl Into<String>) -> Result<Self, DatabaseError> {
        std::fs::create_dir_all(&trail_dir).map_err(|e| DatabaseError::Other(e.into()))?;
        Ok(Self {
            trail_dir,
            run_id: run_id.into(),
            enabled: true,
        })
    }

    /// Create a disabled writer (for testing or when the trail is off).
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            trail_dir: PathBuf::new(),
            run_id: String::new(),
            enabled: false,
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    #[must_use]
    pub fn trail_dir(&self) -> &Path {
        &self.trail_dir
    }

    /// File this run appends to.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.trail_dir.join(format!("{}.jsonl", self.run_id))
    }

    /// Append a prepared operation.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the file write fails.
    pub fn append(&self, op: &TrailOperation) -> Result<(), DatabaseError> {
        if !self.enabled {
            return Ok(());
        }
        serde_jsonlines::append_json_lines(self.path(), [op])
            .map_err(|e| DatabaseError::Other(e.into()))?;
        Ok(())
    }

    /// Stamp and append an operation for this run.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the file write fails.
    pub fn record(
        &self,
        op: TrailOp,
        entity: EntityType,
        id: &str,
        data: serde_json::Value,
    ) -> Result<(), DatabaseError> {
        if !self.enabled {
            return Ok(());
        }
        self.append(&TrailOperation {
            v: TRAIL_VERSION,
            ts: Utc::now().to_rfc3339(),
            run: self.run_id.clone(),
            op,
            entity,
            id: id.to_string(),
            data,
        })
    }

    /// [`TrailWriter::record`] for an event whose store write has already
    /// committed. A failed append is logged and dropped. Returns whether the
    /// event was written.
    pub fn record_or_warn(
        &self,
        op: TrailOp,
        entity: EntityType,
        id: &str,
        data: serde_json::Value,
    ) -> bool {
        match self.record(op, entity, id, data) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(%op, %entity, id, error = %e, "failed to append trail event");
                false
            }
        }
    }
}
