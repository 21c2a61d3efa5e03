//! JSONL trail of mutations.
//!
//! Per-run files live in the configured trail directory. The trail records
//! what happened; the document store stays authoritative.

pub mod writer;
