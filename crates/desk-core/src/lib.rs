//! # desk-core
//!
//! Core types, ID helpers, and error types for desk.
//!
//! This crate provides the foundational types shared across all desk crates:
//! - Entity structs for categories and tickets
//! - The weak `CategoryRef` a ticket holds to its category
//! - Ticket status, entity type, and trail op enums
//! - ID prefix constants and shape checks
//! - Taxonomy definition parsing
//! - Trail operation envelope for JSONL persistence
//! - CLI response types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod responses;
pub mod taxonomy;
pub mod trail;
