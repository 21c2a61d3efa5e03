//! Collection-backed repositories.
//!
//! Each repository owns one collection and records its mutations in the
//! trail. Neither knows about the other: the ticket's category id is a weak
//! reference and nothing here checks it.

pub mod catalog;
pub mod ticket;
