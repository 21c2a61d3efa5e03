//! Entity structs for desk domain objects.
//!
//! Each entity is stored as one JSON document in the collection of the same
//! name. All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for
//! JSON roundtrip and schema output.

mod category;
mod ticket;

pub use category::Category;
pub use ticket::{CategoryRef, Ticket};
