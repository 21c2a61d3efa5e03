//! Document encoding helpers.
//!
//! Documents are stored as JSON text. These helpers map serde failures into
//! `DatabaseError::Document` so callers see which collection held the bad
//! record.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::DatabaseError;

/// Serialize a document (or a single field value) to JSON text.
///
/// # Errors
///
/// Returns `DatabaseError::Document` if serialization fails.
pub fn encode_document<T: Serialize + ?Sized>(
    collection: &str,
    document: &T,
) -> Result<String, DatabaseError> {
    serde_json::to_string(document).map_err(|e| DatabaseError::Document {
        collection: collection.to_string(),
        reason: e.to_string(),
    })
}

/// Deserialize a stored document.
///
/// # Errors
///
/// Returns `DatabaseError::Document` if the stored JSON does not match `T`.
pub fn decode_document<T: DeserializeOwned>(
    collection: &str,
    raw: &str,
) -> Result<T, DatabaseError> {
    serde_json::from_str(raw).map_err(|e| DatabaseError::Document {
        collection: collection.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use desk_core::entities::Category;

    #[test]
    fn decode_reports_collection() {
        let err = decode_document::<Category>("categories", r#"{"id": 5}"#).unwrap_err();
        match err {
            DatabaseError::Document { collection, .. } => assert_eq!(collection, "categories"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn encode_then_decode_category() {
        let category = Category {
            id: "cat-0a1b2c3d".into(),
            name: "Network".into(),
            issue_types: vec!["Wi-Fi".into()],
        };
        let raw = encode_document("categories", &category).unwrap();
        let back: Category = decode_document("categories", &raw).unwrap();
        assert_eq!(back, category);
    }
}
