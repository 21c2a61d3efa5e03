//! ID prefixes and shape checks.
//!
//! Surrogate ids are generated by the store as `"{prefix}-{8 hex}"`, e.g.
//! `"tkt-a3f8b2c1"`. The store never interprets them, so the shape check here
//! is the only thing separating a malformed id from a missing record.

use crate::errors::CoreError;

pub const PREFIX_CATEGORY: &str = "cat";
pub const PREFIX_TICKET: &str = "tkt";
pub const PREFIX_RUN: &str = "run";

pub const ALL_PREFIXES: &[&str] = &[PREFIX_CATEGORY, PREFIX_TICKET, PREFIX_RUN];

/// Length of the random hex suffix.
pub const SUFFIX_LEN: usize = 8;

/// Whether `id` has the shape `"{prefix}-{8 lowercase hex}"`.
#[must_use]
pub fn is_well_formed(prefix: &str, id: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|suffix| {
            suffix.len() == SUFFIX_LEN
                && suffix
                    .chars()
                    .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        })
}

/// Validate the shape of an id before it is used for a lookup.
///
/// # Errors
///
/// Returns `CoreError::InvalidReference` if `id` is malformed for `prefix`.
pub fn check_id<'a>(prefix: &str, entity_type: &str, id: &'a str) -> Result<&'a str, CoreError> {
    if is_well_formed(prefix, id) {
        Ok(id)
    } else {
        Err(CoreError::InvalidReference {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_generated_shape() {
        assert!(is_well_formed(PREFIX_TICKET, "tkt-a3f8b2c1"));
        assert!(is_well_formed(PREFIX_CATEGORY, "cat-00000000"));
    }

    #[test]
    fn rejects_wrong_prefix() {
        assert!(!is_well_formed(PREFIX_TICKET, "cat-a3f8b2c1"));
    }

    #[test]
    fn rejects_bad_suffix() {
        assert!(!is_well_formed(PREFIX_TICKET, "tkt-a3f8b2c"));
        assert!(!is_well_formed(PREFIX_TICKET, "tkt-A3F8B2C1"));
        assert!(!is_well_formed(PREFIX_TICKET, "tkt-a3f8b2cz"));
        assert!(!is_well_formed(PREFIX_TICKET, "tkta3f8b2c1"));
        assert!(!is_well_formed(PREFIX_TICKET, ""));
    }

    #[test]
    fn check_id_reports_invalid_reference() {
        let err = check_id(PREFIX_TICKET, "ticket", "not-an-id").unwrap_err();
        assert!(matches!(err, CoreError::InvalidReference { .. }));
        assert!(err.to_string().contains("not-an-id"));
    }
}
