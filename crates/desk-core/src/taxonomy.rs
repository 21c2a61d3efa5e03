//! Taxonomy definition parsing.
//!
//! A taxonomy file is a list of lines. A line ending in `:` opens a category
//! named by the text before the colon; every following non-blank line up to
//! the next header is one issue type for that category:
//!
//! ```text
//! Network:
//!   Outage
//!   Slow
//! Billing:
//!   Refund
//! ```
//!
//! Whitespace is trimmed from every line and blank lines are skipped.

use std::path::Path;

use serde::Serialize;

use crate::errors::CoreError;

/// One category section of a taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxonomyEntry {
    pub name: String,
    pub issue_types: Vec<String>,
}

/// Ordered mapping of category name to ordered issue types.
///
/// Order of entries is the order headers first appear in the source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Taxonomy {
    entries: Vec<TaxonomyEntry>,
}

impl Taxonomy {
    /// Build a taxonomy from `(name, issue types)` pairs.
    ///
    /// A repeated name replaces the earlier issue types but keeps the earlier
    /// position, matching what [`Taxonomy::parse`] does for repeated headers.
    #[must_use]
    pub fn from_pairs<N, I, T>(pairs: impl IntoIterator<Item = (N, I)>) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut taxonomy = Self::default();
        for (name, issue_types) in pairs {
            let index = taxonomy.open_section(name.into());
            taxonomy.entries[index]
                .issue_types
                .extend(issue_types.into_iter().map(Into::into));
        }
        taxonomy
    }

    /// Parse taxonomy source text.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if an issue type appears before the
    /// first category header, or a header has an empty name.
    pub fn parse(source: &str) -> Result<Self, CoreError> {
        let mut taxonomy = Self::default();
        let mut current: Option<usize> = None;

        for (line_no, raw) in source.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(name) = line.strip_suffix(':') {
                let name = name.trim();
                if name.is_empty() {
                    return Err(CoreError::Validation(format!(
                        "line {}: category header has an empty name",
                        line_no + 1
                    )));
                }
                current = Some(taxonomy.open_section(name.to_string()));
                continue;
            }

            let Some(index) = current else {
                return Err(CoreError::Validation(format!(
                    "line {}: issue type '{line}' appears before any category header",
                    line_no + 1
                )));
            };
            taxonomy.entries[index].issue_types.push(line.to_string());
        }

        Ok(taxonomy)
    }

    /// Read and parse a taxonomy file.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Other` if the file cannot be read, or the errors of
    /// [`Taxonomy::parse`].
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Other(anyhow::anyhow!(
                "failed to read taxonomy file {}: {e}",
                path.display()
            ))
        })?;
        Self::parse(&source)
    }

    #[must_use]
    pub fn entries(&self) -> &[TaxonomyEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Issue types for a category name, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.issue_types.as_slice())
    }

    /// Return the index of the section for `name`, clearing it if it already
    /// exists and appending it otherwise.
    fn open_section(&mut self, name: String) -> usize {
        if let Some(index) = self.entries.iter().position(|e| e.name == name) {
            self.entries[index].issue_types.clear();
            index
        } else {
            self.entries.push(TaxonomyEntry {
                name,
                issue_types: Vec::new(),
            });
            self.entries.len() - 1
        }
    }
}

impl<'a> IntoIterator for &'a Taxonomy {
    type Item = &'a TaxonomyEntry;
    type IntoIter = std::slice::Iter<'a, TaxonomyEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_sections_in_order() {
        let taxonomy = Taxonomy::parse("A:\n x\n y\nB:\n z\n").unwrap();
        assert_eq!(
            taxonomy,
            Taxonomy::from_pairs([("A", vec!["x", "y"]), ("B", vec!["z"])])
        );
        let names: Vec<_> = taxonomy.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn trims_whitespace_and_skips_blank_lines() {
        let taxonomy = Taxonomy::parse("  Network:  \n\n\tOutage \n   \n Slow\n").unwrap();
        assert_eq!(
            taxonomy.get("Network"),
            Some(&["Outage".to_string(), "Slow".to_string()][..])
        );
    }

    #[test]
    fn header_name_drops_space_before_colon() {
        let taxonomy = Taxonomy::parse("Network :\n  Outage\n").unwrap();
        assert_eq!(taxonomy.get("Network").unwrap(), ["Outage"]);
        assert!(taxonomy.get("Network ").is_none());
    }

    #[test]
    fn header_without_issue_types_is_kept() {
        let taxonomy = Taxonomy::parse("Empty:\nFull:\n one\n").unwrap();
        assert_eq!(taxonomy.len(), 2);
        assert_eq!(taxonomy.get("Empty"), Some(&[][..]));
    }

    #[test]
    fn repeated_header_restarts_section_in_place() {
        let taxonomy = Taxonomy::parse("A:\n x\nB:\n y\nA:\n z\n").unwrap();
        let names: Vec<_> = taxonomy.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(taxonomy.get("A"), Some(&["z".to_string()][..]));
    }

    #[test]
    fn issue_type_before_header_is_rejected() {
        let err = Taxonomy::parse("orphan\nA:\n x\n").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn empty_header_name_is_rejected() {
        let err = Taxonomy::parse("A:\n x\n :\n").unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn empty_source_is_empty_taxonomy() {
        assert!(Taxonomy::parse("").unwrap().is_empty());
        assert!(Taxonomy::parse("\n  \n").unwrap().is_empty());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.txt");
        std::fs::write(&path, "Billing:\nRefund\n").unwrap();
        let taxonomy = Taxonomy::load(&path).unwrap();
        assert_eq!(taxonomy.get("Billing"), Some(&["Refund".to_string()][..]));
    }

    #[test]
    fn load_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Taxonomy::load(&dir.path().join("missing.txt")).unwrap_err();
        assert!(err.to_string().contains("failed to read taxonomy file"));
    }
}
