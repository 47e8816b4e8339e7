// ============================================================
// Layer 3 — Table Row Domain Types
// ============================================================
// One struct per input table:
//
//   RawRow  — a row of the training table   (index?, text, author)
//   TestRow — a row of the inference table  (index, text)
//
// Both are deserialised straight from CSV by header name, so
// extra columns are ignored and column order does not matter.
// Rows are never mutated after loading.

use serde::{Deserialize, Serialize};

use crate::domain::traits::CorpusRow;

/// A labelled row from the training table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    /// Optional row identifier (the `index` column, when present)
    #[serde(default)]
    pub index: Option<String>,

    /// The raw, uncleaned passage
    pub text: String,

    /// The categorical author label
    pub author: String,
}

impl RawRow {
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            index:  None,
            text:   text.into(),
            author: author.into(),
        }
    }

    /// Attach a row identifier
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }
}

/// An unlabelled row from the inference table.
/// The `index` column is mandatory here because predictions are
/// reported back against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRow {
    pub index: String,
    pub text:  String,
}

impl TestRow {
    pub fn new(index: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            text:  text.into(),
        }
    }
}

impl CorpusRow for RawRow {
    fn text(&self) -> &str {
        &self.text
    }

    fn label(&self) -> Option<&str> {
        Some(&self.author)
    }

    fn row_id(&self) -> Option<&str> {
        self.index.as_deref()
    }
}

impl CorpusRow for TestRow {
    fn text(&self) -> &str {
        &self.text
    }

    fn label(&self) -> Option<&str> {
        None
    }

    fn row_id(&self) -> Option<&str> {
        Some(&self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_row_exposes_author_as_label() {
        let row = RawRow::new("Some text", "hpl").with_index("id07");
        assert_eq!(row.label(), Some("hpl"));
        assert_eq!(row.row_id(), Some("id07"));
    }

    #[test]
    fn test_test_row_has_no_label() {
        let row = TestRow::new("0", "Some text");
        assert_eq!(row.label(), None);
        assert_eq!(row.row_id(), Some("0"));
    }
}
