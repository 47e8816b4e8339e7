// ============================================================
// Layer 4 — Label Codec
// ============================================================
// Maps categorical author names to integer class ids.
//
// Ids are assigned by sorted author name, so the same training
// table always yields the same mapping regardless of row order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::data::corpus::Corpus;
use crate::domain::record::AuthorLabel;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCodec {
    authors: Vec<String>,
}

impl LabelCodec {
    pub fn new<I, S>(authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sorted: BTreeSet<String> = authors.into_iter().map(Into::into).collect();
        Self { authors: sorted.into_iter().collect() }
    }

    /// Collect every label present in a corpus.
    pub fn from_corpus(corpus: &Corpus) -> Self {
        Self::new(corpus.labels().flatten())
    }

    pub fn class_id(&self, author: &str) -> Option<usize> {
        self.authors
            .binary_search_by(|a| a.as_str().cmp(author))
            .ok()
    }

    pub fn author(&self, class_id: usize) -> Option<&str> {
        self.authors.get(class_id).map(String::as_str)
    }

    pub fn label(&self, author: &str) -> Option<AuthorLabel> {
        self.class_id(author).map(|class_id| AuthorLabel {
            author: author.to_owned(),
            class_id,
        })
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_sorted_names() {
        let codec = LabelCodec::new(["mws", "eap", "hpl", "eap"]);
        assert_eq!(codec.len(), 3);
        assert_eq!(codec.class_id("eap"), Some(0));
        assert_eq!(codec.class_id("hpl"), Some(1));
        assert_eq!(codec.class_id("mws"), Some(2));
        assert_eq!(codec.author(1), Some("hpl"));
    }

    #[test]
    fn test_unknown_author() {
        let codec = LabelCodec::new(["eap"]);
        assert_eq!(codec.class_id("poe"), None);
        assert_eq!(codec.label("poe"), None);
        assert_eq!(codec.author(5), None);
    }
}
