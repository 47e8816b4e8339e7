// ============================================================
// Layer 4 — Stopword Set
// ============================================================
// An immutable set of words the normaliser drops.
//
// The set is always built explicitly and handed to the
// TextNormalizer; nothing in the crate reads a global list.
// Three ways to build one:
//
//   StopwordSet::english()      — the bundled English list
//   StopwordSet::from_file(p)   — one word per line, '#' comments
//   StopwordSet::new(words)     — any iterator of strings
//
// Words are stored lowercased and trimmed, which is also how
// the normaliser looks tokens up.

use anyhow::{Context, Result};
use std::{collections::HashSet, fs, path::Path};

/// The common English stopword list (same entries as NLTK's `english`).
const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you",
    "you're", "you've", "you'll", "you'd", "your", "yours", "yourself",
    "yourselves", "he", "him", "his", "himself", "she", "she's", "her", "hers",
    "herself", "it", "it's", "its", "itself", "they", "them", "their",
    "theirs", "themselves", "what", "which", "who", "whom", "this", "that",
    "that'll", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did",
    "doing", "a", "an", "the", "and", "but", "if", "or", "because", "as",
    "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above",
    "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when",
    "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own",
    "same", "so", "than", "too", "very", "s", "t", "can", "will", "just",
    "don", "don't", "should", "should've", "now", "d", "ll", "m", "o", "re",
    "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't",
    "haven", "haven't", "isn", "isn't", "ma", "mightn", "mightn't", "mustn",
    "mustn't", "needn", "needn't", "shan", "shan't", "shouldn", "shouldn't",
    "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// Build a set from any list of words.
    /// Entries are trimmed and lowercased; blank entries are ignored.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// A set that removes nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The bundled English list.
    pub fn english() -> Self {
        Self::new(ENGLISH.iter().copied())
    }

    /// Read a stopword file: one word per line, blank lines and
    /// lines starting with `#` are skipped.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Cannot read stopword list '{}'", path.display()))?;

        let set = Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        );

        tracing::debug!(
            "Loaded {} stopwords from '{}'",
            set.len(),
            path.display()
        );
        Ok(set)
    }

    /// True when `word`, trimmed and lowercased, is in the set.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
