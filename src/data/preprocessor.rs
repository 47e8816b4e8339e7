// ============================================================
// Layer 4 — Text Normaliser
// ============================================================
// Cleans raw passages before they reach the tokenizer trainer.
//
// Cleaning steps (applied in order):
//   1. Lowercase the whole string
//   2. Drop every character that is not an ASCII letter,
//      digit or space (the class [^A-Za-z0-9 ] is removed,
//      so tabs and newlines vanish rather than become spaces)
//   3. Split on whitespace, drop stopwords, rejoin the
//      surviving words with single spaces
//
// Every step is total: odd input just produces a shorter or
// empty string. The output alphabet is [a-z0-9 ] with no
// leading, trailing or repeated spaces, so normalising twice
// gives the same result as normalising once.

use crate::data::stopwords::StopwordSet;

pub struct TextNormalizer {
    stopwords: StopwordSet,
}

impl TextNormalizer {
    /// Create a normaliser that removes the given stopwords
    pub fn new(stopwords: StopwordSet) -> Self {
        Self { stopwords }
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// Normalise one passage.
    pub fn normalize(&self, text: &str) -> String {
        // ── Step 1: Case-fold ─────────────────────────────────────────────────
        let lowered = text.to_lowercase();

        // ── Step 2: Keep [a-z0-9 ] only ───────────────────────────────────────
        // Non-ASCII letters that survive lowercasing (é, ß, ...) are dropped
        // here too.
        let filtered: String = lowered
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
            .collect();

        // ── Step 3: Remove stopwords, collapse spacing ────────────────────────
        filtered
            .split_whitespace()
            .filter(|word| !self.stopwords.contains(word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(StopwordSet::empty())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn english() -> TextNormalizer {
        TextNormalizer::new(StopwordSet::english())
    }

    fn is_clean(s: &str) -> bool {
        s.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' ')
            && !s.starts_with(' ')
            && !s.ends_with(' ')
            && !s.contains("  ")
    }

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        let n = TextNormalizer::default();
        assert_eq!(n.normalize("Hello, World!"), "hello world");
    }

    #[test]
    fn test_periods_are_removed() {
        let n = TextNormalizer::default();
        assert_eq!(n.normalize("Hello world. Bye now."), "hello world bye now");
    }

    #[test]
    fn test_removes_stopwords_in_order() {
        let n = english();
        assert_eq!(
            n.normalize("It was the Raven that spoke, and then it fled"),
            "raven spoke fled"
        );
    }

    #[test]
    fn test_newlines_and_tabs_are_dropped_not_spaced() {
        let n = TextNormalizer::default();
        assert_eq!(n.normalize("dark\nnight\tfell"), "darknightfell");
    }

    #[test]
    fn test_collapses_spacing() {
        let n = TextNormalizer::default();
        assert_eq!(n.normalize("   a  --  b   "), "a b");
    }

    #[test]
    fn test_non_ascii_letters_are_dropped() {
        let n = TextNormalizer::default();
        assert_eq!(n.normalize("Café Über 42"), "caf ber 42");
    }

    #[test]
    fn test_empty_and_symbol_only_input() {
        let n = english();
        assert_eq!(n.normalize(""), "");
        assert_eq!(n.normalize("?!... ;;"), "");
        assert_eq!(n.normalize("the and of"), "");
    }

    #[test]
    fn test_idempotent() {
        let n = english();
        let samples = [
            "This process, however, afforded me no means of ascertaining the dimensions of my dungeon.",
            "  Mixed\tCASE  text -- with   1984 numbers!! ",
            "Don't won't can't; ÀÉÎ õ ü",
            "",
            "...",
        ];
        for s in samples {
            let once = n.normalize(s);
            assert_eq!(n.normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn test_output_alphabet() {
        let n = english();
        let samples = [
            "Hello, World!",
            "  leading and trailing  ",
            "tabs\tand\nnewlines\r\n",
            "Ünïcödé ßtraße 12",
            "The quick brown fox. Jumps over the lazy dog. ",
        ];
        for s in samples {
            let out = n.normalize(s);
            assert!(is_clean(&out), "unexpected output {out:?} for {s:?}");
        }
    }
}
