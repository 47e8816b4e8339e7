// ============================================================
// Layer 4 — Corpus Builder
// ============================================================
// Turns table rows into a flat, ordered list of CorpusUnits.
//
// Two segmentation modes:
//
//   separation = false  → one unit per row (whole document)
//   separation = true   → one unit per sentence fragment
//
// Sentence fragments are cut on the literal delimiter ". "
// (period + space). The cut happens on the row text BEFORE the
// character filter runs, otherwise the filter would have
// already removed every period. Each fragment is then
// normalised on its own.
//
// Every fragment inherits the label and row id of its parent
// row. Empty fragments (e.g. from a trailing ". ") are kept:
// the split is applied literally and downstream stages must
// tolerate empty units.

use crate::data::preprocessor::TextNormalizer;
use crate::domain::record::CorpusUnit;
use crate::domain::traits::CorpusRow;

/// The literal sentence delimiter used in separation mode
pub const SENTENCE_DELIMITER: &str = ". ";

/// An ordered list of training units.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    units: Vec<CorpusUnit>,
}

impl Corpus {
    pub fn new(units: Vec<CorpusUnit>) -> Self {
        Self { units }
    }

    pub fn units(&self) -> &[CorpusUnit] {
        &self.units
    }

    /// The unit texts, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(|u| u.text.as_str())
    }

    /// The propagated labels, one per unit, in order
    pub fn labels(&self) -> impl Iterator<Item = Option<&str>> {
        self.units.iter().map(|u| u.label.as_deref())
    }

    /// True when every unit carries a label
    pub fn is_labelled(&self) -> bool {
        self.units.iter().all(|u| u.label.is_some())
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

pub struct CorpusBuilder<'a> {
    normalizer: &'a TextNormalizer,
}

impl<'a> CorpusBuilder<'a> {
    pub fn new(normalizer: &'a TextNormalizer) -> Self {
        Self { normalizer }
    }

    /// Segment and normalise `rows` into a corpus.
    pub fn build<R: CorpusRow>(&self, rows: &[R], separation: bool) -> Corpus {
        let mut units = Vec::with_capacity(rows.len());

        for row in rows {
            let label  = row.label().map(str::to_owned);
            let row_id = row.row_id().map(str::to_owned);

            if separation {
                for fragment in row.text().split(SENTENCE_DELIMITER) {
                    units.push(CorpusUnit {
                        text:   self.normalizer.normalize(fragment),
                        label:  label.clone(),
                        row_id: row_id.clone(),
                    });
                }
            } else {
                units.push(CorpusUnit {
                    text: self.normalizer.normalize(row.text()),
                    label,
                    row_id,
                });
            }
        }

        tracing::info!(
            "Built corpus: {} rows → {} units (separation={})",
            rows.len(),
            units.len(),
            separation
        );
        Corpus::new(units)
    }
}
