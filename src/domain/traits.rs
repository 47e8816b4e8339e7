// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The seams between the pipeline stages:
//
//   RowSource         — anything that yields table rows
//                       (CsvLoader reads them from disk)
//   CorpusRow         — what the corpus builder needs from a row
//                       (RawRow and TestRow both implement it)
//   SubwordVocabulary — a fitted tokenizer's encode contract
//                       (Vocabulary wraps a trained BPE model;
//                       tests substitute a tiny fake)

use anyhow::Result;

// ─── RowSource ────────────────────────────────────────────────────────────────
/// Any component that can load a full table of rows of type `R`.
pub trait RowSource<R> {
    /// Load every row, in table order.
    fn load_all(&self) -> Result<Vec<R>>;
}

// ─── CorpusRow ────────────────────────────────────────────────────────────────
/// A row the corpus builder can segment.
pub trait CorpusRow {
    /// Raw text before normalisation
    fn text(&self) -> &str;

    /// Label propagated to every unit cut from this row
    fn label(&self) -> Option<&str>;

    /// Identifier propagated to every unit cut from this row
    fn row_id(&self) -> Option<&str>;
}

// ─── SubwordVocabulary ────────────────────────────────────────────────────────
/// A fitted, read-only subword vocabulary.
///
/// Implementations must be total over normalised text: the empty
/// string encodes to an empty (or minimal) sequence, not an error.
pub trait SubwordVocabulary {
    /// Segment `text` into pieces and return their ids.
    fn encode_as_ids(&self, text: &str) -> Result<Vec<u32>>;

    /// Id of an exact piece, `None` if the piece is unknown.
    fn piece_to_id(&self, piece: &str) -> Option<u32>;
}
