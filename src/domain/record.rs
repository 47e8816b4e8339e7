// ============================================================
// Layer 3 — Corpus and Record Domain Types
// ============================================================
// The two shapes a piece of text takes on its way through
// the pipeline:
//
//   CorpusUnit    — normalised text span, plus the label and
//                   row identifier inherited from its parent row
//   EncodedRecord — the token ids of one CorpusUnit, the
//                   decoder seed id, and (train mode only) the label
//
// EncodedRecords are built once at load time and never mutated.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which split a record store currently serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineMode {
    /// Labelled training records
    #[default]
    Train,

    /// Unlabelled records from the test table
    Inference,
}

impl fmt::Display for PipelineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineMode::Train     => write!(f, "train"),
            PipelineMode::Inference => write!(f, "inference"),
        }
    }
}

/// One training unit: an entire document or one sentence fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusUnit {
    /// Normalised text, `[a-z0-9 ]` only. May be empty.
    pub text: String,

    /// Author of the parent row; `None` for inference rows
    pub label: Option<String>,

    /// Identifier of the parent row, when the table has one
    pub row_id: Option<String>,
}

/// A categorical author label together with its integer class id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorLabel {
    pub author:   String,
    pub class_id: usize,
}

/// One encoded record, as handed to the training loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedRecord {
    /// Encoder input: the subword ids of the unit's text
    pub token_ids: Vec<u32>,

    /// The `[BOS]` id, identical for every record
    pub decoder_seed: u32,

    /// Present in train mode, absent (not null) in inference mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<AuthorLabel>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_id: Option<String>,
}
