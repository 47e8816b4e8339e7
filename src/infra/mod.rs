// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches the artifacts directory:
//
//   corpus_file.rs     — The trainer's input file
//                        One normalised corpus unit per line,
//                        written before training starts.
//
//   tokenizer_store.rs — Vocabulary persistence
//                        Trains the BPE vocabulary with the
//                        fixed reserved ids, saves it, and
//                        reloads it so training and inference
//                        encode with the same pieces.
//
//   manifest.rs        — Run manifest
//                        Pipeline config, run summary and the
//                        encoded records as JSON lines.

/// Corpus hand-off file for the vocabulary trainer
pub mod corpus_file;

/// Vocabulary training, saving, and loading
pub mod tokenizer_store;

/// Config, summary and record persistence
pub mod manifest;
