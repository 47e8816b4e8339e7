// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from a raw CSV table to indexed, encoded records.
//
// The pipeline flows in this order:
//
//   train.csv / test_x.csv
//       │
//       ▼
//   CsvLoader         → reads rows (text, author, index)
//       │
//       ▼
//   TextNormalizer    → lowercases, strips symbols, drops stopwords
//       │
//       ▼
//   CorpusBuilder     → whole documents or ". "-split sentences
//       │
//       ▼
//   (vocabulary fit)  → infra::tokenizer_store, training split only
//       │
//       ▼
//   Encoder           → token ids + [BOS] decoder seed (+ label)
//       │
//       ▼
//   RecordStore       → implements Burn's Dataset trait
//
// Batching, padding and shuffling belong to the training loop.

/// Loads CSV tables into typed rows
pub mod loader;

/// Injected stopword sets
pub mod stopwords;

/// Cleans and normalises raw text
pub mod preprocessor;

/// Segments rows into corpus units
pub mod corpus;

/// Author name ↔ class id mapping
pub mod labels;

/// Turns corpus units into encoded records
pub mod encoder;

/// Implements Burn's Dataset trait over encoded records
pub mod dataset;
