// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain structs, enums and traits describing what the pipeline
// works with: table rows, corpus units, encoded records and the
// vocabulary contract.
//
// Rules for this layer:
//   - NO file I/O
//   - NO tokenizer library types
//   - NO Burn types
//
// Everything here can be unit tested without touching disk.

// Rows of the training and inference tables
pub mod row;

// Corpus units, encoded records and the pipeline mode
pub mod record;

// Core abstractions (traits) that other layers implement
pub mod traits;
