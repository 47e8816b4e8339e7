// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates the other layers to accomplish one
// goal per use case.
//
// Rules for this layer:
//   - No text cleaning or tokenizer code here
//   - No printing here (that's Layer 1)
//   - No direct file access (that's Layer 4 and 6)
//   - Only workflow coordination

// The full preparation pipeline and its configuration
pub mod prepare_use_case;

// Encoding ad-hoc text with a saved vocabulary
pub mod encode_use_case;
