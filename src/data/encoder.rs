// ============================================================
// Layer 4 — Encoder
// ============================================================
// Maps every CorpusUnit to an EncodedRecord using a fitted
// vocabulary:
//
//   token_ids    = vocab.encode_as_ids(unit.text)
//   decoder_seed = vocab.piece_to_id("[BOS]")
//
// The seed is resolved once when the encoder is created and is
// the same for every record. Labelled encoding attaches the
// unit's author label; unlabelled encoding leaves it out.

use anyhow::{anyhow, bail, Result};

use crate::data::corpus::Corpus;
use crate::data::labels::LabelCodec;
use crate::domain::record::{CorpusUnit, EncodedRecord};
use crate::domain::traits::SubwordVocabulary;
use crate::infra::tokenizer_store::BOS;

pub struct Encoder<'v, V: SubwordVocabulary> {
    vocab:        &'v V,
    decoder_seed: u32,
}

impl<'v, V: SubwordVocabulary> Encoder<'v, V> {
    /// Fails if the vocabulary has no `[BOS]` piece.
    pub fn new(vocab: &'v V) -> Result<Self> {
        let decoder_seed = vocab
            .piece_to_id(BOS)
            .ok_or_else(|| anyhow!("Vocabulary has no {BOS} piece"))?;
        Ok(Self { vocab, decoder_seed })
    }

    pub fn decoder_seed(&self) -> u32 {
        self.decoder_seed
    }

    /// Encode a training corpus, attaching each unit's label.
    pub fn encode_labelled(&self, corpus: &Corpus, codec: &LabelCodec) -> Result<Vec<EncodedRecord>> {
        corpus
            .units()
            .iter()
            .enumerate()
            .map(|(i, unit)| {
                let Some(author) = unit.label.as_deref() else {
                    bail!("Corpus unit {i} has no author label");
                };
                let label = codec
                    .label(author)
                    .ok_or_else(|| anyhow!("Author '{author}' is not in the label set"))?;

                let mut record = self.encode_unit(unit)?;
                record.label = Some(label);
                Ok(record)
            })
            .collect()
    }

    /// Encode an inference corpus. Records never carry a label.
    pub fn encode_unlabelled(&self, corpus: &Corpus) -> Result<Vec<EncodedRecord>> {
        corpus.units().iter().map(|unit| self.encode_unit(unit)).collect()
    }

    fn encode_unit(&self, unit: &CorpusUnit) -> Result<EncodedRecord> {
        Ok(EncodedRecord {
            token_ids:    self.vocab.encode_as_ids(&unit.text)?,
            decoder_seed: self.decoder_seed,
            label:        None,
            row_id:       unit.row_id.clone(),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::infra::tokenizer_store::RESERVED_TOKENS;
    use std::collections::HashMap;

    /// Whole-word vocabulary: reserved tokens first, then each
    /// distinct word in order of appearance. Unknown words map to 1.
    pub(crate) struct FakeVocab {
        ids: HashMap<String, u32>,
    }

    impl FakeVocab {
        pub(crate) fn new(words: &[&str]) -> Self {
            let mut ids = HashMap::new();
            for piece in RESERVED_TOKENS.iter().chain(words) {
                let next = ids.len() as u32;
                ids.entry(piece.to_string()).or_insert(next);
            }
            Self { ids }
        }
    }

    impl SubwordVocabulary for FakeVocab {
        fn encode_as_ids(&self, text: &str) -> Result<Vec<u32>> {
            Ok(text
                .split_whitespace()
                .map(|w| self.ids.get(w).copied().unwrap_or(1))
                .collect())
        }

        fn piece_to_id(&self, piece: &str) -> Option<u32> {
            self.ids.get(piece).copied()
        }
    }

    fn unit(text: &str, label: Option<&str>) -> CorpusUnit {
        CorpusUnit {
            text:   text.into(),
            label:  label.map(Into::into),
            row_id: None,
        }
    }

    #[test]
    fn test_labelled_encoding() {
        let vocab  = FakeVocab::new(&["hello", "world", "bye"]);
        let corpus = Corpus::new(vec![unit("hello world", Some("eap")), unit("bye ghost", Some("hpl"))]);
        let codec  = LabelCodec::from_corpus(&corpus);

        let records = Encoder::new(&vocab).unwrap().encode_labelled(&corpus, &codec).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].token_ids, vec![7, 8]);
        assert_eq!(records[1].token_ids, vec![9, 1]);
        assert_eq!(records[0].label.as_ref().unwrap().author, "eap");
        assert_eq!(records[1].label.as_ref().unwrap().class_id, 1);
    }

    #[test]
    fn test_decoder_seed_is_bos_everywhere() {
        let vocab   = FakeVocab::new(&["a"]);
        let corpus  = Corpus::new(vec![unit("a", None), unit("", None), unit("a a", None)]);
        let records = Encoder::new(&vocab).unwrap().encode_unlabelled(&corpus).unwrap();
        assert!(records.iter().all(|r| r.decoder_seed == 2));
    }

    #[test]
    fn test_unlabelled_encoding_omits_label() {
        let vocab   = FakeVocab::new(&["a"]);
        let corpus  = Corpus::new(vec![unit("a", Some("eap"))]);
        let records = Encoder::new(&vocab).unwrap().encode_unlabelled(&corpus).unwrap();
        assert!(records[0].label.is_none());
    }

    #[test]
    fn test_empty_unit_encodes_to_empty_ids() {
        let vocab   = FakeVocab::new(&[]);
        let corpus  = Corpus::new(vec![unit("", None)]);
        let records = Encoder::new(&vocab).unwrap().encode_unlabelled(&corpus).unwrap();
        assert!(records[0].token_ids.is_empty());
    }

    #[test]
    fn test_missing_label_in_training_corpus_is_an_error() {
        let vocab  = FakeVocab::new(&[]);
        let corpus = Corpus::new(vec![unit("x", Some("eap")), unit("y", None)]);
        let codec  = LabelCodec::from_corpus(&corpus);
        assert!(Encoder::new(&vocab).unwrap().encode_labelled(&corpus, &codec).is_err());
    }
}
