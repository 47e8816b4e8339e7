// ============================================================
// Layer 4 — Record Store
// ============================================================
// The indexed record accessor handed to the training loop.
// Implements Burn's `Dataset` trait: `len()` plus `get(index)`.
//
// Lifecycle (one way only):
//
//   RecordStore::from_vocabulary(..)   → training-loaded
//   store.into_inference(test_corpus)  → inference-loaded
//
// The inference transition re-encodes a test corpus with the
// vocabulary already held by the store, replaces the queryable
// records and drops the training labels. The vocabulary itself
// is never refitted or mutated.

use anyhow::Result;
use burn::data::dataset::Dataset;
use std::sync::Arc;

use crate::data::corpus::Corpus;
use crate::data::encoder::Encoder;
use crate::data::labels::LabelCodec;
use crate::domain::record::{AuthorLabel, EncodedRecord, PipelineMode};
use crate::domain::traits::SubwordVocabulary;
use crate::infra::tokenizer_store::Vocabulary;

pub struct RecordStore<V = Vocabulary> {
    mode:    PipelineMode,
    vocab:   Arc<V>,
    codec:   LabelCodec,
    records: Vec<EncodedRecord>,
    /// Parallel to `records` in train mode, empty in inference mode
    labels:  Vec<AuthorLabel>,
}

impl<V: SubwordVocabulary> RecordStore<V> {
    /// Build a training store from an already-fitted vocabulary.
    pub fn from_vocabulary(vocab: Arc<V>, corpus: &Corpus) -> Result<Self> {
        let codec   = LabelCodec::from_corpus(corpus);
        let records = Encoder::new(vocab.as_ref())?.encode_labelled(corpus, &codec)?;
        let labels  = records.iter().filter_map(|r| r.label.clone()).collect();

        tracing::info!(
            "Encoded {} training records across {} authors",
            records.len(),
            codec.len()
        );

        Ok(Self {
            mode: PipelineMode::Train,
            vocab,
            codec,
            records,
            labels,
        })
    }

    /// Switch to inference: encode `test_corpus` with the fitted
    /// vocabulary and make it the store's content.
    pub fn into_inference(self, test_corpus: &Corpus) -> Result<Self> {
        let records = Encoder::new(self.vocab.as_ref())?.encode_unlabelled(test_corpus)?;

        tracing::info!(
            "Switched to inference: {} training records replaced by {} test records",
            self.records.len(),
            records.len()
        );

        Ok(Self {
            mode:    PipelineMode::Inference,
            vocab:   self.vocab,
            codec:   self.codec,
            records,
            labels:  Vec::new(),
        })
    }

    /// Number of records currently held.
    ///
    /// # Panics
    /// In train mode, if the label count differs from the record count.
    pub fn size(&self) -> usize {
        if self.mode == PipelineMode::Train {
            assert_eq!(
                self.labels.len(),
                self.records.len(),
                "label count must equal record count in train mode"
            );
        }
        self.records.len()
    }

    /// Borrow the record at `index`; `None` when out of range.
    pub fn record(&self, index: usize) -> Option<&EncodedRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[EncodedRecord] {
        &self.records
    }

    pub fn labels(&self) -> &[AuthorLabel] {
        &self.labels
    }

    pub fn mode(&self) -> PipelineMode {
        self.mode
    }

    pub fn vocabulary(&self) -> &Arc<V> {
        &self.vocab
    }

    /// The author ↔ class id mapping seen at training time.
    /// Kept across the inference transition so predictions can be
    /// mapped back to author names.
    pub fn label_codec(&self) -> &LabelCodec {
        &self.codec
    }
}

impl<V> Dataset<EncodedRecord> for RecordStore<V>
where
    V: SubwordVocabulary + Send + Sync,
{
    fn get(&self, index: usize) -> Option<EncodedRecord> {
        self.records.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::corpus::CorpusBuilder;
    use crate::data::encoder::tests::FakeVocab;
    use crate::data::preprocessor::TextNormalizer;
    use crate::domain::row::{RawRow, TestRow};

    fn vocab() -> Arc<FakeVocab> {
        Arc::new(FakeVocab::new(&["hello", "world", "bye", "now", "raven"]))
    }

    fn train_corpus() -> Corpus {
        let normalizer = TextNormalizer::default();
        CorpusBuilder::new(&normalizer).build(
            &[
                RawRow::new("Hello world. Bye now.", "eap"),
                RawRow::new("The raven", "hpl"),
            ],
            true,
        )
    }

    #[test]
    fn test_end_to_end_example() {
        let normalizer = TextNormalizer::default();
        let corpus = CorpusBuilder::new(&normalizer)
            .build(&[RawRow::new("Hello world. Bye now.", "eap")], true);
        let store = RecordStore::from_vocabulary(vocab(), &corpus).unwrap();

        assert_eq!(store.size(), 2);
        assert_eq!(store.len(), 2);
        for i in 0..2 {
            assert_eq!(store.get(i).unwrap().label.unwrap().author, "eap");
        }
    }

    #[test]
    fn test_get_matches_corpus_order() {
        let corpus = train_corpus();
        let store  = RecordStore::from_vocabulary(vocab(), &corpus).unwrap();

        assert_eq!(store.size(), corpus.len());
        for (i, unit) in corpus.units().iter().enumerate() {
            let record   = store.get(i).unwrap();
            let expected = vocab().encode_as_ids(&unit.text).unwrap();
            assert_eq!(record.token_ids, expected);
            assert_eq!(record.label.as_ref().map(|l| l.author.as_str()), unit.label.as_deref());
            assert_eq!(store.labels()[i].author, unit.label.clone().unwrap());
        }
    }

    #[test]
    fn test_out_of_range_is_none() {
        let store = RecordStore::from_vocabulary(vocab(), &train_corpus()).unwrap();
        assert!(store.get(store.size()).is_none());
        assert!(store.record(usize::MAX).is_none());
    }

    #[test]
    fn test_inference_transition_replaces_records() {
        let train = RecordStore::from_vocabulary(vocab(), &train_corpus()).unwrap();
        let shared = Arc::clone(train.vocabulary());

        let normalizer = TextNormalizer::default();
        let test_corpus = CorpusBuilder::new(&normalizer).build(
            &[TestRow::new("0", "Bye world"), TestRow::new("1", "Hello. Raven. Now")],
            true,
        );
        let store = train.into_inference(&test_corpus).unwrap();

        assert_eq!(store.mode(), PipelineMode::Inference);
        assert_eq!(store.size(), 4);
        assert!(store.labels().is_empty());
        assert!(store.iter().all(|r| r.label.is_none()));
        assert_eq!(store.get(0).unwrap().token_ids, vec![9, 8]);
        assert_eq!(store.get(3).unwrap().row_id.as_deref(), Some("1"));
        assert!(Arc::ptr_eq(store.vocabulary(), &shared));
        assert_eq!(store.label_codec().authors(), ["eap", "hpl"]);
    }

    #[test]
    #[should_panic(expected = "label count must equal record count")]
    fn test_label_mismatch_panics_in_train_mode() {
        let mut store = RecordStore::from_vocabulary(vocab(), &train_corpus()).unwrap();
        store.labels.pop();
        store.size();
    }
}
