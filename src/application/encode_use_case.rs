// ============================================================
// Layer 2 — Encode Use Case
// ============================================================
// Reloads the artifacts of a previous `prepare` run and encodes
// ad-hoc text exactly as the pipeline would:
//
//   1. Read pipeline_config.json (stopwords, separation)
//   2. Load train_vocab.json (never retrained)
//   3. Normalise + segment the text, encode each unit
//
// Useful for checking what the model will actually see for a
// given passage.

use anyhow::Result;
use std::path::Path;

use crate::application::prepare_use_case::PipelineConfig;
use crate::data::{corpus::CorpusBuilder, encoder::Encoder, preprocessor::TextNormalizer};
use crate::domain::{record::EncodedRecord, row::TestRow};
use crate::infra::{manifest::RunManifest, tokenizer_store::{TokenizerStore, Vocabulary}};

/// Row id given to text passed on the command line
const INPUT_ROW_ID: &str = "input";

/// One encoded unit of the input text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedUnit {
    pub text:   String,
    pub record: EncodedRecord,
}

pub struct EncodeUseCase {
    config:     PipelineConfig,
    normalizer: TextNormalizer,
    vocab:      Vocabulary,
}

impl EncodeUseCase {
    pub fn new(artifacts_dir: impl AsRef<Path>) -> Result<Self> {
        let dir        = artifacts_dir.as_ref();
        let config     = RunManifest::new(dir)?.load_config()?;
        let normalizer = TextNormalizer::new(config.stopwords.load()?);
        let vocab      = TokenizerStore::new(dir).load()?;

        tracing::info!(
            "Loaded vocabulary of {} pieces from '{}'",
            vocab.size(),
            vocab.model_path().display()
        );
        Ok(Self { config, normalizer, vocab })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn encode(&self, text: &str) -> Result<Vec<EncodedUnit>> {
        let corpus = CorpusBuilder::new(&self.normalizer)
            .build(&[TestRow::new(INPUT_ROW_ID, text)], self.config.separation);
        let records = Encoder::new(&self.vocab)?.encode_unlabelled(&corpus)?;

        Ok(corpus
            .texts()
            .zip(records)
            .map(|(text, record)| EncodedUnit { text: text.to_owned(), record })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::prepare_use_case::{PrepareUseCase, StopwordSource};
    use std::fs;

    #[test]
    fn test_encodes_with_saved_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("train.csv"),
            "text,author\n\"Hello world. Bye now.\",eap\n\"The raven\",hpl\n",
        )
        .unwrap();

        let artifacts = dir.path().join("artifacts");
        let cfg = PipelineConfig {
            train_csv:     dir.path().join("train.csv").display().to_string(),
            artifacts_dir: artifacts.display().to_string(),
            vocab_size:    15,
            stopwords:     StopwordSource::English,
            ..Default::default()
        };
        PrepareUseCase::new(cfg).execute().unwrap();
        let training = RunManifest::new(&artifacts).unwrap().load_records().unwrap();

        let use_case = EncodeUseCase::new(&artifacts).unwrap();
        let units    = use_case.encode("Hello, the World. Bye.").unwrap();

        assert_eq!(units.len(), 2);
        assert_eq!(units[0].text, "hello world");
        assert_eq!(units[1].text, "bye");
        // "hello world" is also the first training unit
        assert_eq!(units[0].record.token_ids, training[0].token_ids);
        assert!(units.iter().all(|u| u.record.label.is_none()));
        assert_eq!(units[0].record.row_id.as_deref(), Some(INPUT_ROW_ID));
    }

    #[test]
    fn test_missing_artifacts_fail() {
        let dir = tempfile::tempdir().unwrap();
        assert!(EncodeUseCase::new(dir.path()).is_err());
    }
}
