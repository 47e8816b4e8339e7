// ============================================================
// Layer 2 — PrepareUseCase
// ============================================================
// Orchestrates the full preparation pipeline in order:
//
//   Step 1: Load the training table        (Layer 4 - data)
//   Step 2: Normalise + segment into units (Layer 4 - data)
//   Step 3: Write corpus file, fit vocab   (Layer 6 - infra)
//   Step 4: Encode the training records    (Layer 4 - data)
//   Step 5: Inference mode only: load the
//           test table, encode it with the
//           same vocabulary                (Layer 4 - data)
//   Step 6: Save config, records, summary  (Layer 6 - infra)
//
// Fitting the vocabulary is a separate function
// (`fit_vocabulary`) so it can run, and be tested, on its own.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::{path::Path, sync::Arc};

use crate::data::{
    corpus::{Corpus, CorpusBuilder},
    dataset::RecordStore,
    loader::CsvLoader,
    preprocessor::TextNormalizer,
    stopwords::StopwordSet,
};
use crate::domain::{
    record::PipelineMode,
    row::{RawRow, TestRow},
    traits::RowSource,
};
use crate::infra::{
    corpus_file::CorpusFile,
    manifest::{RunManifest, RunSummary},
    tokenizer_store::{TokenizerStore, Vocabulary, DEFAULT_MAX_SENTENCE_LENGTH},
};

/// File name of the corpus hand-off inside the artifacts directory
pub const CORPUS_FILE: &str = "spm_input.txt";

// ─── Stopword source ──────────────────────────────────────────────────────────
/// Where the normaliser's stopword set comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopwordSource {
    /// Keep every word
    None,

    /// The bundled English list
    #[default]
    English,

    /// A file with one stopword per line
    File(String),
}

impl StopwordSource {
    /// `"none"` and `"english"` are keywords; anything else is a path.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "none"    => StopwordSource::None,
            "english" => StopwordSource::English,
            _         => StopwordSource::File(value.trim().to_string()),
        }
    }

    pub fn load(&self) -> Result<StopwordSet> {
        match self {
            StopwordSource::None       => Ok(StopwordSet::empty()),
            StopwordSource::English    => Ok(StopwordSet::english()),
            StopwordSource::File(path) => StopwordSet::from_file(path),
        }
    }
}

// ─── Pipeline Configuration ──────────────────────────────────────────────────
// Serialisable so it can be saved next to the artifacts and
// reloaded by the `encode` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub train_csv:           String,
    pub test_csv:            String,
    pub artifacts_dir:       String,
    /// Requested vocabulary size, excluding the 7 reserved pieces
    pub vocab_size:          usize,
    pub separation:          bool,
    pub mode:                PipelineMode,
    pub stopwords:           StopwordSource,
    pub max_sentence_length: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            train_csv:           "data/train.csv".to_string(),
            test_csv:            "data/test_x.csv".to_string(),
            artifacts_dir:       "artifacts".to_string(),
            // No sensible default: must be set by the caller
            vocab_size:          0,
            separation:          true,
            mode:                PipelineMode::Train,
            stopwords:           StopwordSource::English,
            max_sentence_length: DEFAULT_MAX_SENTENCE_LENGTH,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.vocab_size == 0 {
            bail!("vocab_size is required and must be positive");
        }
        if self.max_sentence_length == 0 {
            bail!("max_sentence_length must be positive");
        }
        Ok(())
    }
}

/// Persist `corpus` as the trainer's input file and fit a vocabulary on it.
/// Runs once per pipeline, on the training corpus only.
pub fn fit_vocabulary(corpus: &Corpus, cfg: &PipelineConfig) -> Result<Vocabulary> {
    let artifacts   = Path::new(&cfg.artifacts_dir);
    let corpus_file = CorpusFile::new(artifacts.join(CORPUS_FILE));

    // The file must be complete before training reads it
    corpus_file.write(corpus)?;

    TokenizerStore::new(artifacts)
        .with_max_sentence_length(cfg.max_sentence_length)
        .fit(&corpus_file, cfg.vocab_size)
}

// ─── PrepareUseCase ───────────────────────────────────────────────────────────
pub struct PrepareUseCase {
    config: PipelineConfig,
}

impl PrepareUseCase {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline and return the populated record store.
    /// Nothing but the corpus file and vocabulary is written.
    pub fn build_store(&self) -> Result<RecordStore> {
        let cfg = &self.config;
        cfg.validate()?;

        // ── Step 1: Load the training table ──────────────────────────────────
        tracing::info!("Loading training table '{}'", cfg.train_csv);
        let rows: Vec<RawRow> = CsvLoader::new(&cfg.train_csv).load_all()?;

        // ── Step 2: Normalise and segment ────────────────────────────────────
        let normalizer = TextNormalizer::new(cfg.stopwords.load()?);
        let builder    = CorpusBuilder::new(&normalizer);
        let corpus     = builder.build(&rows, cfg.separation);

        // ── Step 3: Fit the vocabulary (once) ────────────────────────────────
        let vocab = Arc::new(fit_vocabulary(&corpus, cfg)?);

        // ── Step 4: Encode the training records ──────────────────────────────
        let store = RecordStore::from_vocabulary(vocab, &corpus)?;

        if cfg.mode == PipelineMode::Train {
            return Ok(store);
        }

        // ── Step 5: Inference split, same vocabulary ─────────────────────────
        tracing::info!("Loading inference table '{}'", cfg.test_csv);
        let test_rows: Vec<TestRow> = CsvLoader::new(&cfg.test_csv).load_all()?;
        let test_corpus = builder.build(&test_rows, cfg.separation);

        store.into_inference(&test_corpus)
    }

    /// Run the pipeline and persist config, records and summary.
    pub fn execute(&self) -> Result<RunSummary> {
        let store = self.build_store()?;

        // ── Step 6: Persist ──────────────────────────────────────────────────
        let manifest = RunManifest::new(&self.config.artifacts_dir)?;
        manifest.save_config(&self.config)?;
        manifest.save_records(store.records())?;

        let summary = RunSummary {
            mode:       store.mode(),
            records:    store.size(),
            vocab_size: store.vocabulary().size(),
            authors:    store.label_codec().authors().to_vec(),
            training:   store.vocabulary().training_stats(),
        };
        manifest.save_summary(&summary)?;

        tracing::info!(
            "Prepared {} {} records in '{}'",
            summary.records,
            summary.mode,
            manifest.dir().display()
        );
        Ok(summary)
    }
}
