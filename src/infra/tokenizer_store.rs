// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Fits, saves and reloads the subword vocabulary.
//
// The vocabulary is a HuggingFace `tokenizers` BPE model with a
// Metaspace pre-tokenizer, so spaces are folded into pieces
// ("▁hello") the same way a SentencePiece BPE model does it.
//
// Reserved ids are fixed:
//
//   0 [PAD]   1 [UNK]   2 [BOS]   3 [EOS]
//   4 [SEP]   5 [CLS]   6 [MASK]
//
// The BPE trainer inserts its special tokens first and in
// order, so passing RESERVED_TOKENS as the special-token list
// pins these ids. The total vocabulary size is the requested
// size plus the seven reserved slots. Training fails when the
// result is larger than that total; a corpus with too few merges
// may come in under it.
//
// Training input lines longer than `max_sentence_length` bytes
// (default 20) are skipped, not truncated and not raised.
//
// Files written to the artifacts directory:
//   train_vocab.json   — the full tokenizer, reloadable
//   train_vocab.vocab  — "piece<TAB>id" listing ordered by id

use anyhow::{anyhow, bail, Context, Result};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tokenizers::decoders::DecoderWrapper;
use tokenizers::models::bpe::{BpeTrainerBuilder, BPE};
use tokenizers::normalizers::NormalizerWrapper;
use tokenizers::pre_tokenizers::metaspace::Metaspace;
use tokenizers::pre_tokenizers::PreTokenizerWrapper;
use tokenizers::processors::PostProcessorWrapper;
use tokenizers::{AddedToken, Tokenizer, TokenizerBuilder, TokenizerImpl};

use crate::domain::traits::SubwordVocabulary;
use crate::infra::corpus_file::CorpusFile;

pub const PAD:  &str = "[PAD]";
pub const UNK:  &str = "[UNK]";
pub const BOS:  &str = "[BOS]";
pub const EOS:  &str = "[EOS]";
pub const SEP:  &str = "[SEP]";
pub const CLS:  &str = "[CLS]";
pub const MASK: &str = "[MASK]";

/// Reserved pieces in id order: index == id.
pub const RESERVED_TOKENS: [&str; 7] = [PAD, UNK, BOS, EOS, SEP, CLS, MASK];

pub const DEFAULT_MAX_SENTENCE_LENGTH: usize = 20;

pub const MODEL_FILE:   &str = "train_vocab.json";
pub const LISTING_FILE: &str = "train_vocab.vocab";

type BpeTokenizer =
    TokenizerImpl<BPE, NormalizerWrapper, PreTokenizerWrapper, PostProcessorWrapper, DecoderWrapper>;

/// What the trainer did with the corpus file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TrainingStats {
    pub lines_read:    usize,
    pub lines_used:    usize,
    pub lines_skipped: usize,
}

/// A fitted, read-only vocabulary.
#[derive(Debug)]
pub struct Vocabulary {
    tokenizer:  Tokenizer,
    model_path: PathBuf,
    training:   Option<TrainingStats>,
}

impl Vocabulary {
    /// Load a saved vocabulary and check its reserved ids.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let tokenizer = Tokenizer::from_file(path).map_err(|e| {
            anyhow!("Cannot load vocabulary from '{}': {}", path.display(), e)
        })?;

        let vocab = Self {
            tokenizer,
            model_path: path.to_path_buf(),
            training:   None,
        };
        vocab.check_reserved_ids()?;
        Ok(vocab)
    }

    /// Total number of pieces, reserved tokens included
    pub fn size(&self) -> usize {
        self.tokenizer.get_vocab_size(true)
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    /// Present when this instance was produced by a fit in this process
    pub fn training_stats(&self) -> Option<TrainingStats> {
        self.training
    }

    fn check_reserved_ids(&self) -> Result<()> {
        for (expected, piece) in RESERVED_TOKENS.iter().enumerate() {
            match self.tokenizer.token_to_id(piece) {
                Some(id) if id as usize == expected => {}
                Some(id) => bail!("Reserved piece {piece} has id {id}, expected {expected}"),
                None     => bail!("Reserved piece {piece} is missing from the vocabulary"),
            }
        }
        Ok(())
    }
}

impl SubwordVocabulary for Vocabulary {
    fn encode_as_ids(&self, text: &str) -> Result<Vec<u32>> {
        let encoding = self
            .tokenizer
            .encode(text, false)
            .map_err(|e| anyhow!("Cannot encode {text:?}: {e}"))?;
        Ok(encoding.get_ids().to_vec())
    }

    fn piece_to_id(&self, piece: &str) -> Option<u32> {
        self.tokenizer.token_to_id(piece)
    }
}

/// Trains the vocabulary and owns the artifacts directory.
pub struct TokenizerStore {
    dir:                 PathBuf,
    max_sentence_length: usize,
}

impl TokenizerStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir:                 dir.as_ref().to_path_buf(),
            max_sentence_length: DEFAULT_MAX_SENTENCE_LENGTH,
        }
    }

    /// Override the per-line byte cap applied to training input
    pub fn with_max_sentence_length(mut self, max_sentence_length: usize) -> Self {
        self.max_sentence_length = max_sentence_length;
        self
    }

    pub fn model_path(&self) -> PathBuf {
        self.dir.join(MODEL_FILE)
    }

    pub fn listing_path(&self) -> PathBuf {
        self.dir.join(LISTING_FILE)
    }

    /// Requested size plus the reserved slots
    pub fn total_vocab_size(requested: usize) -> usize {
        requested + RESERVED_TOKENS.len()
    }

    /// Load the vocabulary saved by a previous `fit`.
    pub fn load(&self) -> Result<Vocabulary> {
        Vocabulary::load(self.model_path())
    }

    /// Train a BPE vocabulary on the corpus file, save it, and
    /// load it back as a `Vocabulary`.
    pub fn fit(&self, corpus_file: &CorpusFile, requested_vocab_size: usize) -> Result<Vocabulary> {
        if requested_vocab_size == 0 {
            bail!("vocab_size must be positive");
        }

        // ── Step 1: Read the corpus and apply the length cap ──────────────────
        let lines = corpus_file.read_lines()?;
        if lines.is_empty() {
            bail!(
                "Cannot train a vocabulary: corpus file '{}' is empty",
                corpus_file.path().display()
            );
        }

        let kept: Vec<&str> = lines
            .iter()
            .map(String::as_str)
            .filter(|line| line.len() <= self.max_sentence_length)
            .collect();
        let stats = TrainingStats {
            lines_read:    lines.len(),
            lines_used:    kept.len(),
            lines_skipped: lines.len() - kept.len(),
        };

        if stats.lines_skipped > 0 {
            tracing::warn!(
                "Skipped {} of {} corpus lines longer than {} bytes",
                stats.lines_skipped,
                stats.lines_read,
                self.max_sentence_length
            );
        }
        if kept.iter().all(|line| line.trim().is_empty()) {
            bail!(
                "Cannot train a vocabulary: no non-empty corpus line fits within {} bytes",
                self.max_sentence_length
            );
        }

        // ── Step 2: Configure the trainer and an untrained tokenizer ──────────
        let vocab_size = Self::total_vocab_size(requested_vocab_size);
        tracing::info!(
            "Training BPE vocabulary (size={} = {} + {} reserved) on {} lines",
            vocab_size,
            requested_vocab_size,
            RESERVED_TOKENS.len(),
            stats.lines_used
        );

        let mut trainer = BpeTrainerBuilder::new()
            .show_progress(false)
            .vocab_size(vocab_size)
            .min_frequency(0)
            .special_tokens(
                RESERVED_TOKENS
                    .iter()
                    .map(|piece| AddedToken::from(*piece, true))
                    .collect(),
            )
            .build();

        let model = BPE::builder()
            .unk_token(UNK.to_string())
            .build()
            .map_err(|e| anyhow!("Cannot build BPE model: {e}"))?;

        let mut tokenizer = TokenizerBuilder::<
            BPE,
            NormalizerWrapper,
            PreTokenizerWrapper,
            PostProcessorWrapper,
            DecoderWrapper,
        >::new()
        .with_model(model)
        .with_normalizer(None)
        .with_pre_tokenizer(Some(PreTokenizerWrapper::Metaspace(Metaspace::default())))
        .with_post_processor(None)
        .with_decoder(Some(DecoderWrapper::Metaspace(Metaspace::default())))
        .build()
        .map_err(|e| anyhow!("Cannot assemble tokenizer: {e}"))?;

        // ── Step 3: Train ─────────────────────────────────────────────────────
        tokenizer
            .train(&mut trainer, kept.into_iter())
            .map_err(|e| anyhow!("BPE training failed: {e}"))?;

        // ── Step 4: Enforce the size budget ──────────────────────────────────
        // The trainer keeps the whole initial alphabet, so it can overshoot;
        // ids past `vocab_size` would fall outside a model's embedding table.
        let trained_size = tokenizer.get_vocab_size(true);
        if trained_size > vocab_size {
            bail!(
                "Trained vocabulary has {} pieces but only {} were allowed \
                 ({} requested + {} reserved); the corpus alphabet is too large \
                 for the requested size",
                trained_size,
                vocab_size,
                requested_vocab_size,
                RESERVED_TOKENS.len()
            );
        }
        if trained_size < vocab_size {
            tracing::warn!(
                "Corpus ran out of merges: vocabulary has {} of {} pieces",
                trained_size,
                vocab_size
            );
        }

        // ── Step 5: Save model and listing, reload ────────────────────────────
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;
        self.save(&tokenizer)?;

        let mut vocab = self.load()?;
        vocab.training = Some(stats);

        tracing::info!(
            "Vocabulary trained with {} pieces, saved to '{}'",
            vocab.size(),
            vocab.model_path().display()
        );
        Ok(vocab)
    }

    fn save(&self, tokenizer: &BpeTokenizer) -> Result<()> {
        let model_path = self.model_path();
        tokenizer
            .save(&model_path, true)
            .map_err(|e| anyhow!("Cannot write '{}': {}", model_path.display(), e))?;

        let mut pieces: Vec<(String, u32)> = tokenizer.get_vocab(true).into_iter().collect();
        pieces.sort_by_key(|(_, id)| *id);

        let listing_path = self.listing_path();
        let file = File::create(&listing_path)
            .with_context(|| format!("Cannot create '{}'", listing_path.display()))?;
        let mut out = BufWriter::new(file);
        for (piece, id) in &pieces {
            writeln!(out, "{piece}\t{id}")?;
        }
        out.flush()?;

        tracing::debug!(
            "Saved {} and {} ({} pieces)",
            model_path.display(),
            listing_path.display(),
            pieces.len()
        );
        Ok(())
    }
}
