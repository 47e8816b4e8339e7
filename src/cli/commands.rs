// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `prepare` and `encode`, and all
// their flags.
//
// clap's derive macros generate help text, missing-argument
// errors and string → number/bool conversion.

use clap::{Args, Subcommand, ValueEnum};

use crate::application::prepare_use_case::{PipelineConfig, StopwordSource};
use crate::domain::record::PipelineMode;
use crate::infra::tokenizer_store::DEFAULT_MAX_SENTENCE_LENGTH;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalise the tables, fit the vocabulary and write encoded records
    Prepare(PrepareArgs),

    /// Encode a passage with the vocabulary of a previous `prepare` run
    Encode(EncodeArgs),
}

/// Which split the prepared records should serve
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    Train,
    Inference,
}

impl From<ModeArg> for PipelineMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Train     => PipelineMode::Train,
            ModeArg::Inference => PipelineMode::Inference,
        }
    }
}

/// All arguments for the `prepare` command.
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Training table with `text` and `author` columns
    #[arg(long, default_value = "data/train.csv")]
    pub train_csv: String,

    /// Inference table with `index` and `text` columns
    #[arg(long, default_value = "data/test_x.csv")]
    pub test_csv: String,

    /// Where the corpus file, vocabulary and records are written
    #[arg(long, default_value = "artifacts")]
    pub artifacts_dir: String,

    /// Requested vocabulary size; 7 reserved pieces are added on top
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub vocab_size: u64,

    /// Keep whole documents instead of splitting on ". "
    #[arg(long)]
    pub no_separation: bool,

    #[arg(long, value_enum, default_value_t = ModeArg::Train)]
    pub mode: ModeArg,

    /// `english`, `none`, or a path to a file with one word per line
    #[arg(long, default_value = "english")]
    pub stopwords: String,

    /// Training lines longer than this many bytes are skipped
    #[arg(long, default_value_t = DEFAULT_MAX_SENTENCE_LENGTH)]
    pub max_sentence_length: usize,
}

/// Convert CLI PrepareArgs into the application-layer PipelineConfig.
/// The application layer never sees clap types.
impl From<PrepareArgs> for PipelineConfig {
    fn from(a: PrepareArgs) -> Self {
        PipelineConfig {
            train_csv:           a.train_csv,
            test_csv:            a.test_csv,
            artifacts_dir:       a.artifacts_dir,
            vocab_size:          a.vocab_size as usize,
            separation:          !a.no_separation,
            mode:                a.mode.into(),
            stopwords:           StopwordSource::parse(&a.stopwords),
            max_sentence_length: a.max_sentence_length,
        }
    }
}

/// All arguments for the `encode` command
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// The passage to encode
    #[arg(long)]
    pub text: String,

    /// Directory written by `prepare`
    #[arg(long, default_value = "artifacts")]
    pub artifacts_dir: String,
}
