// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with `clap`.
// All pipeline logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `prepare` — build records and fit the vocabulary
//   2. `encode`  — encode a passage with a saved vocabulary

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, EncodeArgs, PrepareArgs};

#[derive(Parser, Debug)]
#[command(
    name = "author-text-prep",
    version,
    about = "Prepare authorship-attribution text: normalise, segment, fit a BPE vocabulary and encode."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Route the subcommand to its use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Prepare(args) => run_prepare(args),
            Commands::Encode(args)  => run_encode(args),
        }
    }
}

fn run_prepare(args: PrepareArgs) -> Result<()> {
    use crate::application::prepare_use_case::PrepareUseCase;

    let use_case = PrepareUseCase::new(args.into());
    let summary  = use_case.execute()?;

    println!(
        "Prepared {} {} records ({} vocabulary pieces, {} authors) in '{}'",
        summary.records,
        summary.mode,
        summary.vocab_size,
        summary.authors.len(),
        use_case.config().artifacts_dir
    );
    Ok(())
}

fn run_encode(args: EncodeArgs) -> Result<()> {
    use crate::application::encode_use_case::EncodeUseCase;

    let use_case = EncodeUseCase::new(&args.artifacts_dir)?;
    for unit in use_case.encode(&args.text)? {
        println!("{:?}\t{:?}", unit.text, unit.record.token_ids);
    }
    Ok(())
}
