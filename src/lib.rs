//! Prepare authorship-attribution text for a sequence model.
//!
//! A CSV corpus is normalised, optionally split into sentences,
//! used to fit a BPE vocabulary with fixed reserved ids, and
//! encoded into records served through Burn's `Dataset` trait.
//!
//! ```no_run
//! use author_text_prep::application::prepare_use_case::{PipelineConfig, PrepareUseCase};
//! use burn::data::dataset::Dataset;
//!
//! let cfg = PipelineConfig { vocab_size: 8000, ..Default::default() };
//! let store = PrepareUseCase::new(cfg).build_store()?;
//! let first = store.get(0);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod infra;
