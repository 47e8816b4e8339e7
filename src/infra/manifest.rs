// ============================================================
// Layer 6 — Run Manifest
// ============================================================
// Everything a later process needs to reuse a pipeline run,
// written next to the vocabulary artifacts:
//
//   artifacts/
//     pipeline_config.json  ← the PipelineConfig used for the run
//     summary.json          ← record count, authors, trainer stats
//     records.jsonl         ← one EncodedRecord per line
//
// The `encode` command reads pipeline_config.json back so that
// ad-hoc text is normalised and segmented exactly as the
// training corpus was.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::application::prepare_use_case::PipelineConfig;
use crate::domain::record::{EncodedRecord, PipelineMode};
use crate::infra::tokenizer_store::TrainingStats;

pub const CONFIG_FILE:  &str = "pipeline_config.json";
pub const SUMMARY_FILE: &str = "summary.json";
pub const RECORDS_FILE: &str = "records.jsonl";

/// What a pipeline run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub mode:       PipelineMode,
    pub records:    usize,
    pub vocab_size: usize,
    /// Author names in class-id order
    pub authors:    Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training:   Option<TrainingStats>,
}

pub struct RunManifest {
    dir: PathBuf,
}

impl RunManifest {
    /// Creates the directory if it doesn't already exist.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create artifacts dir '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save_config(&self, cfg: &PipelineConfig) -> Result<()> {
        let path = self.dir.join(CONFIG_FILE);
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved pipeline config to '{}'", path.display());
        Ok(())
    }

    pub fn load_config(&self) -> Result<PipelineConfig> {
        let path = self.dir.join(CONFIG_FILE);
        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "Cannot read config from '{}'. \
                 Make sure you have run 'prepare' first.",
                path.display()
            )
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save_summary(&self, summary: &RunSummary) -> Result<()> {
        let path = self.dir.join(SUMMARY_FILE);
        fs::write(&path, serde_json::to_string_pretty(summary)?)
            .with_context(|| format!("Cannot write summary to '{}'", path.display()))?;
        Ok(())
    }

    pub fn load_summary(&self) -> Result<RunSummary> {
        let path = self.dir.join(SUMMARY_FILE);
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read summary from '{}'", path.display()))?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Write records as JSON lines, in store order.
    pub fn save_records<'a, I>(&self, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a EncodedRecord>,
    {
        let path = self.dir.join(RECORDS_FILE);
        let file = File::create(&path)
            .with_context(|| format!("Cannot create '{}'", path.display()))?;
        let mut out = BufWriter::new(file);

        let mut count = 0;
        for record in records {
            serde_json::to_writer(&mut out, record)?;
            out.write_all(b"\n")?;
            count += 1;
        }
        out.flush()?;

        tracing::debug!("Wrote {} records to '{}'", count, path.display());
        Ok(count)
    }

    pub fn load_records(&self) -> Result<Vec<EncodedRecord>> {
        let path = self.dir.join(RECORDS_FILE);
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read records from '{}'", path.display()))?;

        text.lines()
            .enumerate()
            .map(|(i, line)| {
                serde_json::from_str(line)
                    .with_context(|| format!("Malformed record on line {}", i + 1))
            })
            .collect()
    }
}
