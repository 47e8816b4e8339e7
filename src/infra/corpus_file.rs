// ============================================================
// Layer 6 — Corpus File
// ============================================================
// The plain-text hand-off between corpus construction and the
// vocabulary trainer: one corpus unit per line, UTF-8, in corpus
// order. Normalised units never contain a newline, so every
// line maps back to exactly one unit (empty units become empty
// lines).

use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::data::corpus::Corpus;

pub struct CorpusFile {
    path: PathBuf,
}

impl CorpusFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the whole corpus, replacing any previous file.
    /// Returns once the file is flushed to disk.
    pub fn write(&self, corpus: &Corpus) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create '{}'", parent.display()))?;
        }

        let file = File::create(&self.path)
            .with_context(|| format!("Cannot create corpus file '{}'", self.path.display()))?;
        let mut out = BufWriter::new(file);

        for text in corpus.texts() {
            writeln!(out, "{text}")?;
        }
        out.flush()
            .with_context(|| format!("Cannot flush corpus file '{}'", self.path.display()))?;

        tracing::debug!(
            "Wrote {} corpus lines to '{}'",
            corpus.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Read the lines back, in order.
    pub fn read_lines(&self) -> Result<Vec<String>> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read corpus file '{}'", self.path.display()))?;
        Ok(text.lines().map(str::to_owned).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::CorpusUnit;

    fn corpus(texts: &[&str]) -> Corpus {
        Corpus::new(
            texts
                .iter()
                .map(|t| CorpusUnit { text: t.to_string(), label: None, row_id: None })
                .collect(),
        )
    }

    #[test]
    fn test_one_unit_per_line() {
        let dir  = tempfile::tempdir().unwrap();
        let file = CorpusFile::new(dir.path().join("nested").join("spm_input.txt"));
        file.write(&corpus(&["hello world", "", "bye now"])).unwrap();

        let raw = fs::read_to_string(file.path()).unwrap();
        assert_eq!(raw, "hello world\n\nbye now\n");
        assert_eq!(file.read_lines().unwrap(), vec!["hello world", "", "bye now"]);
    }

    #[test]
    fn test_rewrite_replaces_contents() {
        let dir  = tempfile::tempdir().unwrap();
        let file = CorpusFile::new(dir.path().join("spm_input.txt"));
        file.write(&corpus(&["a", "b", "c"])).unwrap();
        file.write(&corpus(&["d"])).unwrap();
        assert_eq!(file.read_lines().unwrap(), vec!["d"]);
    }
}
