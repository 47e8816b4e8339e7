// ============================================================
// Layer 4 — Table Loader
// ============================================================
// Loads the training and inference tables from CSV using the
// `csv` crate.
//
// Columns are matched by header name through serde, so:
//   - extra columns are ignored
//   - a missing required column (`text`, `author`, `index`)
//     fails the whole load with the row and field named
//   - quoted fields may span several lines
//
// Unlike a directory of documents, a missing table is fatal:
// there is no meaningful corpus to fall back to.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use crate::domain::traits::RowSource;

/// Reads every row of one CSV file.
/// Implements `RowSource<R>` for any serde-deserialisable row type.
pub struct CsvLoader {
    path: PathBuf,
}

impl CsvLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<R: DeserializeOwned> RowSource<R> for CsvLoader {
    fn load_all(&self) -> Result<Vec<R>> {
        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("Cannot open table '{}'", self.path.display()))?;

        let mut rows = Vec::new();
        for (line, record) in reader.deserialize::<R>().enumerate() {
            // +2: one for the header row, one for 1-based numbering
            let row = record.with_context(|| {
                format!(
                    "Malformed row {} in '{}'",
                    line + 2,
                    self.path.display()
                )
            })?;
            rows.push(row);
        }

        tracing::info!(
            "Loaded {} rows from '{}'",
            rows.len(),
            self.path.display()
        );
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::row::{RawRow, TestRow};
    use std::io::Write;

    fn csv_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_loads_training_rows_in_order() {
        let file = csv_file(
            "index,text,author\n\
             0,\"It was dark.\",EAP\n\
             1,\"The moon, it rose.\",HPL\n",
        );
        let rows: Vec<RawRow> = CsvLoader::new(file.path()).load_all().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], RawRow::new("It was dark.", "EAP").with_index("0"));
        assert_eq!(rows[1].text, "The moon, it rose.");
        assert_eq!(rows[1].author, "HPL");
    }

    #[test]
    fn test_index_column_is_optional_for_training() {
        let file = csv_file("text,author\nhello,MWS\n");
        let rows: Vec<RawRow> = CsvLoader::new(file.path()).load_all().unwrap();
        assert_eq!(rows[0].index, None);
    }

    #[test]
    fn test_missing_author_column_is_fatal() {
        let file = csv_file("index,text\n0,hello\n");
        let result: Result<Vec<RawRow>> = CsvLoader::new(file.path()).load_all();
        assert!(result.is_err());
    }

    #[test]
    fn test_loads_inference_rows() {
        let file = csv_file("index,text\n0,\"first\nline\"\n1,second\n");
        let rows: Vec<TestRow> = CsvLoader::new(file.path()).load_all().unwrap();
        assert_eq!(rows, vec![TestRow::new("0", "first\nline"), TestRow::new("1", "second")]);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result: Result<Vec<TestRow>> = CsvLoader::new("/no/such/table.csv").load_all();
        assert!(result.is_err());
    }
}
