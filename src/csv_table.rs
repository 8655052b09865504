use crate::table::{OutputRow, RawRow, RowSink, RowSource};
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Reads `ISBN, author, title, condition` rows from a CSV file with a header row
pub struct CsvRowSource {
    path: PathBuf,
}

/// Writes the enriched table to a CSV file, replacing any existing file
pub struct CsvRowSink {
    path: PathBuf,
}

impl CsvRowSource {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            bail!("Input file not found: {}", path.display());
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }
}

impl RowSource for CsvRowSource {
    fn rows(&mut self) -> Result<Vec<RawRow>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .with_context(|| format!("Failed to open CSV: {}", self.path.display()))?;

        let mut rows = Vec::new();
        // Spreadsheet exports are often not UTF-8; bad bytes become U+FFFD
        for result in reader.byte_records() {
            let record = result
                .with_context(|| format!("Failed to read CSV: {}", self.path.display()))?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            if record.len() < 4 {
                bail!(
                    "{}:{}: expected 4 columns (ISBN, author, title, condition), found {}",
                    self.path.display(),
                    line,
                    record.len()
                );
            }

            let field = |i: usize| String::from_utf8_lossy(&record[i]).into_owned();
            rows.push(RawRow {
                isbn: field(0),
                author: field(1),
                title: field(2),
                condition: field(3),
            });
        }

        Ok(rows)
    }
}

impl CsvRowSink {
    pub fn create(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl RowSink for CsvRowSink {
    fn write(&mut self, header: &[&str], rows: &[OutputRow]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
        }
        if self.path.exists() {
            info!(path = %self.path.display(), "Output file already exists, replacing it");
        }

        let mut writer = csv::Writer::from_path(&self.path)
            .with_context(|| format!("Failed to create output file: {}", self.path.display()))?;

        writer.write_record(header)?;
        for row in rows {
            writer.write_record(row.columns())?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to write output file: {}", self.path.display()))?;

        Ok(())
    }
}
