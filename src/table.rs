use anyhow::Result;

/// Placeholder written for fetched columns when no provider knows the book
pub const NOT_AVAILABLE: &str = "N/A";

pub const OUTPUT_HEADER: [&str; 10] = [
    "ISBN",
    "author name",
    "book name",
    "book condition",
    "date of publication",
    "series",
    "page count",
    "language",
    "tags",
    "image links",
];

/// One input row: ISBN, author, title, condition. Any field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub isbn: String,
    pub author: String,
    pub title: String,
    /// Opaque, copied to the output untouched
    pub condition: String,
}

/// Fixed 10-column output row, in `OUTPUT_HEADER` order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow(pub [String; 10]);

impl OutputRow {
    pub fn columns(&self) -> &[String; 10] {
        &self.0
    }
}

/// Source of input rows (spreadsheet, CSV, ...)
pub trait RowSource {
    /// All data rows in file order, header excluded
    fn rows(&mut self) -> Result<Vec<RawRow>>;
}

/// Destination for the enriched table
pub trait RowSink {
    fn write(&mut self, header: &[&str], rows: &[OutputRow]) -> Result<()>;
}
