use crate::record::BookRecord;
use crate::table::{OutputRow, RawRow, NOT_AVAILABLE};

/// Project a resolved record (or its absence) onto the 10-column output row.
///
/// ISBN and condition always come from the input row. Without a record the
/// author and title are echoed as well and every fetched column is `N/A`;
/// with one, empty fields stay empty. No provider supplies series data, so
/// that column is always `N/A`.
pub fn reduce(row: &RawRow, record: Option<&BookRecord>) -> OutputRow {
    let Some(book) = record else {
        return OutputRow([
            row.isbn.clone(),
            row.author.clone(),
            row.title.clone(),
            row.condition.clone(),
            NOT_AVAILABLE.to_string(),
            NOT_AVAILABLE.to_string(),
            NOT_AVAILABLE.to_string(),
            NOT_AVAILABLE.to_string(),
            NOT_AVAILABLE.to_string(),
            NOT_AVAILABLE.to_string(),
        ]);
    };

    OutputRow([
        row.isbn.clone(),
        book.author_names().join(", "),
        book.title.clone(),
        row.condition.clone(),
        book.published_date.clone(),
        NOT_AVAILABLE.to_string(),
        book.page_count.to_string(),
        book.language.clone(),
        book.subject_names().join(", "),
        book.thumbnail_url.clone(),
    ])
}
