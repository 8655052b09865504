//! Fallback chain across providers
//!
//! Order is fixed: ISBN lookup (only when the row has an ISBN), then Open
//! Library search, then Google Books search. The first provider to return a
//! record wins and later providers are not called.
//!
//! Provider errors of every kind are treated like "no data": they are logged
//! at warn level and the chain moves on. Nothing past the resolver sees them.

use crate::providers::{Provider, Query};
use crate::record::BookRecord;
use crate::table::RawRow;
use tracing::{debug, warn};

pub struct Resolver<'a> {
    isbn: Box<dyn Provider + 'a>,
    searches: Vec<Box<dyn Provider + 'a>>,
}

impl<'a> Resolver<'a> {
    /// `searches` are tried in the given order after the ISBN lookup
    pub fn new(isbn: Box<dyn Provider + 'a>, searches: Vec<Box<dyn Provider + 'a>>) -> Self {
        Self { isbn, searches }
    }

    pub fn resolve(&self, row: &RawRow) -> Option<BookRecord> {
        let query = Query::from_row(row);

        if !query.isbn.is_empty() {
            if let Some(record) = attempt(self.isbn.as_ref(), &query) {
                return Some(record);
            }
        }

        self.searches
            .iter()
            .find_map(|provider| attempt(provider.as_ref(), &query))
    }
}

fn attempt(provider: &dyn Provider, query: &Query) -> Option<BookRecord> {
    match provider.lookup(query) {
        Ok(Some(record)) => {
            debug!(
                provider = provider.name(),
                title = %record.title,
                isbn = ?record.isbn,
                author_keys = ?record.authors.iter().map(|a| a.key.as_str()).collect::<Vec<_>>(),
                subject_urls = ?record.subjects.iter().map(|s| s.url.as_str()).collect::<Vec<_>>(),
                "Provider hit"
            );
            Some(record)
        }
        Ok(None) => {
            debug!(provider = provider.name(), "Provider miss");
            None
        }
        Err(e) => {
            warn!(
                provider = provider.name(),
                isbn = %query.isbn,
                title = %query.title,
                author = %query.author,
                "Lookup failed, trying next provider: {}",
                e
            );
            None
        }
    }
}
