//! Metadata providers
//!
//! Each provider wraps one external source behind [`Provider::lookup`] and
//! translates that source's response schema into a [`BookRecord`].

mod google_books;
mod open_library;

pub use google_books::*;
pub use open_library::*;

use crate::normalize::{normalize_isbn, normalize_search_term};
use crate::record::BookRecord;
use crate::table::RawRow;
use crate::transport::HttpResponse;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Provider failures. All of them are soft for the resolver.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Upstream returned HTTP {0}")]
    UpstreamStatus(u16),

    #[error("Unexpected response body: {0}")]
    Protocol(String),

    #[error("No data found for {0}")]
    NotFound(String),
}

/// Normalized query fields for one input row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub isbn: String,
    pub title: String,
    pub author: String,
}

impl Query {
    pub fn from_row(row: &RawRow) -> Self {
        Self {
            isbn: normalize_isbn(&row.isbn),
            title: normalize_search_term(&row.title),
            author: normalize_search_term(&row.author),
        }
    }
}

/// One external metadata source.
///
/// `Ok(None)` is a clean negative: the source answered but has no match.
/// Each call issues exactly one request and never retries.
pub trait Provider {
    fn name(&self) -> &'static str;
    fn lookup(&self, query: &Query) -> Result<Option<BookRecord>, ProviderError>;
}

/// Check the status and decode the body into a provider schema.
fn decode<T: DeserializeOwned>(resp: HttpResponse) -> Result<T, ProviderError> {
    if !resp.is_success() {
        return Err(ProviderError::UpstreamStatus(resp.status));
    }
    serde_json::from_str(&resp.body).map_err(|e| ProviderError::Protocol(e.to_string()))
}
