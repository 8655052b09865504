use super::{decode, Provider, ProviderError, Query};
use crate::record::{Author, BookRecord, Subject};
use crate::transport::Transport;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

const COVERS_BASE_URL: &str = "https://covers.openlibrary.org/b/id";

/// Open Library books API, keyed by ISBN
pub struct OpenLibraryIsbn<'a> {
    transport: &'a dyn Transport,
    base_url: String,
}

/// Open Library title/author search
pub struct OpenLibrarySearch<'a> {
    transport: &'a dyn Transport,
    base_url: String,
}

/// Entry of the `jscmd=data` response map
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OlEdition {
    title: String,
    authors: Vec<OlAuthor>,
    identifiers: OlIdentifiers,
    publish_date: String,
    number_of_pages: u32,
    subjects: Vec<OlSubject>,
    cover: OlCover,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OlAuthor {
    url: String,
    name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OlIdentifiers {
    isbn_13: Vec<String>,
    isbn_10: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OlSubject {
    name: String,
    url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OlCover {
    small: String,
    medium: String,
    large: String,
}

#[derive(Debug, Deserialize)]
struct OlSearchResponse {
    num_found: u64,
    #[serde(default)]
    docs: Vec<OlSearchDoc>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OlSearchDoc {
    title: String,
    author_name: Vec<String>,
    author_key: Vec<String>,
    first_publish_year: Option<i32>,
    publish_date: Vec<String>,
    number_of_pages_median: Option<u32>,
    language: Vec<String>,
    subject: Vec<String>,
    isbn: Vec<String>,
    cover_i: Option<i64>,
}

impl<'a> OpenLibraryIsbn<'a> {
    pub fn new(transport: &'a dyn Transport, base_url: &str) -> Self {
        Self {
            transport,
            base_url: base_url.to_string(),
        }
    }

    fn url(&self, isbn: &str) -> String {
        format!(
            "{}/api/books?bibkeys=ISBN:{}&format=json&jscmd=data",
            self.base_url,
            urlencoding::encode(isbn)
        )
    }
}

impl Provider for OpenLibraryIsbn<'_> {
    fn name(&self) -> &'static str {
        "openlibrary-isbn"
    }

    fn lookup(&self, query: &Query) -> Result<Option<BookRecord>, ProviderError> {
        let resp = self.transport.get(&self.url(&query.isbn))?;
        let mut editions: HashMap<String, OlEdition> = decode(resp)?;

        let key = format!("ISBN:{}", query.isbn);
        let edition = editions
            .remove(&key)
            .ok_or_else(|| ProviderError::NotFound(key.clone()))?;
        debug!(%key, title = %edition.title, "Open Library edition found");

        Ok(Some(edition_to_record(edition)))
    }
}

impl<'a> OpenLibrarySearch<'a> {
    pub fn new(transport: &'a dyn Transport, base_url: &str) -> Self {
        Self {
            transport,
            base_url: base_url.to_string(),
        }
    }

    fn url(&self, title: &str, author: &str) -> String {
        format!(
            "{}/search.json?title={}&author={}",
            self.base_url, title, author
        )
    }
}

impl Provider for OpenLibrarySearch<'_> {
    fn name(&self) -> &'static str {
        "openlibrary-search"
    }

    fn lookup(&self, query: &Query) -> Result<Option<BookRecord>, ProviderError> {
        let resp = self.transport.get(&self.url(&query.title, &query.author))?;
        let results: OlSearchResponse = decode(resp)?;

        if results.num_found == 0 {
            return Ok(None);
        }
        Ok(results.docs.into_iter().next().map(search_doc_to_record))
    }
}

fn edition_to_record(edition: OlEdition) -> BookRecord {
    let OlCover {
        small,
        medium,
        large,
    } = edition.cover;
    let thumbnail_url = [large, medium, small]
        .into_iter()
        .find(|url| !url.is_empty())
        .unwrap_or_default();

    let mut isbn = edition.identifiers.isbn_13;
    isbn.extend(edition.identifiers.isbn_10);

    BookRecord {
        isbn,
        title: edition.title,
        authors: edition
            .authors
            .into_iter()
            .map(|a| Author {
                key: a.url,
                name: a.name,
            })
            .collect(),
        published_date: edition.publish_date,
        page_count: edition.number_of_pages,
        // Not part of the jscmd=data payload
        language: String::new(),
        subjects: edition
            .subjects
            .into_iter()
            .map(|s| Subject {
                name: s.name,
                url: s.url,
            })
            .collect(),
        thumbnail_url,
    }
}

fn search_doc_to_record(doc: OlSearchDoc) -> BookRecord {
    let published_date = match doc.first_publish_year {
        Some(year) => year.to_string(),
        None => doc.publish_date.into_iter().next().unwrap_or_default(),
    };

    // author_key is parallel to author_name but may be shorter
    let mut keys = doc.author_key.into_iter();
    let authors = doc
        .author_name
        .into_iter()
        .map(|name| Author {
            key: keys.next().unwrap_or_default(),
            name,
        })
        .collect();

    BookRecord {
        isbn: doc.isbn,
        title: doc.title,
        authors,
        published_date,
        page_count: doc.number_of_pages_median.unwrap_or(0),
        language: doc.language.join(", "),
        subjects: doc
            .subject
            .into_iter()
            .map(|name| Subject {
                name,
                url: String::new(),
            })
            .collect(),
        thumbnail_url: doc
            .cover_i
            .map(|id| format!("{}/{}-L.jpg", COVERS_BASE_URL, id))
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockTransport;

    const BASE: &str = "http://ol.test";

    fn isbn_query(isbn: &str) -> Query {
        Query {
            isbn: isbn.to_string(),
            ..Query::default()
        }
    }

    #[test]
    fn test_isbn_lookup_maps_edition() {
        let body = r#"{
            "ISBN:9780261102217": {
                "title": "The Hobbit",
                "authors": [{"url": "https://openlibrary.org/authors/OL26320A", "name": "J.R.R. Tolkien"}],
                "identifiers": {"isbn_13": ["9780261102217"], "isbn_10": ["0261102214"]},
                "publish_date": "1996",
                "number_of_pages": 310,
                "subjects": [
                    {"name": "Fantasy", "url": "https://openlibrary.org/subjects/fantasy"},
                    {"name": "Dragons", "url": "https://openlibrary.org/subjects/dragons"}
                ],
                "cover": {"small": "s.jpg", "medium": "m.jpg", "large": "l.jpg"},
                "publishers": [{"name": "HarperCollins"}]
            }
        }"#;
        let transport = MockTransport::new().respond(BASE, 200, body);
        let provider = OpenLibraryIsbn::new(&transport, BASE);

        let record = provider
            .lookup(&isbn_query("9780261102217"))
            .unwrap()
            .unwrap();

        assert_eq!(record.title, "The Hobbit");
        assert_eq!(record.author_names(), vec!["J.R.R. Tolkien"]);
        assert_eq!(record.authors[0].key, "https://openlibrary.org/authors/OL26320A");
        assert_eq!(record.isbn, vec!["9780261102217", "0261102214"]);
        assert_eq!(record.published_date, "1996");
        assert_eq!(record.page_count, 310);
        assert_eq!(record.subject_names(), vec!["Fantasy", "Dragons"]);
        assert_eq!(record.thumbnail_url, "l.jpg");
        assert_eq!(record.language, "");

        let calls = transport.calls.borrow();
        assert_eq!(
            calls.as_slice(),
            ["http://ol.test/api/books?bibkeys=ISBN:9780261102217&format=json&jscmd=data"]
        );
    }

    #[test]
    fn test_isbn_lookup_sparse_edition() {
        let body = r#"{"ISBN:123": {"title": "Sparse", "cover": {"small": "s.jpg"}}}"#;
        let transport = MockTransport::new().respond(BASE, 200, body);
        let provider = OpenLibraryIsbn::new(&transport, BASE);

        let record = provider.lookup(&isbn_query("123")).unwrap().unwrap();

        assert_eq!(record.title, "Sparse");
        assert!(record.authors.is_empty());
        assert_eq!(record.page_count, 0);
        assert_eq!(record.thumbnail_url, "s.jpg");
    }

    #[test]
    fn test_isbn_lookup_missing_key_is_not_found() {
        let transport = MockTransport::new().respond(BASE, 200, "{}");
        let provider = OpenLibraryIsbn::new(&transport, BASE);

        let err = provider.lookup(&isbn_query("123")).unwrap_err();
        assert!(matches!(err, ProviderError::NotFound(ref key) if key == "ISBN:123"));
    }

    #[test]
    fn test_isbn_lookup_error_kinds() {
        let query = isbn_query("123");

        let down = MockTransport::new().fail(BASE, "connection refused");
        let err = OpenLibraryIsbn::new(&down, BASE).lookup(&query).unwrap_err();
        assert!(matches!(err, ProviderError::Transport(_)));

        let status = MockTransport::new().respond(BASE, 500, "oops");
        let err = OpenLibraryIsbn::new(&status, BASE).lookup(&query).unwrap_err();
        assert!(matches!(err, ProviderError::UpstreamStatus(500)));

        let garbage = MockTransport::new().respond(BASE, 200, r#"{"ISBN:123": {"number_of_pages": "many"}}"#);
        let err = OpenLibraryIsbn::new(&garbage, BASE).lookup(&query).unwrap_err();
        assert!(matches!(err, ProviderError::Protocol(_)));
    }

    #[test]
    fn test_search_returns_first_doc() {
        let body = r#"{
            "num_found": 2,
            "docs": [
                {
                    "title": "The Hobbit",
                    "author_name": ["J.R.R. Tolkien", "Alan Lee"],
                    "author_key": ["OL26320A"],
                    "first_publish_year": 1937,
                    "publish_date": ["1999"],
                    "number_of_pages_median": 300,
                    "language": ["eng", "fre"],
                    "subject": ["Fantasy", "Hobbits"],
                    "isbn": ["9780261102217"],
                    "cover_i": 14627509
                },
                {"title": "The Hobbit (second)"}
            ]
        }"#;
        let transport = MockTransport::new().respond(BASE, 200, body);
        let provider = OpenLibrarySearch::new(&transport, BASE);
        let query = Query {
            isbn: String::new(),
            title: "The+Hobbit".to_string(),
            author: "Tolkien".to_string(),
        };

        let record = provider.lookup(&query).unwrap().unwrap();

        assert_eq!(record.title, "The Hobbit");
        assert_eq!(record.authors[0].key, "OL26320A");
        assert_eq!(record.authors[1].key, "");
        assert_eq!(record.author_names(), vec!["J.R.R. Tolkien", "Alan Lee"]);
        assert_eq!(record.published_date, "1937");
        assert_eq!(record.page_count, 300);
        assert_eq!(record.language, "eng, fre");
        assert_eq!(record.subject_names(), vec!["Fantasy", "Hobbits"]);
        assert_eq!(
            record.thumbnail_url,
            "https://covers.openlibrary.org/b/id/14627509-L.jpg"
        );
        assert_eq!(
            transport.calls.borrow()[0],
            "http://ol.test/search.json?title=The+Hobbit&author=Tolkien"
        );
    }

    #[test]
    fn test_search_without_results_is_clean_negative() {
        let transport = MockTransport::new().respond(BASE, 200, r#"{"num_found": 0, "docs": []}"#);
        let provider = OpenLibrarySearch::new(&transport, BASE);

        assert!(provider.lookup(&Query::default()).unwrap().is_none());
    }

    #[test]
    fn test_isbn_is_escaped_in_url() {
        let transport = MockTransport::new().respond(BASE, 200, "{}");
        let provider = OpenLibraryIsbn::new(&transport, BASE);

        let err = provider.lookup(&isbn_query("ISBN 0306406152&x")).unwrap_err();

        assert!(matches!(err, ProviderError::NotFound(_)));
        assert_eq!(
            transport.calls.borrow()[0],
            "http://ol.test/api/books?bibkeys=ISBN:ISBN%200306406152%26x&format=json&jscmd=data"
        );
    }

    #[test]
    fn test_search_count_without_docs_is_clean_negative() {
        let transport = MockTransport::new().respond(BASE, 200, r#"{"num_found": 3, "docs": []}"#);
        let provider = OpenLibrarySearch::new(&transport, BASE);
        assert!(provider.lookup(&Query::default()).unwrap().is_none());

        let transport = MockTransport::new().respond(BASE, 200, r#"{"num_found": 3}"#);
        let provider = OpenLibrarySearch::new(&transport, BASE);
        assert!(provider.lookup(&Query::default()).unwrap().is_none());
    }

    #[test]
    fn test_search_missing_count_is_protocol_error() {
        let transport = MockTransport::new().respond(BASE, 200, r#"{"docs": []}"#);
        let provider = OpenLibrarySearch::new(&transport, BASE);

        let err = provider.lookup(&Query::default()).unwrap_err();
        assert!(matches!(err, ProviderError::Protocol(_)));
    }
}
