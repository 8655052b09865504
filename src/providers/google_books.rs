use super::{decode, Provider, ProviderError, Query};
use crate::record::{Author, BookRecord, Subject};
use crate::transport::Transport;
use serde::Deserialize;

/// Google Books volume search, used when Open Library has nothing
pub struct GoogleBooks<'a> {
    transport: &'a dyn Transport,
    base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumesResponse {
    total_items: u64,
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    #[serde(default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct VolumeInfo {
    title: String,
    authors: Vec<String>,
    published_date: String,
    page_count: u32,
    language: String,
    categories: Vec<String>,
    image_links: ImageLinks,
    industry_identifiers: Vec<IndustryIdentifier>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ImageLinks {
    thumbnail: String,
    small_thumbnail: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IndustryIdentifier {
    #[serde(rename = "type")]
    kind: String,
    identifier: String,
}

impl<'a> GoogleBooks<'a> {
    pub fn new(transport: &'a dyn Transport, base_url: &str) -> Self {
        Self {
            transport,
            base_url: base_url.to_string(),
        }
    }

    fn url(&self, title: &str, author: &str) -> String {
        format!(
            "{}/volumes?q=intitle:{}+inauthor:{}",
            self.base_url, title, author
        )
    }
}

impl Provider for GoogleBooks<'_> {
    fn name(&self) -> &'static str {
        "google-books"
    }

    fn lookup(&self, query: &Query) -> Result<Option<BookRecord>, ProviderError> {
        let resp = self.transport.get(&self.url(&query.title, &query.author))?;
        let volumes: VolumesResponse = decode(resp)?;

        if volumes.total_items == 0 {
            return Ok(None);
        }
        Ok(volumes
            .items
            .into_iter()
            .next()
            .map(|v| volume_to_record(v.volume_info)))
    }
}

fn volume_to_record(info: VolumeInfo) -> BookRecord {
    let thumbnail_url = if info.image_links.thumbnail.is_empty() {
        info.image_links.small_thumbnail
    } else {
        info.image_links.thumbnail
    };

    BookRecord {
        // Only ISBN identifiers; Google also reports OTHER/ISSN
        isbn: info
            .industry_identifiers
            .into_iter()
            .filter(|id| id.kind.starts_with("ISBN"))
            .map(|id| id.identifier)
            .collect(),
        title: info.title,
        authors: info
            .authors
            .into_iter()
            .map(|name| Author {
                key: String::new(),
                name,
            })
            .collect(),
        published_date: info.published_date,
        page_count: info.page_count,
        language: info.language,
        subjects: info
            .categories
            .into_iter()
            .map(|name| Subject {
                name,
                url: String::new(),
            })
            .collect(),
        thumbnail_url,
    }
}
