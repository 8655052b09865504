/// Provider-agnostic book metadata produced by every successful lookup.
///
/// Missing data is represented by empty strings, empty lists or a zero page
/// count; a provider that found the book but knows little about it still
/// yields a `BookRecord`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookRecord {
    pub isbn: Vec<String>,
    pub title: String,
    pub authors: Vec<Author>,
    /// Provider-native date text, never parsed
    pub published_date: String,
    /// 0 means unknown
    pub page_count: u32,
    pub language: String,
    pub subjects: Vec<Subject>,
    pub thumbnail_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Author {
    /// Provider identifier, only logged
    pub key: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subject {
    pub name: String,
    pub url: String,
}

impl BookRecord {
    pub fn author_names(&self) -> Vec<&str> {
        self.authors.iter().map(|a| a.name.as_str()).collect()
    }

    pub fn subject_names(&self) -> Vec<&str> {
        self.subjects.iter().map(|s| s.name.as_str()).collect()
    }
}
