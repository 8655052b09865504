//! Cleanup of raw spreadsheet fields into query-ready form.

/// Strip hyphens and surrounding whitespace from an ISBN.
pub fn normalize_isbn(raw: &str) -> String {
    raw.replace('-', "").trim().to_string()
}

/// Turn free text into a query-string term: whitespace runs become a single `+`.
///
/// Words are percent-encoded individually, so `&` or `#` in a title stay
/// inside the parameter value.
pub fn normalize_search_term(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| urlencoding::encode(word).into_owned())
        .collect::<Vec<_>>()
        .join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isbn_hyphens_removed() {
        assert_eq!(normalize_isbn("978-0-13-468599-1"), "9780134685991");
        assert_eq!(normalize_isbn("  0-306-40615-2 \t"), "0306406152");
    }

    #[test]
    fn test_isbn_passthrough() {
        assert_eq!(normalize_isbn(""), "");
        assert_eq!(normalize_isbn("not an isbn"), "not an isbn");
        assert_eq!(normalize_isbn("   "), "");
    }

    #[test]
    fn test_search_term_spaces() {
        assert_eq!(normalize_search_term("The Hobbit"), "The+Hobbit");
        assert_eq!(normalize_search_term("  J. R. R.   Tolkien "), "J.+R.+R.+Tolkien");
        assert_eq!(normalize_search_term(""), "");
    }

    #[test]
    fn test_search_term_reserved_characters() {
        assert_eq!(
            normalize_search_term("Pride & Prejudice"),
            "Pride+%26+Prejudice"
        );
        assert_eq!(normalize_search_term("C#"), "C%23");
    }
}
