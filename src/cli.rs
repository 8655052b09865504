use clap::Parser;
use std::path::PathBuf;

/// Enrich a CSV book list with metadata from Open Library and Google Books
#[derive(Parser, Debug)]
#[command(name = "bookenrich", version, about)]
pub struct Cli {
    /// Path to the input CSV (columns: ISBN, author, title, condition; first row is a header)
    pub input: PathBuf,

    /// Output CSV path.
    /// Defaults to `<input stem>-enriched.csv` in the current directory.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Base URL of the Open Library API (ISBN lookup and title/author search)
    #[arg(
        long,
        env = "BOOKENRICH_OPENLIBRARY_URL",
        default_value = "https://openlibrary.org"
    )]
    pub openlibrary_url: String,

    /// Base URL of the Google Books API (secondary title/author search)
    #[arg(
        long,
        env = "BOOKENRICH_GOOGLE_BOOKS_URL",
        default_value = "https://www.googleapis.com/books/v1"
    )]
    pub google_books_url: String,

    /// Timeout for each provider request, in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// User-Agent header sent to the providers
    #[arg(long, default_value = concat!("bookenrich/", env!("CARGO_PKG_VERSION")))]
    pub user_agent: String,

    /// Log request URLs and per-row results
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
