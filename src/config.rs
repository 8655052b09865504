use crate::cli::Cli;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Resolved run settings handed to the pipeline
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub providers: ProviderConfig,
}

/// Endpoints and HTTP settings shared by every provider
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub openlibrary_url: String,
    pub google_books_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            openlibrary_url: "https://openlibrary.org".to_string(),
            google_books_url: "https://www.googleapis.com/books/v1".to_string(),
            timeout: Duration::from_secs(10),
            user_agent: concat!("bookenrich/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        if cli.timeout_secs == 0 {
            bail!("--timeout-secs must be greater than zero");
        }

        Ok(Self {
            input: cli.input.clone(),
            output: resolve_output_path(cli)?,
            providers: ProviderConfig {
                openlibrary_url: trim_base_url(&cli.openlibrary_url),
                google_books_url: trim_base_url(&cli.google_books_url),
                timeout: Duration::from_secs(cli.timeout_secs),
                user_agent: cli.user_agent.clone(),
            },
        })
    }
}

fn resolve_output_path(cli: &Cli) -> Result<PathBuf> {
    if let Some(ref path) = cli.output {
        return Ok(path.clone());
    }

    let stem = cli
        .input
        .file_stem()
        .context("Input file has no name")?
        .to_string_lossy();

    Ok(PathBuf::from(format!("{}-enriched.csv", stem)))
}

fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
