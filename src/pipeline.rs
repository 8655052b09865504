use crate::config::Config;
use crate::csv_table::{CsvRowSink, CsvRowSource};
use crate::providers::{GoogleBooks, OpenLibraryIsbn, OpenLibrarySearch, Provider};
use crate::reducer::reduce;
use crate::resolver::Resolver;
use crate::table::{OutputRow, RawRow, RowSink, RowSource, OUTPUT_HEADER};
use crate::transport::{Transport, UreqTransport};
use anyhow::Result;
use tracing::{debug, info};

/// Counts reported after a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub rows: usize,
    pub resolved: usize,
}

/// Enrich every row, keeping input order. Rows never fail: an unresolved row
/// becomes a placeholder row.
pub fn run_pipeline(rows: &[RawRow], resolver: &Resolver) -> (Vec<OutputRow>, RunSummary) {
    let mut resolved = 0;

    let output = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let record = resolver.resolve(row);
            if record.is_some() {
                resolved += 1;
            } else {
                info!(
                    row = i + 1,
                    isbn = %row.isbn,
                    title = %row.title,
                    author = %row.author,
                    "No data found"
                );
            }
            let out = reduce(row, record.as_ref());
            debug!(row = i + 1, columns = ?out.columns(), "Row enriched");
            out
        })
        .collect();

    let summary = RunSummary {
        rows: rows.len(),
        resolved,
    };
    (output, summary)
}

/// Build the provider chain in its fixed order over the given transport
pub fn build_resolver<'a>(transport: &'a dyn Transport, config: &Config) -> Resolver<'a> {
    let providers = &config.providers;
    let searches: Vec<Box<dyn Provider + 'a>> = vec![
        Box::new(OpenLibrarySearch::new(transport, &providers.openlibrary_url)),
        Box::new(GoogleBooks::new(transport, &providers.google_books_url)),
    ];
    Resolver::new(
        Box::new(OpenLibraryIsbn::new(transport, &providers.openlibrary_url)),
        searches,
    )
}

pub fn enrich(config: &Config) -> Result<RunSummary> {
    let transport = UreqTransport::new(&config.providers);
    let mut source = CsvRowSource::open(&config.input)?;
    let mut sink = CsvRowSink::create(&config.output);
    enrich_with(config, &transport, &mut source, &mut sink)
}

fn enrich_with(
    config: &Config,
    transport: &dyn Transport,
    source: &mut dyn RowSource,
    sink: &mut dyn RowSink,
) -> Result<RunSummary> {
    let rows = source.rows()?;
    info!(rows = rows.len(), input = %config.input.display(), "Enriching book data");

    let resolver = build_resolver(transport, config);
    let (output, summary) = run_pipeline(&rows, &resolver);

    sink.write(&OUTPUT_HEADER, &output)?;
    info!(output = %config.output.display(), "Enriched book data saved");

    Ok(summary)
}
