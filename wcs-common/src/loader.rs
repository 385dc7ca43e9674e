//! One-shot catalog load: fetch the tabular resource, parse it, normalize rows
//!
//! Failures collapse into [`DataLoadError`]. Retrieval problems are
//! `Transport`, anything the CSV reader rejects is `Parse`. No row-level
//! errors exist; short or sparse rows are defaulted by the normalizer.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::DataLoadError;
use crate::record::{normalize_rows, ColumnMap, RawRow, WineRecord};

/// Where the wine sheet lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    /// `http://` and `https://` locations are URLs, anything else a path
    pub fn new(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            CatalogSource::Url(trimmed.to_string())
        } else {
            CatalogSource::File(PathBuf::from(trimmed))
        }
    }
}

impl FromStr for CatalogSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CatalogSource::new(s))
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Url(url) => f.write_str(url),
        }
    }
}

/// Retrieve the raw bytes of the source
pub async fn fetch_source(source: &CatalogSource) -> Result<Vec<u8>, DataLoadError> {
    match source {
        CatalogSource::Url(url) => {
            let response = reqwest::get(url)
                .await
                .map_err(|e| DataLoadError::Transport(e.to_string()))?;

            if !response.status().is_success() {
                debug!("Fetch of {} returned {}", url, response.status());
                return Err(DataLoadError::Transport("Failed to fetch CSV file".to_string()));
            }

            let bytes = response
                .bytes()
                .await
                .map_err(|e| DataLoadError::Transport(e.to_string()))?;
            Ok(bytes.to_vec())
        }
        CatalogSource::File(path) => tokio::fs::read(path)
            .await
            .map_err(|e| DataLoadError::Transport(format!("{}: {}", path.display(), e))),
    }
}

/// Parse CSV bytes into header-keyed rows
///
/// The first row is the header. Rows may be shorter or longer than the
/// header; extra cells are dropped and missing ones are simply absent.
/// Blank lines are skipped, but a row of bare delimiters is kept. Cell bytes
/// that are not valid UTF-8 become U+FFFD instead of failing the load.
pub fn parse_table(bytes: &[u8]) -> Result<Vec<RawRow>, DataLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .byte_headers()
        .map_err(|e| DataLoadError::Parse(e.to_string()))?
        .iter()
        .map(|header| String::from_utf8_lossy(header).into_owned())
        .collect();

    let mut rows = Vec::new();
    for result in reader.byte_records() {
        let record = result.map_err(|e| DataLoadError::Parse(e.to_string()))?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.clone(), String::from_utf8_lossy(value).into_owned()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

/// Fetch, parse and normalize the whole catalog
pub async fn load_catalog(
    source: &CatalogSource,
    columns: &ColumnMap,
) -> Result<Vec<WineRecord>, DataLoadError> {
    info!("Loading wine catalog from {}", source);

    let bytes = fetch_source(source).await?;
    let rows = parse_table(&bytes)?;
    let wines = normalize_rows(&rows, columns);

    info!("Loaded {} wine records", wines.len());
    Ok(wines)
}
