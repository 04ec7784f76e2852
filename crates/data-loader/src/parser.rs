//! Parser for movie catalog CSV files.
//!
//! Expected layout (MovieLens "latest" style):
//!
//! ```text
//! movieId,title,genres
//! 1,Toy Story (1995),Adventure|Animation|Children|Comedy|Fantasy
//! 11,"American President, The (1995)",Comedy|Drama|Romance
//! ```
//!
//! Only the `title` and `genres` columns are required; they are looked up by
//! header name and any other columns are ignored. An empty genres field is
//! allowed and yields an item with no features.

use crate::error::{DataLoadError, Result};
use crate::types::Catalog;
use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

const REQUIRED_COLUMNS: [&str; 2] = ["title", "genres"];

/// One row as it appears in the file, before normalization
#[derive(Debug, Deserialize)]
struct CatalogRow {
    title: String,
    #[serde(default)]
    genres: Option<String>,
}

/// Parse a catalog file from disk
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    parse_catalog_reader(file, &file_name)
}

/// Parse a catalog from any reader
///
/// `file_name` is only used in error messages.
pub fn parse_catalog_reader<R: Read>(reader: R, file_name: &str) -> Result<Catalog> {
    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = reader.headers()?.clone();
    check_columns(&headers, file_name)?;

    let mut catalog = Catalog::new();
    let mut record = StringRecord::new();

    while reader.read_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let row: CatalogRow =
            record
                .deserialize(Some(&headers))
                .map_err(|e| DataLoadError::ParseError {
                    file: file_name.to_string(),
                    line,
                    reason: e.to_string(),
                })?;

        catalog.insert(&row.title, row.genres.as_deref().unwrap_or(""));
    }

    Ok(catalog)
}

fn check_columns(headers: &StringRecord, file_name: &str) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataLoadError::MissingColumn {
                file: file_name.to_string(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}
