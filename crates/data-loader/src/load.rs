//! Catalog loading entry point.

use crate::error::Result;
use crate::parser;
use crate::types::Catalog;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

impl Catalog {
    /// Load a catalog from a CSV file
    ///
    /// Titles are normalized and feature strings derived while reading, so
    /// the returned catalog is ready for the similarity engine.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading movie catalog from {:?}", path);
        let start = Instant::now();

        let catalog = parser::parse_catalog(path)?;

        let featureless = catalog
            .items()
            .iter()
            .filter(|item| item.features.trim().is_empty())
            .count();
        if featureless > 0 {
            warn!("{} catalog items have no genre data", featureless);
        }

        info!(
            "Loaded {} movies in {:.2?}",
            catalog.len(),
            start.elapsed()
        );
        Ok(catalog)
    }
}
