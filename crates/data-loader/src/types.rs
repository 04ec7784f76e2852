//! Core domain types for the movie catalog.
//!
//! A catalog is an ordered list of items. An item's id is its row position,
//! which is also its row/column in the similarity matrix, so the order is
//! fixed once the catalog is loaded.

use crate::features::{build_features, split_genres};
use crate::title::{extract_year, normalize};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// Type Aliases
// =============================================================================

/// Row position of an item in the catalog
pub type ItemId = usize;

// =============================================================================
// Catalog Item
// =============================================================================

/// A single movie in the catalog.
///
/// `title` is always in normalized display form and `features` is always
/// derived from `genres`; use [`CatalogItem::from_raw`] to keep it that way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub title: String,
    /// Year taken from the raw title before normalization, if it had one
    pub year: Option<u16>,
    pub genres: Vec<String>,
    /// Whitespace-separated tokens fed to the vectorizer
    pub features: String,
}

impl CatalogItem {
    /// Build an item from a raw title and a pipe-separated genre field
    pub fn from_raw(id: ItemId, raw_title: &str, genre_field: &str) -> Self {
        Self {
            id,
            title: normalize(raw_title),
            year: extract_year(raw_title),
            genres: split_genres(genre_field),
            features: build_features(genre_field),
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The full, ordered movie catalog.
///
/// Loaded once at startup and shared read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub(crate) items: Vec<CatalogItem>,
}

impl Catalog {
    /// Creates a new, empty Catalog
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append an item built from raw fields, returning its id
    pub fn insert(&mut self, raw_title: &str, genre_field: &str) -> ItemId {
        let id = self.items.len();
        self.items.push(CatalogItem::from_raw(id, raw_title, genre_field));
        id
    }

    /// Get an item by id
    pub fn get(&self, id: ItemId) -> Option<&CatalogItem> {
        self.items.get(id)
    }

    /// All items in catalog order
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items whose title contains `query`, case-insensitive, in catalog order.
    ///
    /// The query is trimmed first. An empty query matches everything.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a CatalogItem> + use<'a> {
        let needle = query.trim().to_lowercase();
        self.items
            .iter()
            .filter(move |item| item.title.to_lowercase().contains(&needle))
    }

    /// Unique titles in sorted order, for a selection list
    pub fn titles_sorted(&self) -> Vec<&str> {
        self.items
            .iter()
            .map(|item| item.title.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl FromIterator<(String, String)> for Catalog {
    /// Build a catalog from `(raw_title, genre_field)` pairs
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for (title, genres) in iter {
            catalog.insert(&title, &genres);
        }
        catalog
    }
}
