//! Content-based recommender.
//!
//! Given a free-text query, pick the first catalog item whose title contains
//! it and return its nearest neighbours from the similarity matrix.

use crate::similarity::SimilarityMatrix;
use data_loader::{Catalog, ItemId};
use std::cmp::Ordering;
use tracing::{debug, warn};

/// Number of recommendations returned when the caller doesn't say
pub const DEFAULT_TOP_N: usize = 5;

/// Title list returned for an unmatched query
pub const NOT_FOUND: &str = "Movie not found";

/// One recommended item
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub id: ItemId,
    pub title: String,
    pub score: f32,
}

/// Result of a recommendation request
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    /// No catalog title contains the query
    NotFound,
    /// `source` is the matched item; `neighbors` are ranked best first
    Matched {
        source: ItemId,
        title: String,
        neighbors: Vec<Neighbor>,
    },
}

impl Recommendation {
    pub fn is_found(&self) -> bool {
        matches!(self, Recommendation::Matched { .. })
    }

    /// Ranked neighbours; empty when not found
    pub fn neighbors(&self) -> &[Neighbor] {
        match self {
            Recommendation::Matched { neighbors, .. } => neighbors,
            Recommendation::NotFound => &[],
        }
    }

    /// Recommended titles, or the single `NOT_FOUND` sentinel
    pub fn titles(&self) -> Vec<String> {
        match self {
            Recommendation::Matched { neighbors, .. } => {
                neighbors.iter().map(|n| n.title.clone()).collect()
            }
            Recommendation::NotFound => vec![NOT_FOUND.to_string()],
        }
    }
}

/// Recommend up to `top_n` items similar to the first title matching `query`.
///
/// ## Algorithm
/// 1. Trim and lowercase the query
/// 2. First item (lowest id) whose title contains it is the source
/// 3. Score every other item against the source
/// 4. Stable sort by score descending, so ties keep catalog order
/// 5. Take the first `top_n`
///
/// The source is excluded by id, so it never shows up in its own list even
/// when another item has an identical score or the source has no features.
pub fn recommend(
    query: &str,
    catalog: &Catalog,
    matrix: &SimilarityMatrix,
    top_n: usize,
) -> Recommendation {
    if matrix.len() != catalog.len() {
        warn!(
            "Similarity matrix size {} does not match catalog size {}",
            matrix.len(),
            catalog.len()
        );
    }

    let source = match catalog.search(query).next() {
        Some(item) => item,
        None => {
            debug!("No catalog title matches {:?}", query.trim());
            return Recommendation::NotFound;
        }
    };

    let mut scored: Vec<(ItemId, f32)> = catalog
        .items()
        .iter()
        .filter(|item| item.id != source.id)
        .map(|item| (item.id, matrix.get(source.id, item.id).unwrap_or(0.0)))
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(top_n);

    let neighbors: Vec<Neighbor> = scored
        .into_iter()
        .filter_map(|(id, score)| {
            let item = catalog.get(id)?;
            Some(Neighbor {
                id,
                title: item.title.clone(),
                score,
            })
        })
        .collect();

    debug!(
        "Matched {:?} to {:?}, returning {} neighbours",
        query.trim(),
        source.title,
        neighbors.len()
    );

    Recommendation::Matched {
        source: source.id,
        title: source.title.clone(),
        neighbors,
    }
}
