//! Pairwise cosine similarity over the whole catalog.
//!
//! The matrix is N x N for a catalog of N items. Only the upper triangle
//! (diagonal included) is stored, row-major, so `get(i, j) == get(j, i)`
//! holds by construction and memory is roughly halved.
//!
//! ## Performance Note
//! Rows are computed in parallel with Rayon. Genre vocabularies are tiny,
//! so each sparse dot product is a handful of comparisons; the cost is
//! dominated by the N^2 / 2 pairs.

use crate::vectorizer::{CountVectorizer, SparseVector};
use data_loader::{CatalogItem, ItemId};
use rayon::prelude::*;
use std::time::Instant;
use tracing::info;

/// Immutable, symmetric item-item similarity matrix
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
    n: usize,
    /// Packed upper triangle: row i holds columns i..n
    values: Vec<f32>,
}

impl SimilarityMatrix {
    /// Vectorize the items' feature strings and compute all pairwise scores
    pub fn build(items: &[CatalogItem]) -> Self {
        Self::build_with(items, &CountVectorizer::default())
    }

    /// Same as [`SimilarityMatrix::build`] with a custom vectorizer
    pub fn build_with(items: &[CatalogItem], vectorizer: &CountVectorizer) -> Self {
        let start = Instant::now();

        let features: Vec<&str> = items.iter().map(|item| item.features.as_str()).collect();
        let counts = vectorizer.fit_transform(&features);

        let matrix = Self::from_vectors(&counts.vectors);

        info!(
            "Built {}x{} similarity matrix over {} terms in {:.2?}",
            matrix.n,
            matrix.n,
            counts.vocabulary.len(),
            start.elapsed()
        );
        matrix
    }

    /// Compute the matrix from already vectorized items
    ///
    /// The diagonal is exactly 1.0 for non-zero vectors and 0.0 otherwise.
    pub fn from_vectors(vectors: &[SparseVector]) -> Self {
        let n = vectors.len();

        let values: Vec<f32> = (0..n)
            .into_par_iter()
            .flat_map_iter(|i| {
                (i..n).map(move |j| {
                    if i == j {
                        if vectors[i].is_zero() { 0.0 } else { 1.0 }
                    } else {
                        vectors[i].cosine(&vectors[j])
                    }
                })
            })
            .collect();

        Self { n, values }
    }

    /// Number of rows (and columns)
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Similarity between items `i` and `j`, or None if either is out of range
    pub fn get(&self, i: ItemId, j: ItemId) -> Option<f32> {
        if i >= self.n || j >= self.n {
            return None;
        }
        let (row, col) = if i <= j { (i, j) } else { (j, i) };
        self.values.get(self.offset(row, col)).copied()
    }

    /// Full row `i` as scores against every item, in catalog order
    pub fn row(&self, i: ItemId) -> Option<Vec<f32>> {
        if i >= self.n {
            return None;
        }
        (0..self.n).map(|j| self.get(i, j)).collect()
    }

    /// Index of `(row, col)` in the packed triangle, `row <= col`.
    ///
    /// Row r starts at sum_{k<r} (n - k) = r*n - r*(r-1)/2.
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.n - row * row.saturating_sub(1) / 2 + (col - row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Catalog;

    fn build_catalog(rows: &[(&str, &str)]) -> Catalog {
        let mut catalog = Catalog::new();
        for (title, genres) in rows {
            catalog.insert(title, genres);
        }
        catalog
    }

    #[test]
    fn test_symmetry_and_diagonal() {
        let catalog = build_catalog(&[
            ("Toy Story (1995)", "Adventure|Animation|Children|Comedy|Fantasy"),
            ("Jumanji (1995)", "Adventure|Children|Fantasy"),
            ("Heat (1995)", "Action|Crime|Thriller"),
            ("Sabrina (1995)", "Comedy|Romance"),
            ("GoldenEye (1995)", "Action|Adventure|Thriller"),
        ]);
        let matrix = SimilarityMatrix::build(catalog.items());

        assert_eq!(matrix.len(), 5);
        for i in 0..5 {
            assert_eq!(matrix.get(i, i), Some(1.0));
            for j in 0..5 {
                let score = matrix.get(i, j).unwrap();
                assert_eq!(score, matrix.get(j, i).unwrap());
                assert!((0.0..=1.0).contains(&score));
            }
        }
    }

    #[test]
    fn test_known_scores() {
        let catalog = build_catalog(&[
            ("A (2000)", "Animation|Comedy"),
            ("B (2000)", "Comedy|Romance"),
            ("C (2000)", "Adventure|Fantasy"),
        ]);
        let matrix = SimilarityMatrix::build(catalog.items());

        assert!((matrix.get(0, 1).unwrap() - 0.5).abs() < 1e-6);
        assert_eq!(matrix.get(0, 2), Some(0.0));
        assert_eq!(matrix.get(1, 2), Some(0.0));
        assert_eq!(matrix.row(0).unwrap().len(), 3);
    }

    #[test]
    fn test_empty_features_score_zero() {
        let catalog = build_catalog(&[("A", "Drama"), ("B", ""), ("C", "Drama")]);
        let matrix = SimilarityMatrix::build(catalog.items());

        assert_eq!(matrix.get(1, 1), Some(0.0));
        assert_eq!(matrix.get(0, 1), Some(0.0));
        assert_eq!(matrix.get(0, 2), Some(1.0));
    }

    #[test]
    fn test_out_of_range() {
        let matrix = SimilarityMatrix::build(&[]);

        assert!(matrix.is_empty());
        assert_eq!(matrix.get(0, 0), None);
        assert!(matrix.row(0).is_none());
    }

    #[test]
    fn test_deterministic() {
        let catalog = build_catalog(&[
            ("A", "Western|Action"),
            ("B", "Action|Sci-Fi"),
            ("C", "Sci-Fi|Western|Horror"),
        ]);
        let first = SimilarityMatrix::build(catalog.items());
        let second = SimilarityMatrix::build(catalog.items());

        assert_eq!(first.values, second.values);
    }
}
