//! Content-based recommendation pipeline.
//!
//! This crate provides:
//! - `CountVectorizer` turning feature strings into term-count vectors
//! - `SimilarityMatrix` holding all pairwise cosine similarities
//! - `recommend` ranking the neighbours of a queried title
//!
//! ## Architecture
//! The pipeline runs in stages:
//! 1. Feature strings are tokenized (stop words removed) over a sorted vocabulary
//! 2. The similarity matrix is built once from the catalog and then only read
//! 3. Each request matches a title and ranks one row of the matrix
//!
//! ## Example Usage
//! ```ignore
//! use data_loader::Catalog;
//! use pipeline::{recommend, SimilarityMatrix, DEFAULT_TOP_N};
//!
//! let catalog = Catalog::load_from_file(Path::new("data/movies.csv"))?;
//! let matrix = SimilarityMatrix::build(catalog.items());
//!
//! let result = recommend("toy story", &catalog, &matrix, DEFAULT_TOP_N);
//! for title in result.titles() {
//!     println!("- {}", title);
//! }
//! ```

pub mod recommender;
pub mod similarity;
pub mod stopwords;
pub mod vectorizer;

// Re-export main types
pub use recommender::{DEFAULT_TOP_N, NOT_FOUND, Neighbor, Recommendation, recommend};
pub use similarity::SimilarityMatrix;
pub use stopwords::StopWords;
pub use vectorizer::{CountVectorizer, SparseVector, TermCounts};
