//! # Data Loader Crate
//!
//! This crate loads a movie catalog and puts it into the shape the
//! similarity engine expects.
//!
//! ## Main Components
//!
//! - **types**: `CatalogItem` and the ordered `Catalog`
//! - **title**: title normalization ("Postman, The (1997)" -> "The Postman")
//! - **features**: genre tags -> bag-of-tokens feature string
//! - **parser**: CSV parsing
//! - **load**: `Catalog::load_from_file`
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_file(Path::new("data/movies.csv"))?;
//!
//! for item in catalog.search("toy story") {
//!     println!("{} [{}]", item.title, item.genres.join(", "));
//! }
//! ```

// Public modules
pub mod error;
pub mod features;
pub mod load;
pub mod parser;
pub mod title;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use features::build_features;
pub use title::{normalize, reorder_article};
pub use types::{Catalog, CatalogItem, ItemId};

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert("Toy Story (1995)", "Animation|Comedy");
        catalog.insert("Toy Story 2 (1999)", "Animation|Comedy");
        catalog.insert("Postman, The (1997)", "Drama");
        catalog
    }

    #[test]
    fn test_catalog_creation() {
        let catalog = Catalog::new();
        assert_eq!(catalog.len(), 0);
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_insert_item() {
        let mut catalog = Catalog::new();

        let id = catalog.insert("Toy Story (1995)", "Animation|Children|Comedy");

        let item = catalog.get(id).unwrap();
        assert_eq!(item.id, 0);
        assert_eq!(item.title, "Toy Story");
        assert_eq!(item.year, Some(1995));
        assert_eq!(item.genres.len(), 3);
        assert_eq!(item.features, "Animation Children Comedy");
    }

    #[test]
    fn test_search_is_case_insensitive_and_ordered() {
        let catalog = create_test_catalog();

        let ids: Vec<ItemId> = catalog.search("  TOY story ").map(|item| item.id).collect();
        assert_eq!(ids, vec![0, 1]);

        assert_eq!(catalog.search("the postman").count(), 1);
        assert_eq!(catalog.search("zzzznotamovie").count(), 0);
    }

    #[test]
    fn test_titles_sorted() {
        let mut catalog = create_test_catalog();
        catalog.insert("Toy Story (1995)", "Animation");

        assert_eq!(
            catalog.titles_sorted(),
            vec!["The Postman", "Toy Story", "Toy Story 2"]
        );
    }

    #[test]
    fn test_empty_queries() {
        let catalog = Catalog::new();

        assert!(catalog.get(999).is_none());
        assert_eq!(catalog.search("anything").count(), 0);
        assert!(catalog.titles_sorted().is_empty());
    }

    #[test]
    fn test_collect_from_pairs() {
        let catalog: Catalog = vec![
            ("Heat (1995)".to_string(), "Action|Crime|Thriller".to_string()),
            ("Sabrina (1995)".to_string(), "Comedy|Romance".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).unwrap().title, "Sabrina");
    }
}
