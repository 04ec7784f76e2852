//! Benchmarks for the similarity engine
//!
//! Run with: cargo bench --package pipeline
//!
//! Uses the real catalog when `data/movies.csv` is present, otherwise a
//! synthetic catalog of the same order of magnitude.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::Catalog;
use pipeline::{recommend, SimilarityMatrix, DEFAULT_TOP_N};
use std::path::Path;

const GENRES: [&str; 10] = [
    "Action", "Adventure", "Animation", "Comedy", "Crime", "Drama", "Fantasy", "Horror",
    "Romance", "Sci-Fi",
];

fn load_test_catalog() -> Catalog {
    let path = Path::new("../../data/movies.csv");
    if path.exists() {
        return Catalog::load_from_file(path).expect("Failed to load test data");
    }

    let mut catalog = Catalog::new();
    for i in 0..3000 {
        let genres = format!(
            "{}|{}|{}",
            GENRES[i % GENRES.len()],
            GENRES[(i / 3) % GENRES.len()],
            GENRES[(i / 7) % GENRES.len()]
        );
        catalog.insert(&format!("Movie {} (1995)", i), &genres);
    }
    catalog
}

fn bench_build_matrix(c: &mut Criterion) {
    let catalog = load_test_catalog();

    c.bench_function("similarity_matrix_build", |b| {
        b.iter(|| {
            let matrix = SimilarityMatrix::build(black_box(catalog.items()));
            black_box(matrix)
        })
    });
}

fn bench_recommend(c: &mut Criterion) {
    let catalog = load_test_catalog();
    let matrix = SimilarityMatrix::build(catalog.items());
    let query = catalog.get(catalog.len() / 2).expect("catalog is empty").title.clone();

    c.bench_function("recommend_top_5", |b| {
        b.iter(|| {
            let result = recommend(black_box(&query), &catalog, &matrix, DEFAULT_TOP_N);
            black_box(result)
        })
    });
}

criterion_group!(benches, bench_build_matrix, bench_recommend);
criterion_main!(benches);
