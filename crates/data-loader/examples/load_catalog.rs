use data_loader::Catalog;
use std::path::Path;
use std::time::Instant;

fn main() {
    let path = Path::new("data/movies.csv");

    println!("Loading movie catalog...\n");

    let start = Instant::now();
    let catalog = Catalog::load_from_file(path).expect("Failed to load catalog");
    let elapsed = start.elapsed();

    let featureless = catalog
        .items()
        .iter()
        .filter(|item| item.features.is_empty())
        .count();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", catalog.len());
    println!("Unique titles: {}", catalog.titles_sorted().len());
    println!("Movies without genres: {}", featureless);
    println!(
        "\nPerformance: {:.0} movies/second",
        catalog.len() as f64 / elapsed.as_secs_f64()
    );
}
