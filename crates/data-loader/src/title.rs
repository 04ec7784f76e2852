//! Title normalization.
//!
//! Catalog titles arrive in the MovieLens style: `"Postman, The (1997)"`.
//! For display and matching we want `"The Postman"`:
//! - trailing `(yyyy)` year annotations are removed
//! - a trailing comma-article (`", The"`, `", A"`, `", An"`) is moved to the front
//!
//! All functions here are pure and never panic, whatever the input.

/// Articles that MovieLens moves to the end of a title
const ARTICLES: [&str; 3] = ["the", "a", "an"];

/// Normalize a raw catalog title into display form.
///
/// Example: "Titanic (1997)" -> "Titanic"
///          "Postman, The (1997)" -> "The Postman"
///          "Amelie" -> "Amelie"
///
/// Applying it twice gives the same result as applying it once.
pub fn normalize(raw: &str) -> String {
    let without_year = strip_years(raw);
    let reordered = reorder_article(without_year);
    strip_years(&reordered).to_string()
}

/// Move a trailing comma-article to the front of the title.
///
/// Only fires when the title splits on ',' into exactly two parts and the
/// second part is an article. The article keeps its original casing.
pub fn reorder_article(title: &str) -> String {
    let mut parts = title.split(',');

    match (parts.next(), parts.next(), parts.next()) {
        (Some(main), Some(article), None) if is_article(article) => {
            format!("{} {}", article.trim(), main.trim())
                .trim()
                .to_string()
        }
        _ => title.to_string(),
    }
}

/// Extract the trailing year from a raw title
///
/// Example: "Toy Story (1995)" -> Some(1995)
///          "Movie Title" -> None
pub fn extract_year(raw: &str) -> Option<u16> {
    let trimmed = raw.trim();
    let rest = strip_trailing_year(trimmed)?;
    trimmed[rest.len() + 1..trimmed.len() - 1].parse().ok()
}

fn is_article(candidate: &str) -> bool {
    let lowered = candidate.trim().to_lowercase();
    ARTICLES.contains(&lowered.as_str())
}

/// Trim, then remove `(yyyy)` suffixes until none is left.
fn strip_years(title: &str) -> &str {
    let mut current = title.trim();
    while let Some(rest) = strip_trailing_year(current) {
        current = rest.trim();
    }
    current
}

/// Returns the title without its `(yyyy)` suffix, if it has one.
///
/// The slice stops right before the opening parenthesis.
fn strip_trailing_year(title: &str) -> Option<&str> {
    let bytes = title.as_bytes();
    let n = bytes.len();
    if n < 6 {
        return None;
    }

    // "(", four digits, ")" - all ASCII, so n - 6 is a char boundary
    let suffix = &bytes[n - 6..];
    let is_year = suffix[0] == b'('
        && suffix[5] == b')'
        && suffix[1..5].iter().all(u8::is_ascii_digit);

    if is_year { Some(&title[..n - 6]) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_transforms() {
        assert_eq!(normalize("Titanic (1997)"), "Titanic");
        assert_eq!(normalize("Postman, The"), "The Postman");
        assert_eq!(normalize("Amelie"), "Amelie");
    }

    #[test]
    fn test_year_and_article_together() {
        assert_eq!(normalize("Postman, The (1997)"), "The Postman");
        assert_eq!(normalize("American President, An (1995)"), "An American President");
        assert_eq!(normalize("Few Good Men, A (1992)  "), "A Few Good Men");
    }

    #[test]
    fn test_non_article_commas_are_kept() {
        // Three parts: leave alone
        assert_eq!(
            normalize("Good, the Bad and the Ugly, The (1966)"),
            "Good, the Bad and the Ugly, The"
        );
        // Second part is not an article
        assert_eq!(normalize("Hello, Dolly! (1969)"), "Hello, Dolly!");
    }

    #[test]
    fn test_only_four_digit_trailing_years_are_removed() {
        assert_eq!(normalize("Blade Runner 2049"), "Blade Runner 2049");
        assert_eq!(normalize("Apollo 13 (1995)"), "Apollo 13");
        assert_eq!(normalize("Movie (12345)"), "Movie (12345)");
        assert_eq!(normalize("Movie (director's cut)"), "Movie (director's cut)");
        assert_eq!(normalize("Double (1990) (2000)"), "Double");
    }

    #[test]
    fn test_edge_inputs_do_not_panic() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("(1995)"), "");
        assert_eq!(normalize(", The"), "The");
        assert_eq!(normalize("Amélie (2001)"), "Amélie");
    }

    #[test]
    fn test_reorder_article() {
        assert_eq!(reorder_article("Postman, The"), "The Postman");
        assert_eq!(reorder_article("Thing, a"), "a Thing");
        assert_eq!(reorder_article("No comma here"), "No comma here");
    }

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year("Toy Story (1995)"), Some(1995));
        assert_eq!(extract_year("Toy Story (1995) "), Some(1995));
        assert_eq!(extract_year("Movie Title"), None);
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(raw in "[A-Za-z0-9 ,()]{0,40}") {
            let once = normalize(&raw);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn normalize_is_idempotent_on_catalog_shapes(
            main in "[A-Z][a-z]{1,10}( [A-Z][a-z]{1,8}){0,3}",
            article in prop::sample::select(vec!["The", "A", "An", "the", "Les", ""]),
            year in prop::option::of(1900u16..2030),
        ) {
            let mut raw = main.clone();
            if !article.is_empty() {
                raw.push_str(", ");
                raw.push_str(article);
            }
            if let Some(year) = year {
                raw.push_str(&format!(" ({})", year));
            }
            let once = normalize(&raw);
            prop_assert_eq!(normalize(&once), once);
        }
    }
}
