//! Feature strings derived from genre tags.
//!
//! The catalog stores genres pipe-separated: "Animation|Children's|Comedy".
//! The similarity engine works on whitespace-separated bags of tokens, so
//! the pipes become spaces.

/// Build the bag-of-tokens feature string for one item
///
/// Example: "Adventure|Fantasy" -> "Adventure Fantasy"
///          "" -> ""
pub fn build_features(genre_field: &str) -> String {
    genre_field.replace('|', " ")
}

/// Split a pipe-separated genre field into its tags, dropping empty ones
pub fn split_genres(genre_field: &str) -> Vec<String> {
    genre_field
        .split('|')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}
