//! Turn a display title into a search query.

use data_loader::reorder_article;

/// Clean a title for searching
///
/// Every parenthetical is dropped (years, alternate titles), whitespace is
/// collapsed, and a trailing comma-article is moved to the front.
///
/// Example: "City of Lost Children, The (Cité des enfants perdus, La) (1995)"
///          -> "The City of Lost Children"
pub fn clean_title(title: &str) -> String {
    let mut stripped = String::with_capacity(title.len());
    let mut depth = 0usize;

    for c in title.chars() {
        match c {
            '(' => depth += 1,
            ')' if depth > 0 => depth -= 1,
            _ if depth == 0 => stripped.push(c),
            _ => {}
        }
    }

    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    reorder_article(&collapsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_title() {
        assert_eq!(clean_title("Toy Story (1995)"), "Toy Story");
        assert_eq!(clean_title("Postman, The"), "The Postman");
        assert_eq!(
            clean_title("City of Lost Children, The (Cité des enfants perdus, La) (1995)"),
            "The City of Lost Children"
        );
        assert_eq!(clean_title("Se7en (a.k.a. Seven) (1995)"), "Se7en");
    }

    #[test]
    fn test_unbalanced_parentheses() {
        assert_eq!(clean_title("Broken (title"), "Broken");
        assert_eq!(clean_title("Stray) bracket"), "Stray) bracket");
        assert_eq!(clean_title(""), "");
    }
}
