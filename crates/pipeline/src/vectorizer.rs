//! Bag-of-words count vectorizer.
//!
//! Turns feature strings into sparse term-count vectors over a shared,
//! lexicographically ordered vocabulary.
//!
//! Tokenization follows the usual bag-of-words default:
//! - lowercase the text
//! - split into runs of word characters (alphanumeric or `_`)
//! - keep tokens with at least two characters
//! - drop stop words
//!
//! So "Sci-Fi" yields `sci` and `fi`, and "Children's" yields `children`.

use crate::stopwords::StopWords;
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Shortest token kept in the vocabulary
const MIN_TOKEN_CHARS: usize = 2;

/// Sparse integer term-count vector
///
/// Entries are `(term index, count)` sorted by term index with no zero counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, u32)>,
    norm: f64,
}

impl SparseVector {
    /// Build from unsorted term counts
    pub fn from_counts(counts: BTreeMap<usize, u32>) -> Self {
        let entries: Vec<(usize, u32)> = counts.into_iter().filter(|&(_, c)| c > 0).collect();
        let norm = entries
            .iter()
            .map(|&(_, c)| (c as f64) * (c as f64))
            .sum::<f64>()
            .sqrt();
        Self { entries, norm }
    }

    pub fn entries(&self) -> &[(usize, u32)] {
        &self.entries
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        self.norm
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dot product by merging the two sorted entry lists
    pub fn dot(&self, other: &SparseVector) -> u64 {
        let (mut a, mut b) = (0, 0);
        let mut total = 0u64;

        while a < self.entries.len() && b < other.entries.len() {
            let (ta, ca) = self.entries[a];
            let (tb, cb) = other.entries[b];
            if ta == tb {
                total += ca as u64 * cb as u64;
                a += 1;
                b += 1;
            } else if ta < tb {
                a += 1;
            } else {
                b += 1;
            }
        }
        total
    }

    /// Cosine similarity in [0, 1]; 0 when either vector is all-zero
    pub fn cosine(&self, other: &SparseVector) -> f32 {
        if self.is_zero() || other.is_zero() {
            return 0.0;
        }
        let sim = self.dot(other) as f64 / (self.norm * other.norm);
        sim.clamp(0.0, 1.0) as f32
    }
}

/// Output of [`CountVectorizer::fit_transform`]
#[derive(Debug, Clone, Default)]
pub struct TermCounts {
    /// term -> column index, in lexicographic order
    pub vocabulary: BTreeMap<String, usize>,
    /// one vector per input document, same order as the input
    pub vectors: Vec<SparseVector>,
}

/// Count vectorizer with a fixed stop word list
#[derive(Debug, Clone, Default)]
pub struct CountVectorizer {
    stop_words: StopWords,
}

impl CountVectorizer {
    pub fn new(stop_words: StopWords) -> Self {
        Self { stop_words }
    }

    /// Split one document into vocabulary tokens
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
            .filter(|token| !self.stop_words.is_stop_word(token))
            .map(String::from)
            .collect()
    }

    /// Learn the vocabulary from `documents` and count terms in each
    pub fn fit_transform<S>(&self, documents: &[S]) -> TermCounts
    where
        S: AsRef<str> + Sync,
    {
        let tokenized: Vec<Vec<String>> = documents
            .par_iter()
            .map(|doc| self.tokenize(doc.as_ref()))
            .collect();

        // BTreeMap keys iterate sorted, which fixes the column order
        let mut vocabulary: BTreeMap<String, usize> = tokenized
            .iter()
            .flatten()
            .map(|token| (token.clone(), 0))
            .collect();
        for (index, column) in vocabulary.values_mut().enumerate() {
            *column = index;
        }

        let vectors = tokenized
            .par_iter()
            .map(|tokens| {
                let mut counts: BTreeMap<usize, u32> = BTreeMap::new();
                for token in tokens {
                    if let Some(&column) = vocabulary.get(token) {
                        *counts.entry(column).or_insert(0) += 1;
                    }
                }
                SparseVector::from_counts(counts)
            })
            .collect();

        TermCounts { vocabulary, vectors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        let vectorizer = CountVectorizer::default();

        assert_eq!(vectorizer.tokenize("Animation Comedy"), vec!["animation", "comedy"]);
        assert_eq!(vectorizer.tokenize("Sci-Fi Film-Noir"), vec!["sci", "fi", "film", "noir"]);
        assert_eq!(vectorizer.tokenize("Children's"), vec!["children"]);
        assert_eq!(vectorizer.tokenize("(no genres listed)"), vec!["genres", "listed"]);
        assert!(vectorizer.tokenize("").is_empty());
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let vectorizer = CountVectorizer::default();
        let counts = vectorizer.fit_transform(&["Western Action", "Comedy Action"]);

        let terms: Vec<&str> = counts.vocabulary.keys().map(String::as_str).collect();
        assert_eq!(terms, vec!["action", "comedy", "western"]);
        assert_eq!(counts.vocabulary["western"], 2);

        assert_eq!(counts.vectors[0].entries(), &[(0, 1), (2, 1)]);
        assert_eq!(counts.vectors[1].entries(), &[(0, 1), (1, 1)]);
    }

    #[test]
    fn test_repeated_terms_are_counted() {
        let vectorizer = CountVectorizer::default();
        let counts = vectorizer.fit_transform(&["Drama Drama Romance"]);

        assert_eq!(counts.vectors[0].entries(), &[(0, 2), (1, 1)]);
    }

    #[test]
    fn test_cosine() {
        let vectorizer = CountVectorizer::default();
        let counts =
            vectorizer.fit_transform(&["Animation Comedy", "Comedy Romance", "Adventure", ""]);
        let v = &counts.vectors;

        assert!((v[0].cosine(&v[1]) - 0.5).abs() < 1e-6);
        assert_eq!(v[0].cosine(&v[2]), 0.0);
        assert_eq!(v[0].cosine(&v[3]), 0.0);
        assert!((v[0].cosine(&v[0]) - 1.0).abs() < 1e-6);
    }
}
