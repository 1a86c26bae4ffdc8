use std::collections::{BTreeSet, HashMap};

use crate::error::{AppError, AppResult};

/// L2-normalized sparse vector, entries sorted by term index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_counts(counts: HashMap<usize, f64>, idf: &[f64]) -> Self {
        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(term, tf)| (term, tf * idf[term]))
            .collect();
        entries.sort_unstable_by_key(|&(term, _)| term);

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut entries {
                *w /= norm;
            }
        }
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().copied()
    }
}

/// Unigram + bigram TF-IDF over whitespace tokens.
///
/// Tokens are lowercased on both the fit and transform side. Idf is smoothed,
/// `ln((1 + n) / (1 + df)) + 1`, so a term present in every document still
/// carries weight 1. The vocabulary is frozen once fitted.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learns the vocabulary and idf weights, returning one vector per document
    pub fn fit_transform<S: AsRef<str>>(documents: &[S]) -> AppResult<(Self, Vec<SparseVector>)> {
        if documents.is_empty() {
            return Err(AppError::EmptyCatalog);
        }

        let document_terms: Vec<Vec<String>> =
            documents.iter().map(|d| terms(d.as_ref())).collect();

        // Sorted vocabulary keeps term indices independent of hash order
        let vocabulary: HashMap<String, usize> = document_terms
            .iter()
            .flatten()
            .map(String::as_str)
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .enumerate()
            .map(|(index, term)| (term.to_string(), index))
            .collect();

        let mut document_frequency = vec![0usize; vocabulary.len()];
        for doc in &document_terms {
            let unique: BTreeSet<usize> = doc.iter().map(|t| vocabulary[t]).collect();
            for term in unique {
                document_frequency[term] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let vectorizer = Self { vocabulary, idf };
        let vectors = document_terms
            .iter()
            .map(|doc| vectorizer.vectorize(doc))
            .collect();
        Ok((vectorizer, vectors))
    }

    /// Projects text into the fitted space; unknown terms are dropped
    pub fn transform(&self, text: &str) -> SparseVector {
        self.vectorize(&terms(text))
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    fn vectorize(&self, doc_terms: &[String]) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in doc_terms {
            if let Some(&index) = self.vocabulary.get(term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }
        SparseVector::from_counts(counts, &self.idf)
    }
}

/// Lowercased unigrams followed by space-joined adjacent bigrams
fn terms(text: &str) -> Vec<String> {
    let tokens: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();
    let bigrams = tokens.windows(2).map(|pair| pair.join(" "));
    let mut terms = tokens.clone();
    terms.extend(bigrams);
    terms
}
