use std::sync::Arc;

use crate::{
    data::MovieTable,
    error::{AppError, AppResult},
    models::{normalize, TitleMatch},
};

use super::tfidf::TfidfVectorizer;

/// Default number of titles returned by a search
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// TF-IDF search space over every catalog title, frozen at build time
pub struct CatalogIndex {
    movies: Arc<MovieTable>,
    vectorizer: TfidfVectorizer,
    /// term index -> (catalog position, weight)
    postings: Vec<Vec<(usize, f64)>>,
}

impl CatalogIndex {
    /// Fits the vectorizer over the normalized titles
    pub fn build(movies: Arc<MovieTable>) -> AppResult<Self> {
        if movies.is_empty() {
            return Err(AppError::EmptyCatalog);
        }

        let titles: Vec<String> = movies.as_slice().iter().map(|m| m.normalized_title()).collect();
        let (vectorizer, vectors) = TfidfVectorizer::fit_transform(&titles)?;

        let mut postings = vec![Vec::new(); vectorizer.vocabulary_size()];
        for (position, vector) in vectors.iter().enumerate() {
            for (term, weight) in vector.iter() {
                postings[term].push((position, weight));
            }
        }

        tracing::info!(
            titles = movies.len(),
            vocabulary = vectorizer.vocabulary_size(),
            "Built title index"
        );

        Ok(Self {
            movies,
            vectorizer,
            postings,
        })
    }

    /// Returns up to `k` titles, most similar first.
    ///
    /// All titles are fully sorted by cosine similarity; equal scores keep
    /// catalog order. Titles sharing no term with the query score 0 and still
    /// appear, after every positive match.
    pub fn query(&self, raw_title: &str, k: usize) -> Vec<TitleMatch<'_>> {
        let query = self.vectorizer.transform(&normalize(raw_title));

        let mut similarities = vec![0.0; self.movies.len()];
        for (term, weight) in query.iter() {
            for &(position, doc_weight) in &self.postings[term] {
                similarities[position] += weight * doc_weight;
            }
        }

        let mut ranked: Vec<(usize, f64)> = similarities.into_iter().enumerate().collect();
        // stable sort: ties stay in catalog order
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(k);

        let movies = self.movies.as_slice();
        ranked
            .into_iter()
            .map(|(position, similarity)| TitleMatch {
                movie: &movies[position],
                similarity,
            })
            .collect()
    }

    /// Top match, or `None` when no title shares a term with the query
    pub fn best_match(&self, raw_title: &str) -> Option<TitleMatch<'_>> {
        self.query(raw_title, 1)
            .into_iter()
            .next()
            .filter(|m| m.similarity > 0.0)
    }

    pub fn movies(&self) -> &Arc<MovieTable> {
        &self.movies
    }
}
