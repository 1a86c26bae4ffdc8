use std::sync::Arc;

use crate::{
    data::{MovieTable, RatingTable, TableSource},
    error::{AppError, AppResult},
    models::{MovieId, QueryOutcome, RecommendationRow, TitleChanged, TitleMatch},
};

use super::{
    recommendations::{attach_movies, recommend, ScoringParams},
    title_search::{CatalogIndex, DEFAULT_SEARCH_LIMIT},
};

/// Search-side knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    /// Titles returned by a plain search
    pub limit: usize,
    /// Inputs with this many characters or fewer are ignored
    pub min_query_chars: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SEARCH_LIMIT,
            min_query_chars: 5,
        }
    }
}

/// Catalog, ratings and title index, built once and only read afterwards
pub struct Recommender {
    index: CatalogIndex,
    ratings: RatingTable,
    scoring: ScoringParams,
    search: SearchParams,
}

impl Recommender {
    pub fn new(
        movies: MovieTable,
        ratings: RatingTable,
        scoring: ScoringParams,
        search: SearchParams,
    ) -> AppResult<Self> {
        scoring.validate()?;
        let index = CatalogIndex::build(Arc::new(movies))?;
        Ok(Self {
            index,
            ratings,
            scoring,
            search,
        })
    }

    /// Loads both tables from `source` and builds the title index
    pub fn from_source(
        source: &dyn TableSource,
        scoring: ScoringParams,
        search: SearchParams,
    ) -> AppResult<Self> {
        let movies = MovieTable::new(source.load_movies()?)?;
        tracing::info!(movies = movies.len(), "Loaded movie table");

        let ratings = RatingTable::new(source.load_ratings()?);
        match ratings.time_span() {
            Some((first, last)) => tracing::info!(
                ratings = ratings.len(),
                users = ratings.user_count(),
                first = %first.date_naive(),
                last = %last.date_naive(),
                "Loaded ratings table"
            ),
            None => tracing::info!(
                ratings = ratings.len(),
                users = ratings.user_count(),
                "Loaded ratings table"
            ),
        }

        Self::new(movies, ratings, scoring, search)
    }

    /// Closest catalog titles, best first; `limit` defaults to the configured one
    pub fn search(&self, raw_title: &str, limit: Option<usize>) -> Vec<TitleMatch<'_>> {
        self.index.query(raw_title, limit.unwrap_or(self.search.limit))
    }

    /// Recommendation rows for a seed movie known to the catalog
    pub fn similar_to(&self, seed: MovieId) -> AppResult<Vec<RecommendationRow>> {
        if self.movies().get(seed).is_none() {
            return Err(AppError::NotFound(format!("movie {}", seed)));
        }
        Ok(self.rows_for(seed))
    }

    /// Searches for the title and recommends from its best match
    pub fn recommend_for_title(&self, raw_title: &str) -> QueryOutcome {
        let Some(best) = self.index.best_match(raw_title) else {
            tracing::debug!(query = %raw_title, "No title matched");
            return QueryOutcome::NoMatch;
        };

        tracing::debug!(
            query = %raw_title,
            movie_id = %best.movie.movie_id,
            similarity = best.similarity,
            "Matched title"
        );
        QueryOutcome::Recommendations {
            rows: self.rows_for(best.movie.movie_id),
            seed: best.movie.clone(),
        }
    }

    /// Handles a text box change, ignoring inputs that are too short
    pub fn on_title_changed(&self, event: &TitleChanged) -> QueryOutcome {
        if event.value.chars().count() <= self.search.min_query_chars {
            return QueryOutcome::TooShort;
        }
        self.recommend_for_title(&event.value)
    }

    pub fn movies(&self) -> &MovieTable {
        self.index.movies()
    }

    pub fn ratings(&self) -> &RatingTable {
        &self.ratings
    }

    fn rows_for(&self, seed: MovieId) -> Vec<RecommendationRow> {
        let scored = recommend(&self.ratings, seed, &self.scoring);
        attach_movies(&scored, self.movies())
    }
}
