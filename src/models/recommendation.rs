use serde::Serialize;
use std::fmt::Display;

use super::{Genres, Movie, MovieId};

/// A catalog entry paired with its cosine similarity to a title query
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TitleMatch<'a> {
    pub movie: &'a Movie,
    pub similarity: f64,
}

/// Co-rating statistics for one candidate movie
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMovie {
    pub movie_id: MovieId,
    /// Share of the seed's fans who also liked this movie
    pub similar_fraction: f64,
    /// Share of all engaged users who liked this movie
    pub general_fraction: f64,
    /// `similar_fraction / general_fraction`
    pub score: f64,
}

/// One visible line of a recommendation result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationRow {
    /// Join key only, not part of the rendered output
    #[serde(skip_serializing)]
    pub movie_id: MovieId,
    pub score: f64,
    pub title: String,
    pub genres: Genres,
}

impl RecommendationRow {
    pub fn new(scored: &ScoredMovie, movie: &Movie) -> Self {
        Self {
            movie_id: scored.movie_id,
            score: scored.score,
            title: movie.title.clone(),
            genres: movie.genres.clone(),
        }
    }
}

/// Fixed-width text rendering of recommendation rows
pub struct RecommendationTable<'a>(pub &'a [RecommendationRow]);

impl Display for RecommendationTable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let scores: Vec<String> = self.0.iter().map(|r| format!("{:.3}", r.score)).collect();
        let score_width = scores.iter().map(String::len).max().unwrap_or(0).max("score".len());
        let title_width = self
            .0
            .iter()
            .map(|r| r.title.chars().count())
            .max()
            .unwrap_or(0)
            .max("title".len());

        writeln!(
            f,
            "{:>score_width$}  {:<title_width$}  genres",
            "score", "title"
        )?;
        for (row, score) in self.0.iter().zip(&scores) {
            writeln!(
                f,
                "{:>score_width$}  {:<title_width$}  {}",
                score, row.title, row.genres
            )?;
        }
        Ok(())
    }
}
