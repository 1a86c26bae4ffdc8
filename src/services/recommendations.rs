use std::collections::{HashMap, HashSet};

use crate::{
    data::{MovieTable, RatingTable},
    error::{AppError, AppResult},
    models::{MovieId, RecommendationRow, ScoredMovie, UserId},
};

/// Tuning knobs for co-rating scoring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringParams {
    /// Ratings strictly above this count as a like
    pub like_threshold: f64,
    /// Candidates need a fan share strictly above this
    pub min_support: f64,
    /// Maximum number of rows returned
    pub top_n: usize,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            like_threshold: 4.0,
            min_support: 0.10,
            top_n: 10,
        }
    }
}

impl ScoringParams {
    pub fn validate(&self) -> AppResult<()> {
        if !self.like_threshold.is_finite() {
            return Err(AppError::InvalidInput(
                "like_threshold must be a finite number".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.min_support) {
            return Err(AppError::InvalidInput(format!(
                "min_support must be in [0, 1), got {}",
                self.min_support
            )));
        }
        if self.top_n == 0 {
            return Err(AppError::InvalidInput(
                "top_n must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Movies the seed movie's fans favor, ranked by fan share.
///
/// Fans are users who liked the seed. A candidate is any movie liked by more
/// than `min_support` of the fans. Its score is the lift of the fan share over
/// the share of engaged users (anyone who liked at least one candidate) who
/// liked it. Rows are ordered by fan share, then movie id; the score is
/// reported but does not drive the order. The seed itself can show up.
///
/// A seed nobody liked gives an empty result.
pub fn recommend(
    ratings: &RatingTable,
    seed: MovieId,
    params: &ScoringParams,
) -> Vec<ScoredMovie> {
    let threshold = params.like_threshold;

    let fans: HashSet<UserId> = ratings
        .for_movie(seed)
        .filter(|r| r.is_liked(threshold))
        .map(|r| r.user_id)
        .collect();
    if fans.is_empty() {
        tracing::debug!(%seed, "Seed movie has no fans");
        return Vec::new();
    }

    let mut fan_likes: HashMap<MovieId, HashSet<UserId>> = HashMap::new();
    for &fan in &fans {
        for rating in ratings.by_user(fan).filter(|r| r.is_liked(threshold)) {
            fan_likes.entry(rating.movie_id).or_default().insert(fan);
        }
    }

    let fan_count = fans.len() as f64;
    let candidates: HashMap<MovieId, f64> = fan_likes
        .into_iter()
        .map(|(movie_id, users)| (movie_id, users.len() as f64 / fan_count))
        .filter(|&(_, similar_fraction)| similar_fraction > params.min_support)
        .collect();
    if candidates.is_empty() {
        tracing::debug!(%seed, fans = fans.len(), "No candidate cleared the support filter");
        return Vec::new();
    }

    let mut engaged: HashSet<UserId> = HashSet::new();
    let mut general_likes: HashMap<MovieId, HashSet<UserId>> = HashMap::new();
    for &movie_id in candidates.keys() {
        for rating in ratings.for_movie(movie_id).filter(|r| r.is_liked(threshold)) {
            engaged.insert(rating.user_id);
            general_likes.entry(movie_id).or_default().insert(rating.user_id);
        }
    }
    let universe = engaged.len() as f64;

    let mut scored: Vec<ScoredMovie> = candidates
        .into_iter()
        .filter_map(|(movie_id, similar_fraction)| {
            let general_fraction = match general_likes.get(&movie_id) {
                Some(users) if universe > 0.0 => users.len() as f64 / universe,
                _ => 0.0,
            };
            let score = lift(similar_fraction, general_fraction)?;
            Some(ScoredMovie {
                movie_id,
                similar_fraction,
                general_fraction,
                score,
            })
        })
        .collect();

    scored.sort_by(|a, b| {
        b.similar_fraction
            .total_cmp(&a.similar_fraction)
            .then_with(|| a.movie_id.cmp(&b.movie_id))
    });
    scored.truncate(params.top_n);

    tracing::debug!(
        %seed,
        fans = fans.len(),
        engaged = engaged.len(),
        returned = scored.len(),
        "Scored co-rated movies"
    );
    scored
}

/// Fan share over general share; `None` when the ratio is undefined
fn lift(similar_fraction: f64, general_fraction: f64) -> Option<f64> {
    if general_fraction <= 0.0 || !general_fraction.is_finite() {
        return None;
    }
    let score = similar_fraction / general_fraction;
    score.is_finite().then_some(score)
}

/// Joins scored movies to the catalog, keeping their order.
///
/// Ids missing from the catalog are dropped.
pub fn attach_movies(scored: &[ScoredMovie], movies: &MovieTable) -> Vec<RecommendationRow> {
    scored
        .iter()
        .filter_map(|s| match movies.get(s.movie_id) {
            Some(movie) => Some(RecommendationRow::new(s, movie)),
            None => {
                tracing::warn!(movie_id = %s.movie_id, "Rated movie missing from catalog");
                None
            }
        })
        .collect()
}
