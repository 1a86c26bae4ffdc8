use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{Movie, MovieId, Rating, UserId},
};

/// Immutable movie catalog, indexed by id
#[derive(Debug, Clone)]
pub struct MovieTable {
    movies: Vec<Movie>,
    positions: HashMap<MovieId, usize>,
}

impl MovieTable {
    /// Builds the table, rejecting repeated movie ids
    pub fn new(movies: Vec<Movie>) -> AppResult<Self> {
        let mut positions = HashMap::with_capacity(movies.len());
        for (position, movie) in movies.iter().enumerate() {
            if positions.insert(movie.movie_id, position).is_some() {
                return Err(AppError::DuplicateMovie(movie.movie_id));
            }
        }
        Ok(Self { movies, positions })
    }

    pub fn get(&self, movie_id: MovieId) -> Option<&Movie> {
        self.positions.get(&movie_id).map(|&p| &self.movies[p])
    }

    /// Movies in their original catalog order
    pub fn as_slice(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

/// Immutable ratings table with lookups by movie and by user
#[derive(Debug, Clone, Default)]
pub struct RatingTable {
    ratings: Vec<Rating>,
    by_movie: HashMap<MovieId, Vec<usize>>,
    by_user: HashMap<UserId, Vec<usize>>,
}

impl RatingTable {
    pub fn new(ratings: Vec<Rating>) -> Self {
        let mut by_movie: HashMap<MovieId, Vec<usize>> = HashMap::new();
        let mut by_user: HashMap<UserId, Vec<usize>> = HashMap::new();
        for (position, rating) in ratings.iter().enumerate() {
            by_movie.entry(rating.movie_id).or_default().push(position);
            by_user.entry(rating.user_id).or_default().push(position);
        }
        Self {
            ratings,
            by_movie,
            by_user,
        }
    }

    /// Every rating submitted for `movie_id`
    pub fn for_movie(&self, movie_id: MovieId) -> impl Iterator<Item = &Rating> + '_ {
        self.by_movie
            .get(&movie_id)
            .into_iter()
            .flatten()
            .map(|&p| &self.ratings[p])
    }

    /// Every rating submitted by `user_id`
    pub fn by_user(&self, user_id: UserId) -> impl Iterator<Item = &Rating> + '_ {
        self.by_user
            .get(&user_id)
            .into_iter()
            .flatten()
            .map(|&p| &self.ratings[p])
    }

    pub fn user_count(&self) -> usize {
        self.by_user.len()
    }

    /// Earliest and latest timestamps, if any rating carries one
    pub fn time_span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let mut stamps = self.ratings.iter().filter_map(|r| r.rated_at);
        let first = stamps.next()?;
        Some(stamps.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t))))
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Genres;

    fn movie(id: i64, title: &str) -> Movie {
        Movie::new(MovieId(id), title, Genres::default())
    }

    #[test]
    fn test_movie_table_lookup() {
        let table =
            MovieTable::new(vec![movie(1, "Toy Story (1995)"), movie(6, "Heat (1995)")]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(MovieId(6)).unwrap().title, "Heat (1995)");
        assert!(table.get(MovieId(2)).is_none());
        assert_eq!(table.as_slice()[0].movie_id, MovieId(1));
    }

    #[test]
    fn test_movie_table_rejects_duplicate_ids() {
        let result = MovieTable::new(vec![movie(1, "Toy Story"), movie(1, "Toy Story again")]);
        assert!(matches!(result, Err(AppError::DuplicateMovie(MovieId(1)))));
    }

    #[test]
    fn test_rating_table_indexes() {
        let table = RatingTable::new(vec![
            Rating::new(UserId(1), MovieId(1), 5.0),
            Rating::new(UserId(1), MovieId(2), 3.0),
            Rating::new(UserId(2), MovieId(1), 4.5),
        ]);

        assert_eq!(table.len(), 3);
        assert_eq!(table.user_count(), 2);
        assert_eq!(table.for_movie(MovieId(1)).count(), 2);
        assert_eq!(table.by_user(UserId(1)).count(), 2);
        assert_eq!(table.for_movie(MovieId(99)).count(), 0);
    }

    #[test]
    fn test_rating_table_time_span() {
        let table = RatingTable::new(vec![
            Rating::new(UserId(1), MovieId(1), 5.0).with_timestamp(2_000),
            Rating::new(UserId(1), MovieId(2), 3.0),
            Rating::new(UserId(2), MovieId(1), 4.5).with_timestamp(1_000),
        ]);
        let (first, last) = table.time_span().unwrap();
        assert_eq!(first.timestamp(), 1_000);
        assert_eq!(last.timestamp(), 2_000);

        assert!(RatingTable::default().time_span().is_none());
    }
}
