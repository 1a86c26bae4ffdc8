use csv::StringRecord;
use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::{
    error::{AppError, AppResult},
    models::{Genres, Movie, MovieId, Rating, UserId},
};

const MOVIES: &str = "movies";
const RATINGS: &str = "ratings";

/// Where the two startup tables come from
///
/// Both loads happen once, before any query is served. Any error here is
/// fatal to startup.
#[cfg_attr(test, mockall::automock)]
pub trait TableSource {
    fn load_movies(&self) -> AppResult<Vec<Movie>>;

    fn load_ratings(&self) -> AppResult<Vec<Rating>>;
}

/// Loads MovieLens-style CSV exports from disk
#[derive(Debug, Clone)]
pub struct CsvSource {
    movies_path: PathBuf,
    ratings_path: PathBuf,
}

impl CsvSource {
    pub fn new(movies_path: impl AsRef<Path>, ratings_path: impl AsRef<Path>) -> Self {
        Self {
            movies_path: movies_path.as_ref().to_path_buf(),
            ratings_path: ratings_path.as_ref().to_path_buf(),
        }
    }
}

impl TableSource for CsvSource {
    fn load_movies(&self) -> AppResult<Vec<Movie>> {
        tracing::debug!(path = %self.movies_path.display(), "Reading movie table");
        read_movies(csv::Reader::from_path(&self.movies_path)?)
    }

    fn load_ratings(&self) -> AppResult<Vec<Rating>> {
        tracing::debug!(path = %self.ratings_path.display(), "Reading ratings table");
        read_ratings(csv::Reader::from_path(&self.ratings_path)?)
    }
}

/// Parses a movie table with columns `movieId,title,genres`
pub fn read_movies<R: io::Read>(mut reader: csv::Reader<R>) -> AppResult<Vec<Movie>> {
    let headers = reader.headers()?.clone();
    let id_col = column(&headers, MOVIES, "movieId", "movie_id")?;
    let title_col = column(&headers, MOVIES, "title", "title")?;
    let genres_col = column(&headers, MOVIES, "genres", "genres")?;

    let mut movies = Vec::new();
    for record in reader.records() {
        let record = record?;
        let movie_id = parse_field(&record, id_col, MOVIES, "movieId")?;
        let title = field(&record, title_col, MOVIES, "title")?;
        let genres = field(&record, genres_col, MOVIES, "genres")?;
        movies.push(Movie::new(MovieId(movie_id), title, Genres::parse(genres)));
    }
    Ok(movies)
}

/// Parses a ratings table with columns `userId,movieId,rating` and an optional `timestamp`
pub fn read_ratings<R: io::Read>(mut reader: csv::Reader<R>) -> AppResult<Vec<Rating>> {
    let headers = reader.headers()?.clone();
    let user_col = column(&headers, RATINGS, "userId", "user_id")?;
    let movie_col = column(&headers, RATINGS, "movieId", "movie_id")?;
    let rating_col = column(&headers, RATINGS, "rating", "rating")?;
    let timestamp_col = column(&headers, RATINGS, "timestamp", "timestamp").ok();

    let mut ratings = Vec::new();
    for record in reader.records() {
        let record = record?;
        let user_id = parse_field(&record, user_col, RATINGS, "userId")?;
        let movie_id = parse_field(&record, movie_col, RATINGS, "movieId")?;
        let score = parse_field(&record, rating_col, RATINGS, "rating")?;

        let mut rating = Rating::new(UserId(user_id), MovieId(movie_id), score);
        if let Some(col) = timestamp_col {
            let raw = field(&record, col, RATINGS, "timestamp")?;
            if !raw.is_empty() {
                match parse_timestamp(raw) {
                    Some(seconds) => rating = rating.with_timestamp(seconds),
                    None => tracing::warn!(
                        line = line_of(&record),
                        timestamp = raw,
                        "Ignoring unreadable rating timestamp"
                    ),
                }
            }
        }
        ratings.push(rating);
    }
    Ok(ratings)
}

/// Unix seconds, accepting decimal exports such as `964982703.0`
fn parse_timestamp(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|s| s.is_finite() && s.abs() < i64::MAX as f64)
            .map(|s| s.trunc() as i64)
    })
}

fn column(
    headers: &StringRecord,
    table: &'static str,
    name: &'static str,
    alias: &str,
) -> AppResult<usize> {
    headers
        .iter()
        .map(str::trim)
        .position(|h| h == name || h == alias)
        .ok_or(AppError::MissingColumn {
            table,
            column: name,
        })
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}

fn field<'r>(
    record: &'r StringRecord,
    index: usize,
    table: &'static str,
    column: &str,
) -> AppResult<&'r str> {
    record
        .get(index)
        .map(str::trim)
        .ok_or_else(|| AppError::Parse {
            table,
            line: line_of(record),
            message: format!("missing value for '{}'", column),
        })
}

fn parse_field<T>(
    record: &StringRecord,
    index: usize,
    table: &'static str,
    column: &str,
) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = field(record, index, table, column)?;
    raw.parse().map_err(|e| AppError::Parse {
        table,
        line: line_of(record),
        message: format!("invalid {} '{}': {}", column, raw, e),
    })
}
