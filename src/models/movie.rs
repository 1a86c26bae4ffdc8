use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Placeholder the MovieLens exports use for a movie without genres
pub const NO_GENRES: &str = "(no genres listed)";

const GENRE_DELIMITER: char = '|';

/// Strips every character that is not an ASCII letter, digit or space.
///
/// Order, spacing and case of the surviving characters are kept. Catalog
/// titles and queries both pass through here.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect()
}

/// Catalog identifier of a movie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub i64);

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog entry
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Movie {
    pub movie_id: MovieId,
    pub title: String,
    pub genres: Genres,
}

impl Movie {
    pub fn new(movie_id: MovieId, title: impl Into<String>, genres: Genres) -> Self {
        Self {
            movie_id,
            title: title.into(),
            genres,
        }
    }

    /// Title reduced to ASCII letters, digits and spaces.
    ///
    /// Always derived from `title`, never stored.
    pub fn normalized_title(&self) -> String {
        normalize(&self.title)
    }
}

/// Ordered set of genre labels, as found in the source table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Genres(Vec<String>);

impl Genres {
    /// Parses a `|`-delimited genre field.
    ///
    /// Blank labels and repeats are dropped; [`NO_GENRES`] yields an empty set.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == NO_GENRES {
            return Self::default();
        }

        let mut labels: Vec<String> = Vec::new();
        for label in raw.split(GENRE_DELIMITER).map(str::trim) {
            if !label.is_empty() && !labels.iter().any(|l| l == label) {
                labels.push(label.to_string());
            }
        }
        Self(labels)
    }

}

impl Display for Genres {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return f.write_str(NO_GENRES);
        }
        let mut first = true;
        for label in &self.0 {
            if !first {
                write!(f, "{}", GENRE_DELIMITER)?;
            }
            f.write_str(label)?;
            first = false;
        }
        Ok(())
    }
}
