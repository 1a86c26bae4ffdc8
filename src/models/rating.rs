use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::MovieId;

/// Identifier of the user who submitted a rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One user's score for one movie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub rating: f64,
    /// When the rating was submitted; scoring never looks at it
    pub rated_at: Option<DateTime<Utc>>,
}

impl Rating {
    pub fn new(user_id: UserId, movie_id: MovieId, rating: f64) -> Self {
        Self {
            user_id,
            movie_id,
            rating,
            rated_at: None,
        }
    }

    /// Attaches a Unix timestamp in seconds. Out-of-range values are dropped.
    pub fn with_timestamp(mut self, seconds: i64) -> Self {
        self.rated_at = DateTime::from_timestamp(seconds, 0);
        self
    }

    /// A rating counts as a "like" only when strictly above the threshold
    pub fn is_liked(&self, like_threshold: f64) -> bool {
        self.rating > like_threshold
    }
}
