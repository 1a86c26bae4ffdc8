use serde::{Deserialize, Serialize};

use super::{Movie, RecommendationRow};

/// The text box value changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleChanged {
    pub value: String,
}

impl TitleChanged {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Result of handling one [`TitleChanged`] event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryOutcome {
    /// Input is not long enough to search; the UI shows nothing
    TooShort,
    /// No catalog title shares a term with the input
    NoMatch,
    /// Best-matching title and the movies its fans favor (possibly none)
    Recommendations {
        seed: Movie,
        rows: Vec<RecommendationRow>,
    },
}

impl QueryOutcome {
    /// Rows to render; empty for every outcome other than `Recommendations`
    pub fn rows(&self) -> &[RecommendationRow] {
        match self {
            QueryOutcome::Recommendations { rows, .. } => rows,
            QueryOutcome::TooShort | QueryOutcome::NoMatch => &[],
        }
    }
}
