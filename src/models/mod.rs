mod movie;
mod query;
mod rating;
mod recommendation;

pub use movie::{normalize, Genres, Movie, MovieId, NO_GENRES};
pub use query::{QueryOutcome, TitleChanged};
pub use rating::{Rating, UserId};
pub use recommendation::{RecommendationRow, RecommendationTable, ScoredMovie, TitleMatch};
