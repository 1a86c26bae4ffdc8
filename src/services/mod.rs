pub mod recommendations;
pub mod recommender;
pub mod tfidf;
pub mod title_search;

pub use recommendations::ScoringParams;
pub use recommender::{Recommender, SearchParams};
pub use crate::models::normalize;
pub use title_search::CatalogIndex;
