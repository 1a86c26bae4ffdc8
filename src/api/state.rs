use std::sync::Arc;

use crate::services::Recommender;

/// Shared application state
///
/// The recommender is never mutated after startup, so handlers share it
/// without a lock.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
}

impl AppState {
    pub fn new(recommender: Arc<Recommender>) -> Self {
        Self { recommender }
    }
}
