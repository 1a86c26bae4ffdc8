use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::QueryId,
    models::{Genres, MovieId, QueryOutcome, RecommendationRow, TitleChanged, TitleMatch},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct TitleMatchResponse {
    pub movie_id: MovieId,
    pub title: String,
    pub genres: Genres,
    pub similarity: f64,
}

impl From<TitleMatch<'_>> for TitleMatchResponse {
    fn from(m: TitleMatch<'_>) -> Self {
        Self {
            movie_id: m.movie.movie_id,
            title: m.movie.title.clone(),
            genres: m.movie.genres.clone(),
            similarity: m.similarity,
        }
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let recommender = &state.recommender;
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "movies": recommender.movies().len(),
            "ratings": recommender.ratings().len(),
        })),
    )
}

/// Closest catalog titles for a free-text query
pub async fn search_titles(
    State(state): State<AppState>,
    params: Result<Query<SearchQuery>, QueryRejection>,
) -> AppResult<Json<Vec<TitleMatchResponse>>> {
    let Query(params) = params?;
    if params.limit == Some(0) {
        return Err(AppError::InvalidInput("limit must be at least 1".to_string()));
    }
    let matches = state
        .recommender
        .search(&params.q, params.limit)
        .into_iter()
        .map(TitleMatchResponse::from)
        .collect();
    Ok(Json(matches))
}

/// Recommendations for a known seed movie
pub async fn similar_movies(
    State(state): State<AppState>,
    movie_id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<Vec<RecommendationRow>>> {
    let Path(movie_id) = movie_id?;
    let rows = state.recommender.similar_to(MovieId(movie_id))?;
    Ok(Json(rows))
}

/// Text box change event from the UI
pub async fn title_changed(
    State(state): State<AppState>,
    Extension(query_id): Extension<QueryId>,
    event: Result<Json<TitleChanged>, JsonRejection>,
) -> AppResult<Json<QueryOutcome>> {
    let Json(event) = event?;
    Ok(Json(handle_event(&state, query_id, &event)))
}

/// Same as a change event, for clients that prefer a GET
pub async fn recommendations(
    State(state): State<AppState>,
    Extension(query_id): Extension<QueryId>,
    params: Result<Query<RecommendationQuery>, QueryRejection>,
) -> AppResult<Json<QueryOutcome>> {
    let Query(params) = params?;
    Ok(Json(handle_event(&state, query_id, &TitleChanged::new(params.q))))
}

fn handle_event(state: &AppState, query_id: QueryId, event: &TitleChanged) -> QueryOutcome {
    let outcome = state.recommender.on_title_changed(event);
    tracing::info!(
        %query_id,
        query = %event.value,
        rows = outcome.rows().len(),
        "Handled title change"
    );
    outcome
}
