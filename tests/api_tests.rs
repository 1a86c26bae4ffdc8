mod common;

use std::sync::Arc;

use axum::{
    body::Bytes,
    http::{HeaderName, HeaderValue, StatusCode},
};
use axum_test::TestServer;
use serde_json::{json, Value};

use reelmatch::api::{create_router, AppState};

use common::fixture_recommender;

fn create_test_server() -> TestServer {
    let state = AppState::new(Arc::new(fixture_recommender()));
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

fn titles(rows: &Value) -> Vec<&str> {
    rows.as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["movies"], 4);
    assert_eq!(body["ratings"], 6);
}

#[tokio::test]
async fn test_search_titles() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/titles/search")
        .add_query_param("q", "toy story")
        .await;
    response.assert_status_ok();

    let matches: Value = response.json();
    // default limit of 5 exceeds the catalog
    assert_eq!(matches.as_array().unwrap().len(), 4);
    assert_eq!(titles(&matches)[..2], ["Toy Story (1995)", "Toy Story 2 (1999)"]);
    assert_eq!(matches[0]["movie_id"], 1);
    assert_eq!(matches[3]["similarity"], 0.0);
}

#[tokio::test]
async fn test_search_titles_with_limit() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/titles/search")
        .add_query_param("q", "heat")
        .add_query_param("limit", 1)
        .await;
    response.assert_status_ok();
    let matches: Value = response.json();
    assert_eq!(titles(&matches), vec!["Heat (1995)"]);

    let response = server
        .get("/api/v1/titles/search")
        .add_query_param("q", "heat")
        .add_query_param("limit", 0)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_title_changed_recommends() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/title-changed")
        .json(&json!({ "value": "Toy Story" }))
        .await;
    response.assert_status_ok();

    let outcome: Value = response.json();
    assert_eq!(outcome["status"], "recommendations");
    assert_eq!(outcome["seed"]["title"], "Toy Story (1995)");
    assert_eq!(
        titles(&outcome["rows"]),
        vec!["Toy Story (1995)", "Jumanji (1995)", "Toy Story 2 (1999)"]
    );

    let first = &outcome["rows"][0];
    assert!((first["score"].as_f64().unwrap() - 1.5).abs() < 1e-9);
    assert!(first.get("movie_id").is_none());
    assert_eq!(first["genres"][0], "Adventure");
}

#[tokio::test]
async fn test_title_changed_short_value() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/title-changed")
        .json(&json!({ "value": "Toy" }))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "too_short" }));
}

#[tokio::test]
async fn test_recommendations_without_match() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("q", "Casablanca")
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "no_match" }));
}

#[tokio::test]
async fn test_similar_movies() {
    let server = create_test_server();

    let response = server.get("/api/v1/movies/4/similar").await;
    response.assert_status_ok();

    let rows: Value = response.json();
    assert_eq!(titles(&rows), vec!["Toy Story 2 (1999)", "Toy Story (1995)"]);
}

#[tokio::test]
async fn test_similar_movies_unknown_seed() {
    let server = create_test_server();

    let response = server.get("/api/v1/movies/99/similar").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["error"], "movie 99");
}

#[tokio::test]
async fn test_search_titles_without_query() {
    let server = create_test_server();

    let response = server.get("/api/v1/titles/search").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("q"));
}

#[tokio::test]
async fn test_title_changed_malformed_body() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/title-changed")
        .bytes(Bytes::from_static(b"{\"value\": "))
        .content_type("application/json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_similar_movies_non_numeric_id() {
    let server = create_test_server();

    let response = server.get("/api/v1/movies/heat/similar").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_query_id_header() {
    let server = create_test_server();

    let response = server.get("/health").await;
    let generated = response.headers().get("x-query-id").expect("query id header");
    assert!(uuid::Uuid::parse_str(generated.to_str().unwrap()).is_ok());

    let supplied = "0f8c2a4e-3d7b-4c1e-9a5f-6b2d8e1c4a7f";
    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-query-id"),
            HeaderValue::from_static(supplied),
        )
        .await;
    assert_eq!(response.headers().get("x-query-id").unwrap(), supplied);
}
