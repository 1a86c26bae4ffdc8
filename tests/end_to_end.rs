mod common;

use reelmatch::models::{MovieId, QueryOutcome, TitleChanged};

use common::fixture_recommender;

#[test]
fn test_toy_story_query_ranked_output() {
    let recommender = fixture_recommender();

    let outcome = recommender.on_title_changed(&TitleChanged::new("Toy Story"));
    let (seed, rows) = match outcome {
        QueryOutcome::Recommendations { seed, rows } => (seed, rows),
        other => panic!("expected recommendations, got {:?}", other),
    };

    assert_eq!(seed.movie_id, MovieId(1));
    let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Toy Story (1995)", "Jumanji (1995)", "Toy Story 2 (1999)"]
    );

    let scores: Vec<f64> = rows.iter().map(|r| r.score).collect();
    assert!((scores[0] - 1.5).abs() < 1e-9);
    assert!((scores[1] - 1.5).abs() < 1e-9);
    assert!((scores[2] - 0.75).abs() < 1e-9);
    assert_eq!(rows[1].genres.to_string(), "Adventure|Children|Fantasy");
}

#[test]
fn test_sequel_query_ranked_output() {
    let recommender = fixture_recommender();

    let rows = recommender.similar_to(MovieId(4)).unwrap();
    let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Toy Story 2 (1999)", "Toy Story (1995)"]);
    assert!((rows[0].score - 1.5).abs() < 1e-9);
    assert!((rows[1].score - 0.75).abs() < 1e-9);
}

#[test]
fn test_movie_without_fans_renders_nothing() {
    let recommender = fixture_recommender();

    // Heat's only rating is a 3.0
    let outcome = recommender.on_title_changed(&TitleChanged::new("Heat (1995)"));
    assert!(matches!(outcome, QueryOutcome::Recommendations { .. }));
    assert!(outcome.rows().is_empty());
}

#[test]
fn test_search_orders_by_similarity() {
    let recommender = fixture_recommender();

    let matches = recommender.search("toy story", None);
    let titles: Vec<&str> = matches.iter().map(|m| m.movie.title.as_str()).collect();
    assert_eq!(titles[..2], ["Toy Story (1995)", "Toy Story 2 (1999)"]);
    assert!(matches
        .windows(2)
        .all(|pair| pair[0].similarity >= pair[1].similarity));
}
