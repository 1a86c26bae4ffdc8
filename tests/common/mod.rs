#![allow(dead_code)]

use std::io::Write;

use reelmatch::{
    data::CsvSource,
    services::{Recommender, ScoringParams, SearchParams},
};
use tempfile::NamedTempFile;

pub const MOVIES_CSV: &str = "movieId,title,genres
1,Toy Story (1995),Adventure|Animation|Children|Comedy|Fantasy
2,Jumanji (1995),Adventure|Children|Fantasy
3,Heat (1995),Action|Crime|Thriller
4,Toy Story 2 (1999),Adventure|Animation|Children|Comedy|Fantasy
";

/// Users 1 and 2 are the Toy Story fans; user 3 likes only the sequel
pub const RATINGS_CSV: &str = "userId,movieId,rating,timestamp
1,1,5.0,964982703
1,4,5.0,964981247
2,1,4.5,964982224
2,2,4.5,964983815
3,4,4.5,964982931
3,3,3.0,964982400
";

fn temp_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write csv");
    file
}

/// Loads the fixture tables through the CSV source
pub fn fixture_recommender() -> Recommender {
    let movies = temp_csv(MOVIES_CSV);
    let ratings = temp_csv(RATINGS_CSV);
    let source = CsvSource::new(movies.path(), ratings.path());
    Recommender::from_source(&source, ScoringParams::default(), SearchParams::default())
        .expect("fixture loads")
}
