use serde::Deserialize;

use crate::services::{ScoringParams, SearchParams};

/// How the process talks to the user
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Read titles from stdin, print tables to stdout
    Terminal,
    /// Serve the JSON API for a browser text box
    Http,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Movie table CSV
    #[serde(default = "default_movies_path")]
    pub movies_path: String,

    /// Ratings table CSV
    #[serde(default = "default_ratings_path")]
    pub ratings_path: String,

    #[serde(default = "default_mode")]
    pub mode: Mode,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_like_threshold")]
    pub like_threshold: f64,

    #[serde(default = "default_min_support")]
    pub min_support: f64,

    #[serde(default = "default_top_n")]
    pub top_n: usize,

    #[serde(default = "default_search_limit")]
    pub search_limit: usize,

    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,

    /// Title searched once at terminal startup
    #[serde(default = "default_initial_query")]
    pub initial_query: Option<String>,
}

fn default_movies_path() -> String {
    "movies.csv".to_string()
}

fn default_ratings_path() -> String {
    "ratings.csv".to_string()
}

fn default_mode() -> Mode {
    Mode::Terminal
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_like_threshold() -> f64 {
    ScoringParams::default().like_threshold
}

fn default_min_support() -> f64 {
    ScoringParams::default().min_support
}

fn default_top_n() -> usize {
    ScoringParams::default().top_n
}

fn default_search_limit() -> usize {
    SearchParams::default().limit
}

fn default_min_query_chars() -> usize {
    SearchParams::default().min_query_chars
}

fn default_initial_query() -> Option<String> {
    Some("Toy Story".to_string())
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.scoring_params().validate()?;
        if config.search_limit == 0 {
            anyhow::bail!("SEARCH_LIMIT must be at least 1");
        }
        Ok(config)
    }

    pub fn scoring_params(&self) -> ScoringParams {
        ScoringParams {
            like_threshold: self.like_threshold,
            min_support: self.min_support,
            top_n: self.top_n,
        }
    }

    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            limit: self.search_limit,
            min_query_chars: self.min_query_chars,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
