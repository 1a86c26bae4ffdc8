use std::sync::Arc;

use reelmatch::{
    api::{create_router, AppState},
    config::{Config, Mode},
    data::CsvSource,
    interactive,
    services::Recommender,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so terminal tables on stdout stay readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("reelmatch=info,tower_http=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;

    let source = CsvSource::new(&config.movies_path, &config.ratings_path);
    let recommender = Arc::new(Recommender::from_source(
        &source,
        config.scoring_params(),
        config.search_params(),
    )?);

    match config.mode {
        Mode::Terminal => interactive::run(recommender, config.initial_query.clone()).await?,
        Mode::Http => {
            let app = create_router(AppState::new(recommender));
            let address = config.bind_address();
            let listener = tokio::net::TcpListener::bind(&address).await?;
            tracing::info!(%address, "Server running");
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
