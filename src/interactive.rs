//! Terminal stand-in for the title text box.
//!
//! Every stdin line is treated as the new text box value. Output for the
//! previous value is separated off before the new table is printed, and
//! values too short to search print nothing.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::{
    middleware::QueryId,
    models::{QueryOutcome, RecommendationTable, TitleChanged},
    services::Recommender,
};

const PROMPT: &str = "Movie Title: ";

/// Runs until stdin closes
pub async fn run(
    recommender: Arc<Recommender>,
    initial_query: Option<String>,
) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if let Some(initial) = initial_query.filter(|q| !q.trim().is_empty()) {
        stdout.write_all(format!("{}{}\n", PROMPT, initial).as_bytes()).await?;
        let rendered = respond(&recommender, &TitleChanged::new(initial));
        stdout.write_all(rendered.as_bytes()).await?;
    }

    loop {
        stdout.write_all(PROMPT.as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let rendered = respond(&recommender, &TitleChanged::new(line));
        stdout.write_all(rendered.as_bytes()).await?;
    }

    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}

fn respond(recommender: &Recommender, event: &TitleChanged) -> String {
    let query_id = QueryId::new();
    let span = tracing::debug_span!("title_changed", %query_id);
    let _guard = span.enter();

    let outcome = recommender.on_title_changed(event);
    tracing::debug!(query = %event.value, rows = outcome.rows().len(), "Handled title change");
    render(&outcome)
}

/// Text shown for an outcome; empty when there is nothing to show
pub fn render(outcome: &QueryOutcome) -> String {
    match outcome {
        QueryOutcome::TooShort | QueryOutcome::NoMatch => String::new(),
        QueryOutcome::Recommendations { rows, .. } if rows.is_empty() => String::new(),
        QueryOutcome::Recommendations { seed, rows } => format!(
            "\n-- because you searched for {} --\n{}\n",
            seed.title,
            RecommendationTable(rows)
        ),
    }
}
