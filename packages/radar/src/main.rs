// Main entry point for a single VacancyRadar run

use anyhow::{Context, Result};
use radar_core::fetcher::HttpFetcher;
use radar_core::notifier::TelegramSink;
use radar_core::store::RetentionStore;
use radar_core::{pipeline, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,radar_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting VacancyRadar");

    // Load configuration; missing credentials abort before any fetch
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    let fetcher = HttpFetcher::new()?;
    let sink = TelegramSink::new(
        config.telegram_token.clone(),
        config.telegram_chat_id.clone(),
    );
    let store = RetentionStore::new(&config.corpus_path);

    let report = pipeline::run(&config, &fetcher, &sink, &store).await?;

    // Zero new jobs is a normal, successful outcome
    tracing::info!(
        extracted = report.extracted,
        new = report.new,
        dispatched = report.dispatched,
        "Run complete"
    );

    Ok(())
}
