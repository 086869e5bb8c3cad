use anyhow::{Context, Result};
use cfbd_fetcher::CfbdFetcher;
use stats_bot::{
    initialize_logging, rest_api, BotConfig, ReportPipeline, ReportScheduler, SlackNotifier,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv_result = dotenv::dotenv();

    initialize_logging()?;

    // A missing .env file is normal in production
    if let Err(e) = dotenv_result {
        debug!("No .env file loaded: {}", e);
    }

    info!("Starting NCAA Stats Bot v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = BotConfig::from_env().context("Failed to load configuration")?;
    info!("Loaded configuration: {:?}", config);

    // Build the clients once and share them
    let source =
        CfbdFetcher::new(config.fetcher.clone()).context("Failed to create CFBD client")?;
    let notifier =
        SlackNotifier::new(config.slack.clone()).context("Failed to create Slack client")?;
    let pipeline = Arc::new(ReportPipeline::new(
        Arc::new(source),
        Arc::new(notifier),
        config.fetcher.clone(),
        config.reports.clone(),
    ));

    // Start the weekly trigger
    let scheduler = ReportScheduler::new(config.schedule.clone(), pipeline.clone());
    let scheduler_handle = tokio::spawn(async move {
        scheduler.start().await;
    });

    // Serve the HTTP surface until Ctrl+C
    let addr = config.server.addr()?;
    let routes = rest_api::create_routes(pipeline);
    let (bound, server) = warp::serve(routes)
        .try_bind_with_graceful_shutdown(addr, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl+C signal: {}", e);
                std::future::pending::<()>().await;
            }
            info!("Shutdown signal received");
        })
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(
        "NCAA Stats Bot is running on {}. Reports will be posted on schedule {}.",
        bound, config.schedule
    );
    server.await;

    scheduler_handle.abort();
    info!("NCAA Stats Bot shutdown complete");
    Ok(())
}
