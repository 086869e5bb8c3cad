use cfbd_fetcher::week::{current_week, next_week};
use cfbd_fetcher::{CfbdFetcher, FetcherConfig, GameDataSource, WeekQuery};
use chrono::{Datelike, Utc};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    info!("Testing CFBD Fetcher");

    let config = FetcherConfig::from_env()?;
    info!("Loaded configuration: {:?}", config);

    let fetcher = CfbdFetcher::new(config.clone())?;

    let now = Utc::now();
    let week = current_week(&now);
    let query = WeekQuery::new(now.year(), week, config.season_type)
        .with_classification(config.classification.clone())
        .with_media_type(config.media_type.clone());

    info!("Testing rankings fetch for week {}...", week);
    match fetcher.fetch_ranking_table(&query).await {
        Ok(table) => info!("✅ {} teams ranked in {}", table.len(), config.poll),
        Err(e) => error!("❌ Failed to fetch rankings: {}", e),
    }

    info!("Testing games fetch for week {}...", week);
    match fetcher.fetch_games(&query).await {
        Ok(games) => {
            info!("✅ Successfully fetched {} games", games.len());
            for (i, game) in games.iter().take(3).enumerate() {
                info!("  {}. {} @ {}", i + 1, game.away_team, game.home_team);
            }
        }
        Err(e) => error!("❌ Failed to fetch games: {}", e),
    }

    let upcoming = WeekQuery {
        week: next_week(&now),
        ..query
    };
    info!("Testing media fetch for week {}...", upcoming.week);
    match fetcher.fetch_media(&upcoming).await {
        Ok(media) => {
            info!("✅ Successfully fetched {} media records", media.len());
            for (i, record) in media.iter().take(3).enumerate() {
                info!(
                    "  {}. {} @ {} on {}",
                    i + 1,
                    record.away_team,
                    record.home_team,
                    record.outlet.as_deref().unwrap_or("None")
                );
            }
        }
        Err(e) => error!("❌ Failed to fetch media: {}", e),
    }

    info!("Test completed!");
    Ok(())
}
