//! Fetch → match → format → notify orchestration

use crate::config::ReportConfig;
use crate::error::{BotError, BotResult};
use crate::formatter::{combine_reports, format_ranked_report, format_upcoming_report};
use crate::matcher::{broadcast_games, ranked_games};
use crate::notifier::Notifier;
use cfbd_fetcher::week::{current_week, next_week};
use cfbd_fetcher::{FetcherConfig, GameDataSource, RankingTable, WeekQuery};
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// A rendered message and what went into it
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub message: String,
    pub summary: RunSummary,
}

/// Outcome of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub year: i32,
    pub current_week: u32,
    pub upcoming_week: u32,
    /// Games in the ranked report, `None` when the report is disabled
    pub ranked_games: Option<usize>,
    /// Games in the upcoming report, `None` when the report is disabled
    pub upcoming_games: Option<usize>,
}

/// Builds the weekly message and posts it
pub struct ReportPipeline {
    source: Arc<dyn GameDataSource>,
    notifier: Arc<dyn Notifier>,
    fetcher: FetcherConfig,
    reports: ReportConfig,
    // Held for a whole run so overlapping triggers post one after the other.
    run_lock: Mutex<()>,
}

impl ReportPipeline {
    pub fn new(
        source: Arc<dyn GameDataSource>,
        notifier: Arc<dyn Notifier>,
        fetcher: FetcherConfig,
        reports: ReportConfig,
    ) -> Self {
        Self {
            source,
            notifier,
            fetcher,
            reports,
            run_lock: Mutex::new(()),
        }
    }

    /// Build and post the message for the current moment
    pub async fn run(&self) -> BotResult<RunSummary> {
        self.run_at(Utc::now()).await
    }

    /// Build and post the message as of `now`
    pub async fn run_at(&self, now: DateTime<Utc>) -> BotResult<RunSummary> {
        let _guard = self.run_lock.lock().await;

        let report = self.build_report_at(now).await;
        if report.message.is_empty() {
            return Err(BotError::EmptyReport);
        }
        self.notifier.send(&report.message).await?;

        info!("Report run complete: {:?}", report.summary);
        Ok(report.summary)
    }

    /// Build the message as of `now` without posting it
    pub async fn build_report_at(&self, now: DateTime<Utc>) -> Report {
        let local = now.with_timezone(&self.reports.timezone);
        let year = local.year();
        let current = current_week(&local);
        let upcoming = next_week(&local);

        let ranked = async {
            if self.reports.ranked {
                Some(self.ranked_report(year, current).await)
            } else {
                None
            }
        };
        let upcoming_report = async {
            if self.reports.upcoming {
                Some(self.upcoming_report(year, upcoming).await)
            } else {
                None
            }
        };
        let (ranked, upcoming_report) = tokio::join!(ranked, upcoming_report);

        let summary = RunSummary {
            year,
            current_week: current,
            upcoming_week: upcoming,
            ranked_games: ranked.as_ref().map(|(_, count)| *count),
            upcoming_games: upcoming_report.as_ref().map(|(_, count)| *count),
        };
        let message = combine_reports(
            ranked.map(|(text, _)| text),
            upcoming_report.map(|(text, _)| text),
        );

        Report { message, summary }
    }

    fn query(&self, year: i32, week: u32) -> WeekQuery {
        WeekQuery::new(year, week, self.fetcher.season_type)
            .with_classification(self.fetcher.classification.clone())
            .with_media_type(self.fetcher.media_type.clone())
    }

    async fn ranked_report(&self, year: i32, week: u32) -> (String, usize) {
        let query = self.query(year, week);

        let rankings = self
            .source
            .fetch_rankings(&query)
            .await
            .and_then(|weeks| RankingTable::from_poll(&weeks, &self.fetcher.poll));
        let rankings = absorb("rankings", week, rankings);
        let games = absorb("games", week, self.source.fetch_games(&query).await);

        let ranked = ranked_games(rankings.as_ref(), games.as_deref());
        (format_ranked_report(week, &ranked), ranked.len())
    }

    async fn upcoming_report(&self, year: i32, week: u32) -> (String, usize) {
        let query = self.query(year, week);

        let (games, media) =
            tokio::join!(self.source.fetch_games(&query), self.source.fetch_media(&query));
        let games = absorb("games", week, games);
        let media = absorb("media", week, media);

        let tracked = &self.reports.tracked_teams;
        let enriched = broadcast_games(games.as_deref(), media.as_deref(), tracked);
        let text = format_upcoming_report(week, tracked, &enriched, self.reports.timezone);
        (text, enriched.len())
    }
}

/// Log a failed fetch and turn it into an absent result
fn absorb<T>(what: &str, week: u32, result: cfbd_fetcher::Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            error!("Error fetching {} for week {}: {}", what, week, e);
            None
        }
    }
}
