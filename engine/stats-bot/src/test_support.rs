//! In-memory doubles for the pipeline's collaborators

use crate::error::NotifyError;
use crate::notifier::Notifier;
use cfbd_fetcher::{
    FetchError, Game, GameDataSource, MediaRecord, Poll, PollRank, RankingsWeek, Result,
    WeekQuery,
};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Mutex;

/// Saturday 2025-09-06: week 5 of the 2025 season
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 6, 12, 0, 0).unwrap()
}

fn unavailable(endpoint: &str) -> FetchError {
    FetchError::Status {
        endpoint: endpoint.to_string(),
        status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Serves fixed data; a resource left unset fails like an unreachable API
#[derive(Default)]
pub struct StubSource {
    rankings: Option<Vec<RankingsWeek>>,
    games: Option<Vec<Game>>,
    media: Option<Vec<MediaRecord>>,
    queries: Mutex<Vec<(&'static str, WeekQuery)>>,
}

impl StubSource {
    pub fn with_rankings(self, ranks: &[(&str, u32)]) -> Self {
        self.with_poll("AP Top 25", ranks)
    }

    pub fn with_poll(mut self, poll: &str, ranks: &[(&str, u32)]) -> Self {
        let ranks = ranks
            .iter()
            .map(|(school, rank)| PollRank {
                rank: *rank,
                school: (*school).into(),
                conference: None,
                first_place_votes: None,
                points: None,
            })
            .collect();
        self.rankings = Some(vec![RankingsWeek {
            season: 2025,
            season_type: Some("regular".to_string()),
            week: 5,
            polls: vec![Poll {
                poll: poll.to_string(),
                ranks,
            }],
        }]);
        self
    }

    pub fn with_games(mut self, games: Vec<Game>) -> Self {
        self.games = Some(games);
        self
    }

    pub fn with_media(mut self, media: Vec<MediaRecord>) -> Self {
        self.media = Some(media);
        self
    }

    /// Every query received, tagged with the resource name
    pub fn queries(&self) -> Vec<(&'static str, WeekQuery)> {
        self.queries.lock().unwrap().clone()
    }

    fn record(&self, what: &'static str, query: &WeekQuery) {
        self.queries.lock().unwrap().push((what, query.clone()));
    }
}

#[async_trait::async_trait]
impl GameDataSource for StubSource {
    async fn fetch_rankings(&self, query: &WeekQuery) -> Result<Vec<RankingsWeek>> {
        self.record("rankings", query);
        self.rankings.clone().ok_or_else(|| unavailable("/rankings"))
    }

    async fn fetch_games(&self, query: &WeekQuery) -> Result<Vec<Game>> {
        self.record("games", query);
        self.games.clone().ok_or_else(|| unavailable("/games"))
    }

    async fn fetch_media(&self, query: &WeekQuery) -> Result<Vec<MediaRecord>> {
        self.record("media", query);
        self.media.clone().ok_or_else(|| unavailable("/games/media"))
    }
}

/// Keeps every message it is asked to send
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, text: &str) -> std::result::Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::Api("channel_not_found".to_string()));
        }
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
