use crate::config::FetcherConfig;
use crate::error::{FetchError, Result};
use crate::models::*;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

/// Read access to the sports-data API
#[async_trait::async_trait]
pub trait GameDataSource: Send + Sync {
    /// Fetch every poll published for the queried week
    async fn fetch_rankings(&self, query: &WeekQuery) -> Result<Vec<RankingsWeek>>;

    /// Fetch the games scheduled for the queried week
    async fn fetch_games(&self, query: &WeekQuery) -> Result<Vec<Game>>;

    /// Fetch broadcast records for the queried week
    async fn fetch_media(&self, query: &WeekQuery) -> Result<Vec<MediaRecord>>;
}

/// CollegeFootballData client
pub struct CfbdFetcher {
    config: FetcherConfig,
    client: Client,
}

impl CfbdFetcher {
    /// Create a new fetcher instance
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Fetch the ranking table for the configured poll
    pub async fn fetch_ranking_table(&self, query: &WeekQuery) -> Result<RankingTable> {
        let weeks = self.fetch_rankings(query).await?;
        RankingTable::from_poll(&weeks, &self.config.poll)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&'static str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.config.base_url, endpoint);
        debug!("Fetching {} with {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint: endpoint.to_string(),
                status,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| FetchError::Parse {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

#[async_trait::async_trait]
impl GameDataSource for CfbdFetcher {
    async fn fetch_rankings(&self, query: &WeekQuery) -> Result<Vec<RankingsWeek>> {
        let params = WeekQuery {
            classification: None,
            media_type: None,
            ..query.clone()
        };
        let weeks: Vec<RankingsWeek> = self.get_json("/rankings", &params.to_params()).await?;

        info!("Fetched {} ranking weeks for week {}", weeks.len(), query.week);
        Ok(weeks)
    }

    async fn fetch_games(&self, query: &WeekQuery) -> Result<Vec<Game>> {
        let params = WeekQuery {
            media_type: None,
            ..query.clone()
        };
        let games: Vec<Game> = self.get_json("/games", &params.to_params()).await?;

        info!("Fetched {} games for week {}", games.len(), query.week);
        Ok(games)
    }

    async fn fetch_media(&self, query: &WeekQuery) -> Result<Vec<MediaRecord>> {
        let media: Vec<MediaRecord> = self.get_json("/games/media", &query.to_params()).await?;

        info!("Fetched {} media records for week {}", media.len(), query.week);
        Ok(media)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeasonType;
    use mockito::Matcher;

    fn test_fetcher(base_url: String) -> CfbdFetcher {
        let config = FetcherConfig {
            base_url,
            api_key: "test-key".to_string(),
            ..Default::default()
        };
        CfbdFetcher::new(config).unwrap()
    }

    fn test_query() -> WeekQuery {
        WeekQuery::new(2025, 5, SeasonType::Regular)
            .with_classification(Some("fbs".to_string()))
            .with_media_type(Some("tv".to_string()))
    }

    #[tokio::test]
    async fn test_fetch_games_sends_params_and_bearer() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/games")
            .match_header("authorization", "Bearer test-key")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("year".into(), "2025".into()),
                Matcher::UrlEncoded("week".into(), "5".into()),
                Matcher::UrlEncoded("seasonType".into(), "regular".into()),
                Matcher::UrlEncoded("classification".into(), "fbs".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"id": 1, "homeTeam": "Ohio State", "awayTeam": "Texas",
                     "homePoints": 30, "awayPoints": 10, "venue": "Ohio Stadium"}]"#,
            )
            .create_async()
            .await;

        let fetcher = test_fetcher(server.url());
        let games = fetcher.fetch_games(&test_query()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].home_points, Some(30));
    }

    #[tokio::test]
    async fn test_fetch_media_includes_media_type() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/games/media")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("mediaType".into(), "tv".into()),
                Matcher::UrlEncoded("week".into(), "5".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"[{"id": 1, "homeTeam": "Ohio State", "awayTeam": "Texas",
                     "mediaType": "tv", "outlet": "FOX"}]"#,
            )
            .create_async()
            .await;

        let fetcher = test_fetcher(server.url());
        let media = fetcher.fetch_media(&test_query()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(media[0].outlet.as_deref(), Some("FOX"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/games")
            .match_query(Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let fetcher = test_fetcher(server.url());
        let err = fetcher.fetch_games(&test_query()).await.unwrap_err();

        match err {
            FetchError::Status { endpoint, status } => {
                assert_eq!(endpoint, "/games");
                assert_eq!(status.as_u16(), 401);
            }
            other => panic!("expected a status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/games")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("{not json")
            .create_async()
            .await;

        let fetcher = test_fetcher(server.url());
        let err = fetcher.fetch_games(&test_query()).await.unwrap_err();

        assert!(matches!(err, FetchError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_fetch_ranking_table_uses_configured_poll() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/rankings")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("year".into(), "2025".into()),
                Matcher::UrlEncoded("week".into(), "5".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"[{"season": 2025, "seasonType": "regular", "week": 5, "polls": [
                    {"poll": "AP Top 25", "ranks": [{"rank": 3, "school": "Michigan"}]}
                ]}]"#,
            )
            .create_async()
            .await;

        let fetcher = test_fetcher(server.url());
        let table = fetcher.fetch_ranking_table(&test_query()).await.unwrap();

        assert_eq!(table.rank_of(&"Michigan".into()), Some(3));
    }
}
