use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default CollegeFootballData API root
pub const DEFAULT_BASE_URL: &str = "https://api.collegefootballdata.com";

/// Configuration for the CFBD fetcher
#[derive(Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// API root, without a trailing slash
    pub base_url: String,

    /// Bearer credential forwarded on every request
    pub api_key: String,

    /// HTTP client timeout in seconds
    pub timeout_secs: u64,

    /// Season type used for every query
    pub season_type: SeasonType,

    /// Division filter for games and media (e.g. "fbs")
    pub classification: Option<String>,

    /// Media type filter for the broadcast lookup (e.g. "tv")
    pub media_type: Option<String>,

    /// Name of the poll the ranked report is built from
    pub poll: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            timeout_secs: 30,
            season_type: SeasonType::Regular,
            classification: Some("fbs".to_string()),
            media_type: Some("tv".to_string()),
            poll: "AP Top 25".to_string(),
        }
    }
}

// The api key stays out of logs.
impl fmt::Debug for FetcherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetcherConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("season_type", &self.season_type)
            .field("classification", &self.classification)
            .field("media_type", &self.media_type)
            .field("poll", &self.poll)
            .finish()
    }
}

impl FetcherConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.api_key = lookup("CFBD_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("CFBD_API_KEY not found in environment"))?;

        if let Some(base_url) = lookup("CFBD_BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Some(season_type) = lookup("STATS_BOT_SEASON_TYPE") {
            config.season_type = season_type.parse()?;
        }

        if let Some(classification) = lookup("STATS_BOT_CLASSIFICATION") {
            config.classification = non_empty(classification);
        }

        if let Some(media_type) = lookup("STATS_BOT_MEDIA_TYPE") {
            config.media_type = non_empty(media_type);
        }

        if let Some(poll) = lookup("STATS_BOT_POLL") {
            if !poll.trim().is_empty() {
                config.poll = poll.trim().to_string();
            }
        }

        if let Some(timeout) = lookup("CFBD_TIMEOUT_SECS") {
            config.timeout_secs = timeout
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid CFBD_TIMEOUT_SECS: {}", timeout))?;
        }

        Ok(config)
    }
}

/// An empty value switches an optional filter off.
fn non_empty(value: String) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Regular season vs. postseason
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonType {
    Regular,
    Postseason,
}

impl SeasonType {
    /// Value sent as the `seasonType` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonType::Regular => "regular",
            SeasonType::Postseason => "postseason",
        }
    }
}

impl fmt::Display for SeasonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeasonType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regular" => Ok(SeasonType::Regular),
            "postseason" => Ok(SeasonType::Postseason),
            other => Err(anyhow::anyhow!("Unknown season type: {}", other)),
        }
    }
}
