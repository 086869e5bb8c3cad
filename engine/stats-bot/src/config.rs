//! Bot configuration management
//!
//! Everything is read once at startup and passed down explicitly.

use anyhow::{Context, Result};
use cfbd_fetcher::{FetcherConfig, TrackedTeamSet};
use chrono_tz::Tz;
use std::fmt;
use std::net::SocketAddr;

use crate::scheduler::ReportSchedule;

/// Default Slack Web API root
pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api";

/// Default listen port
pub const DEFAULT_PORT: u16 = 3000;

/// Default HTTP client timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default cron expression: Sundays at 09:00
pub const DEFAULT_SCHEDULE: &str = "0 9 * * 0";

/// Main bot configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Sports-data API configuration
    pub fetcher: FetcherConfig,

    /// Messaging API configuration
    pub slack: SlackConfig,

    /// HTTP server configuration
    pub server: ServerConfig,

    /// Weekly trigger
    pub schedule: ReportSchedule,

    /// Report contents
    pub reports: ReportConfig,
}

/// Messaging API configuration
#[derive(Clone)]
pub struct SlackConfig {
    /// API root, without a trailing slash
    pub api_url: String,

    /// Bot credential
    pub bot_token: String,

    /// Destination channel
    pub channel_id: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl fmt::Debug for SlackConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlackConfig")
            .field("api_url", &self.api_url)
            .field("bot_token", &"<redacted>")
            .field("channel_id", &self.channel_id)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Report configuration
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Post the ranked-games report
    pub ranked: bool,

    /// Post the upcoming-games report
    pub upcoming: bool,

    /// Teams followed by the upcoming-games report
    pub tracked_teams: TrackedTeamSet,

    /// Timezone used for kickoff times and the schedule
    pub timezone: Tz,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            ranked: true,
            upcoming: true,
            tracked_teams: TrackedTeamSet::default(),
            timezone: chrono_tz::America::New_York,
        }
    }
}

impl ServerConfig {
    /// Get the server address
    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}

impl BotConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fetcher = FetcherConfig::from_lookup(&lookup)?;

        let mut slack = SlackConfig {
            api_url: lookup("SLACK_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_SLACK_API_URL.to_string()),
            bot_token: required(&lookup, "SLACK_BOT_TOKEN")?,
            channel_id: required(&lookup, "SLACK_CHANNEL_ID")?,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        };
        if let Some(timeout) = lookup("SLACK_TIMEOUT_SECS") {
            slack.timeout_secs = timeout
                .trim()
                .parse()
                .with_context(|| format!("Invalid SLACK_TIMEOUT_SECS: {}", timeout))?;
        }

        let mut server = ServerConfig::default();
        if let Some(port) = lookup("PORT") {
            server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT: {}", port))?;
        }

        let mut reports = ReportConfig::default();
        if let Some(tz) = lookup("STATS_BOT_TIMEZONE") {
            reports.timezone = tz
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid STATS_BOT_TIMEZONE {}: {}", tz, e))?;
        }
        if let Some(teams) = lookup("STATS_BOT_TRACKED_TEAMS") {
            reports.tracked_teams = TrackedTeamSet::parse_list(&teams);
        }
        if let Some(flag) = lookup("STATS_BOT_RANKED_REPORT") {
            reports.ranked = parse_flag("STATS_BOT_RANKED_REPORT", &flag)?;
        }
        if let Some(flag) = lookup("STATS_BOT_UPCOMING_REPORT") {
            reports.upcoming = parse_flag("STATS_BOT_UPCOMING_REPORT", &flag)?;
        }

        let cron = lookup("STATS_BOT_SCHEDULE").unwrap_or_else(|| DEFAULT_SCHEDULE.to_string());
        let schedule = ReportSchedule::from_cron(&cron, reports.timezone)
            .with_context(|| format!("Invalid STATS_BOT_SCHEDULE: {}", cron))?;

        let config = Self {
            fetcher,
            slack,
            server,
            schedule,
            reports,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.reports.ranked && !self.reports.upcoming {
            anyhow::bail!("At least one report must be enabled");
        }
        if self.reports.upcoming && self.reports.tracked_teams.is_empty() {
            anyhow::bail!("The upcoming-games report needs at least one tracked team");
        }
        Ok(())
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| anyhow::anyhow!("{} not found in environment", key))
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("Invalid {}: {}", key, value),
    }
}
