use crate::config::SeasonType;
use crate::error::{FetchError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Team name used as the join key between games, rankings and media.
///
/// Only surrounding whitespace is normalized away. Matching is exact: there is no
/// aliasing between spellings ("Miami" vs "Miami (FL)") and no fuzzy comparison, so
/// the endpoints are assumed to spell schools the same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TeamName(String);

impl TeamName {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.len() == name.len() {
            Self(name)
        } else {
            Self(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TeamName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&str> for TeamName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<TeamName> for String {
    fn from(name: TeamName) -> Self {
        name.0
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A game from the `/games` resource
///
/// Field names are accepted in both the camelCase and the older snake_case spelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,

    #[serde(rename = "homeTeam", alias = "home_team")]
    pub home_team: TeamName,

    #[serde(rename = "awayTeam", alias = "away_team")]
    pub away_team: TeamName,

    #[serde(rename = "homePoints", alias = "home_points", default)]
    pub home_points: Option<u32>,

    #[serde(rename = "awayPoints", alias = "away_points", default)]
    pub away_points: Option<u32>,

    #[serde(default)]
    pub venue: Option<String>,

    #[serde(rename = "startDate", alias = "start_date", default)]
    pub start_date: Option<DateTime<Utc>>,

    /// Broadcast outlet, attached after the media lookup
    #[serde(skip)]
    pub outlet: Option<String>,
}

impl Game {
    pub fn new(id: i64, home_team: impl Into<TeamName>, away_team: impl Into<TeamName>) -> Self {
        Self {
            id,
            home_team: home_team.into(),
            away_team: away_team.into(),
            home_points: None,
            away_points: None,
            venue: None,
            start_date: None,
            outlet: None,
        }
    }

    pub fn with_score(mut self, home_points: u32, away_points: u32) -> Self {
        self.home_points = Some(home_points);
        self.away_points = Some(away_points);
        self
    }

    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }

    pub fn with_start(mut self, start_date: DateTime<Utc>) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Whether either side of the game is `team`
    pub fn involves(&self, team: &TeamName) -> bool {
        &self.home_team == team || &self.away_team == team
    }
}

/// One week of the `/rankings` resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingsWeek {
    pub season: i32,

    #[serde(rename = "seasonType", alias = "season_type", default)]
    pub season_type: Option<String>,

    pub week: u32,

    #[serde(default)]
    pub polls: Vec<Poll>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poll {
    pub poll: String,

    #[serde(default)]
    pub ranks: Vec<PollRank>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollRank {
    pub rank: u32,

    pub school: TeamName,

    #[serde(default)]
    pub conference: Option<String>,

    #[serde(rename = "firstPlaceVotes", alias = "first_place_votes", default)]
    pub first_place_votes: Option<u32>,

    #[serde(default)]
    pub points: Option<u32>,
}

/// Team -> rank lookup built from a single poll
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingTable {
    ranks: HashMap<TeamName, u32>,
}

impl RankingTable {
    /// Build the table from the first poll named `poll` in the response
    pub fn from_poll(weeks: &[RankingsWeek], poll: &str) -> Result<Self> {
        weeks
            .iter()
            .flat_map(|week| week.polls.iter())
            .find(|candidate| candidate.poll == poll)
            .map(|found| found.ranks.iter().map(|r| (r.school.clone(), r.rank)).collect())
            .ok_or_else(|| FetchError::poll_not_found(poll))
    }

    pub fn rank_of(&self, team: &TeamName) -> Option<u32> {
        self.ranks.get(team).copied()
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

impl FromIterator<(TeamName, u32)> for RankingTable {
    fn from_iter<I: IntoIterator<Item = (TeamName, u32)>>(iter: I) -> Self {
        let mut ranks: HashMap<TeamName, u32> = HashMap::new();
        for (team, rank) in iter {
            ranks.entry(team).and_modify(|r| *r = (*r).min(rank)).or_insert(rank);
        }
        Self { ranks }
    }
}

/// Broadcast information from the `/games/media` resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub id: i64,

    #[serde(rename = "homeTeam", alias = "home_team")]
    pub home_team: TeamName,

    #[serde(rename = "awayTeam", alias = "away_team")]
    pub away_team: TeamName,

    #[serde(rename = "mediaType", alias = "media_type", default)]
    pub media_type: Option<String>,

    #[serde(default)]
    pub outlet: Option<String>,
}

impl MediaRecord {
    pub fn new(
        id: i64,
        home_team: impl Into<TeamName>,
        away_team: impl Into<TeamName>,
        outlet: impl Into<String>,
    ) -> Self {
        Self {
            id,
            home_team: home_team.into(),
            away_team: away_team.into(),
            media_type: None,
            outlet: Some(outlet.into()),
        }
    }
}

/// Parameters shared by the three read resources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekQuery {
    pub year: i32,
    pub week: u32,
    pub season_type: SeasonType,
    pub classification: Option<String>,
    pub media_type: Option<String>,
}

impl WeekQuery {
    pub fn new(year: i32, week: u32, season_type: SeasonType) -> Self {
        Self {
            year,
            week,
            season_type,
            classification: None,
            media_type: None,
        }
    }

    pub fn with_classification(mut self, classification: Option<String>) -> Self {
        self.classification = classification;
        self
    }

    pub fn with_media_type(mut self, media_type: Option<String>) -> Self {
        self.media_type = media_type;
        self
    }

    /// Query string pairs in the API's parameter names
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("year", self.year.to_string()),
            ("week", self.week.to_string()),
            ("seasonType", self.season_type.as_str().to_string()),
        ];
        if let Some(classification) = &self.classification {
            params.push(("classification", classification.clone()));
        }
        if let Some(media_type) = &self.media_type {
            params.push(("mediaType", media_type.clone()));
        }
        params
    }
}

/// Teams the upcoming-games report follows, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedTeamSet {
    teams: Vec<TeamName>,
}

impl TrackedTeamSet {
    pub fn new<I, T>(teams: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TeamName>,
    {
        let mut unique: Vec<TeamName> = Vec::new();
        for team in teams.into_iter().map(Into::into) {
            if !team.as_str().is_empty() && !unique.contains(&team) {
                unique.push(team);
            }
        }
        Self { teams: unique }
    }

    /// Parse a comma-separated team list
    pub fn parse_list(list: &str) -> Self {
        Self::new(list.split(','))
    }

    /// Whether either participant of `game` is tracked
    pub fn tracks(&self, game: &Game) -> bool {
        self.teams.iter().any(|team| game.involves(team))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TeamName> {
        self.teams.iter()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

impl Default for TrackedTeamSet {
    fn default() -> Self {
        Self::new(["Ohio State", "Michigan", "Texas"])
    }
}
