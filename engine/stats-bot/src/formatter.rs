//! Chat message rendering
//!
//! Every function here is a pure function of its arguments.

use crate::matcher::RankedGame;
use cfbd_fetcher::{Game, TeamName, TrackedTeamSet};
use chrono_tz::Tz;

/// Sent when the ranked report has no games
pub const NO_GAMES_MESSAGE: &str = "No games data available for this week.";

/// Decorative markers shown before tracked team names
const TEAM_MARKERS: &[(&str, &str)] = &[
    ("Ohio State", "🌰"),
    ("Michigan", "〽️"),
    ("Texas", "🤘"),
    ("Alabama", "🐘"),
    ("Georgia", "🐶"),
    ("LSU", "🐯"),
    ("Oregon", "🦆"),
    ("Notre Dame", "☘️"),
];

const KICKOFF_FORMAT: &str = "%A, %B %-d, %Y at %-I:%M %p %Z";

/// Marker for `team`, if it has one
pub fn team_marker(team: &TeamName) -> Option<&'static str> {
    TEAM_MARKERS.iter().find(|(name, _)| *name == team.as_str()).map(|(_, marker)| *marker)
}

fn rank_prefix(rank: Option<u32>) -> String {
    rank.map(|rank| format!("#{} ", rank)).unwrap_or_default()
}

fn points(points: Option<u32>) -> String {
    points.map(|p| p.to_string()).unwrap_or_else(|| "TBD".to_string())
}

/// One line per game: `[#rank ]Away - pts @ [#rank ]Home - pts`
pub fn format_ranked_line(ranked: &RankedGame) -> String {
    let game = &ranked.game;
    format!(
        "{}{} - {} @ {}{} - {}",
        rank_prefix(ranked.away_rank),
        game.away_team,
        points(game.away_points),
        rank_prefix(ranked.home_rank),
        game.home_team,
        points(game.home_points)
    )
}

/// Ranked-games report for `week`
pub fn format_ranked_report(week: u32, games: &[RankedGame]) -> String {
    if games.is_empty() {
        return NO_GAMES_MESSAGE.to_string();
    }

    let lines: Vec<String> = games.iter().map(format_ranked_line).collect();
    format!("NCAA Football Top 25 Results for Week {}:\n\n{}", week, lines.join("\n"))
}

/// Sent when no tracked team plays in the upcoming week
pub fn no_upcoming_games_message(tracked: &TrackedTeamSet) -> String {
    let teams: Vec<&str> = tracked.iter().map(TeamName::as_str).collect();
    format!("No upcoming games found for {}.", teams.join(", "))
}

fn decorated_teams(tracked: &TrackedTeamSet) -> String {
    tracked
        .iter()
        .map(|team| match team_marker(team) {
            Some(marker) => format!("{} {}", marker, team),
            None => team.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Kickoff time in the display timezone
pub fn format_kickoff(game: &Game, timezone: Tz) -> String {
    match game.start_date {
        Some(start) => start.with_timezone(&timezone).format(KICKOFF_FORMAT).to_string(),
        None => "TBD".to_string(),
    }
}

fn format_upcoming_game(game: &Game, timezone: Tz) -> String {
    format!(
        "{} @ {}\nVenue: {}\nKickoff: {}\nBroadcast: {}",
        game.away_team,
        game.home_team,
        game.venue.as_deref().unwrap_or("TBD"),
        format_kickoff(game, timezone),
        game.outlet.as_deref().unwrap_or("None")
    )
}

/// Upcoming-games report for the tracked teams in `week`
pub fn format_upcoming_report(
    week: u32,
    tracked: &TrackedTeamSet,
    games: &[Game],
    timezone: Tz,
) -> String {
    if games.is_empty() {
        return no_upcoming_games_message(tracked);
    }

    let blocks: Vec<String> = games
        .iter()
        .map(|game| format_upcoming_game(game, timezone))
        .collect();
    format!(
        "Upcoming games for {} in Week {}:\n\n{}",
        decorated_teams(tracked),
        week,
        blocks.join("\n\n")
    )
}

/// Join the reports that were produced, separated by a blank line
pub fn combine_reports(ranked: Option<String>, upcoming: Option<String>) -> String {
    [ranked, upcoming].into_iter().flatten().collect::<Vec<_>>().join("\n\n")
}
