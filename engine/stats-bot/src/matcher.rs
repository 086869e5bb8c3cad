//! Joins games with poll rankings and broadcast records
//!
//! An absent input (`None`) means the upstream fetch failed; it yields no games
//! rather than an error.

use cfbd_fetcher::{Game, MediaRecord, RankingTable, TrackedTeamSet};

/// A game with both participants' poll ranks resolved
#[derive(Debug, Clone, PartialEq)]
pub struct RankedGame {
    pub game: Game,
    pub home_rank: Option<u32>,
    pub away_rank: Option<u32>,
}

impl RankedGame {
    /// The better (numerically smaller) of the two ranks
    pub fn best_rank(&self) -> Option<u32> {
        match (self.home_rank, self.away_rank) {
            (Some(home), Some(away)) => Some(home.min(away)),
            (home, away) => home.or(away),
        }
    }
}

/// Keep games with at least one ranked participant, best-ranked matchups first
///
/// Unranked participants sort as if ranked last; ties keep fetch order.
pub fn ranked_games(rankings: Option<&RankingTable>, games: Option<&[Game]>) -> Vec<RankedGame> {
    let (Some(rankings), Some(games)) = (rankings, games) else {
        return Vec::new();
    };

    let mut ranked: Vec<RankedGame> = games
        .iter()
        .filter_map(|game| {
            let home_rank = rankings.rank_of(&game.home_team);
            let away_rank = rankings.rank_of(&game.away_team);
            if home_rank.is_none() && away_rank.is_none() {
                return None;
            }
            Some(RankedGame {
                game: game.clone(),
                home_rank,
                away_rank,
            })
        })
        .collect();

    // sort_by_key is stable
    ranked.sort_by_key(|game| game.best_rank().unwrap_or(u32::MAX));
    ranked
}

/// Keep games involving a tracked team and attach their broadcast outlet
///
/// A media record with the game's id wins; otherwise the first record with the same
/// home/away pair is used. Games without a match keep no outlet.
pub fn broadcast_games(
    games: Option<&[Game]>,
    media: Option<&[MediaRecord]>,
    tracked: &TrackedTeamSet,
) -> Vec<Game> {
    let (Some(games), Some(media)) = (games, media) else {
        return Vec::new();
    };

    games
        .iter()
        .filter(|game| tracked.tracks(game))
        .map(|game| {
            let record = media.iter().find(|record| record.id == game.id).or_else(|| {
                media.iter().find(|record| {
                    record.home_team == game.home_team && record.away_team == game.away_team
                })
            });

            let mut game = game.clone();
            game.outlet = record.and_then(|record| record.outlet.clone());
            game
        })
        .collect()
}
