//! Leaderboard: players ranked by average score per game (lower is better).

use crate::models::{GameData, Player};
use serde::{Deserialize, Serialize};

/// One leaderboard row. Only players with at least one game appear.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player: Player,
    pub games_played: usize,
    pub avg_score_per_game: f64,
    pub total_points: i64,
}

/// Rank players by ascending average score per game.
///
/// Players with no games are left out entirely. The sort is stable, so tied
/// averages keep the relative order of the input roster.
pub fn calculate_leaderboard(players: &[Player], games: &[GameData]) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = players
        .iter()
        .filter_map(|player| {
            let mut games_played = 0usize;
            let mut total_points = 0i64;
            for game in games {
                if let Some(score) = game.score_of(player.id) {
                    games_played += 1;
                    total_points += i64::from(score);
                }
            }
            if games_played == 0 {
                return None;
            }
            Some(LeaderboardEntry {
                player: player.clone(),
                games_played,
                avg_score_per_game: total_points as f64 / games_played as f64,
                total_points,
            })
        })
        .collect();

    entries.sort_by(|a, b| a.avg_score_per_game.total_cmp(&b.avg_score_per_game));
    entries
}
