//! Hall of fame: superlative awards scanned from the full history.

use crate::models::{GameData, Player};
use crate::stats::leaderboard::calculate_leaderboard;
use serde::{Deserialize, Serialize};

/// Most wins.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KingAward {
    pub player: Player,
    pub wins: usize,
}

/// Most cumulative points. In this game that is the *worst* performance; the
/// trophy is ironic ("ox collector").
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollectorAward {
    pub player: Player,
    pub points: i64,
}

/// Best (lowest) average score per game, i.e. leaderboard rank 1.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetronomeAward {
    pub player: Player,
    pub avg_score: f64,
}

/// The three trophies; each `None` when there are no players or no games.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HallOfFame {
    pub king: Option<KingAward>,
    pub collector: Option<CollectorAward>,
    pub metronome: Option<MetronomeAward>,
}

/// Single pass over the roster tracking running maxima for wins and total
/// points; strict comparisons keep the first player encountered on ties.
/// The metronome is taken from the leaderboard's first row.
pub fn calculate_hall_of_fame(players: &[Player], games: &[GameData]) -> HallOfFame {
    if players.is_empty() || games.is_empty() {
        return HallOfFame {
            king: None,
            collector: None,
            metronome: None,
        };
    }

    let metronome = calculate_leaderboard(players, games)
        .into_iter()
        .next()
        .map(|entry| MetronomeAward {
            player: entry.player,
            avg_score: entry.avg_score_per_game,
        });

    let mut king: Option<KingAward> = None;
    let mut collector: Option<CollectorAward> = None;
    for player in players {
        let mut wins = 0usize;
        let mut total_points = 0i64;
        for game in games {
            if let Some(score) = game.score_of(player.id) {
                total_points += i64::from(score);
                if game.winner_id == Some(player.id) {
                    wins += 1;
                }
            }
        }
        if king.as_ref().map_or(true, |k| wins > k.wins) {
            king = Some(KingAward {
                player: player.clone(),
                wins,
            });
        }
        if collector.as_ref().map_or(true, |c| total_points > c.points) {
            collector = Some(CollectorAward {
                player: player.clone(),
                points: total_points,
            });
        }
    }

    HallOfFame {
        king,
        collector,
        metronome,
    }
}
