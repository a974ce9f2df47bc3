//! Per-player profile: aggregate stats plus nemesis / lucky charm mining.

use crate::models::{GameData, Player, PlayerId};
use serde::{Deserialize, Serialize};

/// Aggregate view of one player's history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub player: Player,
    pub games_played: usize,
    pub wins: usize,
    /// `wins / games_played * 100`, 0 with no games.
    pub win_rate: f64,
    pub avg_score_per_game: f64,
    pub total_points: i64,
    /// Minimum score achieved; `None` with no games.
    pub best_score: Option<i32>,
    /// Maximum score achieved; `None` with no games.
    pub worst_score: Option<i32>,
    /// Opponent with the highest loss rate against, over > 2 shared games.
    pub nemesis: Option<Player>,
    /// Co-participant most present in this player's wins (excluding each
    /// game's loser), over > 2 qualifying games.
    pub lucky_charm: Option<Player>,
}

#[derive(Default)]
struct OpponentTally {
    games: usize,
    losses: usize,
}

#[derive(Default)]
struct AllyTally {
    games: usize,
    wins: usize,
}

/// Compute the profile for `player_id`.
///
/// `None` when the id is not in the roster. A known player with no games gets
/// a fully zeroed profile rather than `None`.
///
/// Nemesis and lucky charm deliberately use different bases: the nemesis loss
/// rate is taken over every shared game, while the lucky charm win rate only
/// counts games the target player won, with that game's loser excluded from
/// the allies. Both require strictly more than 2 qualifying games, and ties
/// keep the first candidate in roster order.
pub fn calculate_player_profile(
    player_id: PlayerId,
    players: &[Player],
    games: &[GameData],
) -> Option<PlayerProfile> {
    let player = players.iter().find(|p| p.id == player_id)?.clone();

    let player_games: Vec<&GameData> = games.iter().filter(|g| g.has_player(player_id)).collect();
    if player_games.is_empty() {
        return Some(PlayerProfile {
            player,
            games_played: 0,
            wins: 0,
            win_rate: 0.0,
            avg_score_per_game: 0.0,
            total_points: 0,
            best_score: None,
            worst_score: None,
            nemesis: None,
            lucky_charm: None,
        });
    }

    let mut total_points = 0i64;
    let mut wins = 0usize;
    let mut best_score: Option<i32> = None;
    let mut worst_score: Option<i32> = None;

    for game in &player_games {
        // has_player held above, so the score is present.
        let score = game.score_of(player_id).unwrap_or(0);
        total_points += i64::from(score);
        if game.winner_id == Some(player_id) {
            wins += 1;
        }
        if best_score.map_or(true, |best| score < best) {
            best_score = Some(score);
        }
        if worst_score.map_or(true, |worst| score > worst) {
            worst_score = Some(score);
        }
    }

    let games_played = player_games.len();
    let avg_score_per_game = total_points as f64 / games_played as f64;
    let win_rate = wins as f64 / games_played as f64 * 100.0;

    // Tallies per other player, in roster order so tie-breaks follow it.
    let others: Vec<&Player> = players.iter().filter(|p| p.id != player_id).collect();
    let mut opponents: Vec<OpponentTally> = others.iter().map(|_| OpponentTally::default()).collect();
    let mut allies: Vec<AllyTally> = others.iter().map(|_| AllyTally::default()).collect();

    for game in &player_games {
        for (i, other) in others.iter().enumerate() {
            if !game.has_player(other.id) {
                continue;
            }
            opponents[i].games += 1;
            if game.winner_id == Some(other.id) {
                opponents[i].losses += 1;
            }
        }
        if game.winner_id == Some(player_id) {
            for (i, other) in others.iter().enumerate() {
                if !game.has_player(other.id) || game.loser_id == Some(other.id) {
                    continue;
                }
                allies[i].games += 1;
                allies[i].wins += 1;
            }
        }
    }

    let mut nemesis = None;
    let mut max_loss_rate = -1.0f64;
    for (other, tally) in others.iter().zip(&opponents) {
        if tally.games > 2 {
            let loss_rate = tally.losses as f64 / tally.games as f64;
            if loss_rate > max_loss_rate {
                max_loss_rate = loss_rate;
                nemesis = Some((*other).clone());
            }
        }
    }

    let mut lucky_charm = None;
    let mut max_win_rate_with = -1.0f64;
    for (other, tally) in others.iter().zip(&allies) {
        if tally.games > 2 {
            let win_rate_with = tally.wins as f64 / tally.games as f64;
            if win_rate_with > max_win_rate_with {
                max_win_rate_with = win_rate_with;
                lucky_charm = Some((*other).clone());
            }
        }
    }

    Some(PlayerProfile {
        player,
        games_played,
        wins,
        win_rate,
        avg_score_per_game,
        total_points,
        best_score,
        worst_score,
        nemesis,
        lucky_charm,
    })
}
