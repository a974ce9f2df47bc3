//! Win rate broken down by table size (number of participants per game).

use crate::models::{GameData, Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// One matrix cell: a player's record at one table size.
/// Win rate is presentation's job (`wins / games * 100`; zero games renders
/// as "no data", not 0%).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TableSizeCell {
    pub wins: usize,
    pub games: usize,
}

/// Win-rate matrix: `stats[player_id][table_size]` for every size a player
/// has actually played at, plus the sorted set of sizes seen at all.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct WinRateByTableSize {
    pub stats: HashMap<PlayerId, HashMap<usize, TableSizeCell>>,
    pub table_sizes: Vec<usize>,
}

/// Single pass over the history: for each game with at least two
/// participants, bump every participant's games counter for that table size,
/// and the winner's wins counter.
pub fn calculate_win_rate_by_table_size(
    players: &[Player],
    games: &[GameData],
) -> WinRateByTableSize {
    let mut stats: HashMap<PlayerId, HashMap<usize, TableSizeCell>> = players
        .iter()
        .map(|player| (player.id, HashMap::new()))
        .collect();
    let mut sizes = BTreeSet::new();

    for game in games {
        let size = game.participants.len();
        if size < 2 {
            continue;
        }
        sizes.insert(size);
        for participant in &game.participants {
            let cell = stats
                .entry(participant.player.id)
                .or_default()
                .entry(size)
                .or_default();
            cell.games += 1;
            if game.winner_id == Some(participant.player.id) {
                cell.wins += 1;
            }
        }
    }

    WinRateByTableSize {
        stats,
        table_sizes: sizes.into_iter().collect(),
    }
}
