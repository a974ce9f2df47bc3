//! Game records as stored, and the resolved shape the stats layer consumes.
//!
//! Stored games reference players by id only; past games must render a
//! player's *current* pseudo/avatar, so the join to full `Player` values
//! happens at read time via [`resolve_games`].

use crate::models::player::{Player, PlayerId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a game.
pub type GameId = Uuid;

/// One stored score line: a player's cumulative score for one game.
/// Lower is better (the game rewards avoiding points).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub player_id: PlayerId,
    pub score: i32,
}

/// A finished game as kept by the store.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: GameId,
    /// Day-level date; no time-of-day semantics.
    pub date: NaiveDate,
    /// Player with the minimum score (first encountered on ties).
    pub winner_id: Option<PlayerId>,
    /// Player with the maximum score (first encountered on ties).
    pub loser_id: Option<PlayerId>,
    /// One entry per distinct participant; scores are immutable once recorded.
    pub scores: Vec<ScoreEntry>,
}

impl GameRecord {
    /// Create a record from per-player scores, deriving winner and loser.
    ///
    /// Winner = first strict minimum, loser = first strict maximum in entry
    /// order; on a tie the earlier entry keeps the title.
    pub fn new(date: NaiveDate, scores: Vec<ScoreEntry>) -> Self {
        let mut winner_id = None;
        let mut loser_id = None;
        let mut min_score = i32::MAX;
        let mut max_score = i32::MIN;
        for entry in &scores {
            if entry.score < min_score {
                min_score = entry.score;
                winner_id = Some(entry.player_id);
            }
            if entry.score > max_score {
                max_score = entry.score;
                loser_id = Some(entry.player_id);
            }
        }
        Self {
            id: Uuid::new_v4(),
            date,
            winner_id,
            loser_id,
            scores,
        }
    }
}

/// A participant in a resolved game: full player plus their score and flags.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameParticipant {
    pub player: Player,
    pub score: i32,
    pub is_winner: bool,
    pub is_loser: bool,
}

/// A game with every participant's player reference already joined.
/// This is the only game shape the stats calculators see.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameData {
    pub id: GameId,
    pub date: NaiveDate,
    pub winner_id: Option<PlayerId>,
    pub loser_id: Option<PlayerId>,
    pub participants: Vec<GameParticipant>,
}

impl GameData {
    /// Whether the given player took part in this game.
    pub fn has_player(&self, id: PlayerId) -> bool {
        self.participants.iter().any(|p| p.player.id == id)
    }

    /// Score of the given player in this game, if they participated.
    pub fn score_of(&self, id: PlayerId) -> Option<i32> {
        self.participants
            .iter()
            .find(|p| p.player.id == id)
            .map(|p| p.score)
    }
}

/// Join stored game records against the current roster.
///
/// Embeds each participant's current `Player` value (history shows current
/// pseudos/avatars) and derives `is_winner`/`is_loser` from the record's
/// `winner_id`/`loser_id`. Score entries whose player id is not in `players`
/// are skipped; the store never produces such entries because player deletion
/// is blocked while referenced.
pub fn resolve_games(players: &[Player], records: &[GameRecord]) -> Vec<GameData> {
    records
        .iter()
        .map(|record| {
            let participants = record
                .scores
                .iter()
                .filter_map(|entry| {
                    let player = players.iter().find(|p| p.id == entry.player_id)?;
                    Some(GameParticipant {
                        player: player.clone(),
                        score: entry.score,
                        is_winner: record.winner_id == Some(entry.player_id),
                        is_loser: record.loser_id == Some(entry.player_id),
                    })
                })
                .collect();
            GameData {
                id: record.id,
                date: record.date,
                winner_id: record.winner_id,
                loser_id: record.loser_id,
                participants,
            }
        })
        .collect()
}
