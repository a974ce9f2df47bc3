//! Data structures for the score tracker: players, game records, and the store.

mod game;
mod player;
mod tracker;

pub use game::{resolve_games, GameData, GameId, GameParticipant, GameRecord, ScoreEntry};
pub use player::{Player, PlayerId, AVATARS, DEFAULT_AVATAR};
pub use tracker::{Tracker, TrackerError};
