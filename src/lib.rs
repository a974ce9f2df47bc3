//! "6 qui prend!" score tracker: library with models and stats calculators.

pub mod models;
pub mod stats;

pub use models::{
    resolve_games, GameData, GameId, GameParticipant, GameRecord, Player, PlayerId, ScoreEntry,
    Tracker, TrackerError, AVATARS, DEFAULT_AVATAR,
};
pub use stats::{
    calculate_global_stats, calculate_hall_of_fame, calculate_leaderboard,
    calculate_player_profile, calculate_win_rate_by_table_size, GlobalStats, HallOfFame,
    LeaderboardEntry, PlayerProfile, WinRateByTableSize,
};
