//! Pure stats calculators over the roster and game history.
//!
//! Every function here takes read-only snapshots and returns freshly built
//! result records; nothing is cached or mutated. Callers recompute on every
//! data change.

mod global;
mod hall_of_fame;
mod leaderboard;
mod profile;
mod table_size;

pub use global::{
    calculate_global_stats, AttendancePoint, GlobalStats, IntensityPoint, MostExplosiveGame,
    ScoreBucket, TightestGame,
};
pub use hall_of_fame::{
    calculate_hall_of_fame, CollectorAward, HallOfFame, KingAward, MetronomeAward,
};
pub use leaderboard::{calculate_leaderboard, LeaderboardEntry};
pub use profile::{calculate_player_profile, PlayerProfile};
pub use table_size::{calculate_win_rate_by_table_size, TableSizeCell, WinRateByTableSize};
