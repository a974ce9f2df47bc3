//! Global game stats: time series for charts, score histogram, record games.

use crate::models::GameData;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed score bands for the distribution histogram (inclusive bounds).
/// The last band is open-ended.
const SCORE_BANDS: [(i32, i32, &str); 7] = [
    (0, 10, "0-10"),
    (11, 20, "11-20"),
    (21, 30, "21-30"),
    (31, 40, "31-40"),
    (41, 50, "41-50"),
    (51, 65, "51-65"),
    (66, i32::MAX, "66+"),
];

/// One point of the intensity chart: the game's mean participant score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntensityPoint {
    /// "Game N" in date-ascending order.
    pub label: String,
    /// Mean score rounded to 2 decimal places.
    pub avg_score: f64,
    pub date: NaiveDate,
}

/// One point of the attendance chart: how many players sat at the table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttendancePoint {
    pub label: String,
    pub player_count: usize,
    pub date: NaiveDate,
}

/// One histogram bar: how many individual scores fell in the band.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreBucket {
    pub label: String,
    pub count: usize,
}

/// The game with the smallest spread between best and worst score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TightestGame {
    pub game: GameData,
    pub gap: i32,
}

/// The game with the highest combined score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MostExplosiveGame {
    pub game: GameData,
    pub total_score: i64,
}

/// Everything the stats screen charts from the game history alone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub game_intensity: Vec<IntensityPoint>,
    pub game_attendance: Vec<AttendancePoint>,
    pub score_distribution: Vec<ScoreBucket>,
    pub tightest_game: Option<TightestGame>,
    pub most_explosive_game: Option<MostExplosiveGame>,
}

/// Derive the global stats from the full game history.
///
/// Series are ordered by ascending date; the histogram covers every
/// individual participant score; the record games skip games with fewer than
/// two participants and keep the first extremal game found (record order for
/// the records, not date order).
pub fn calculate_global_stats(games: &[GameData]) -> GlobalStats {
    let mut by_date: Vec<&GameData> = games.iter().collect();
    by_date.sort_by_key(|g| g.date);

    let mut game_intensity = Vec::with_capacity(by_date.len());
    let mut game_attendance = Vec::with_capacity(by_date.len());
    for (i, game) in by_date.iter().enumerate() {
        let label = format!("Game {}", i + 1);
        let count = game.participants.len();
        let avg = if count == 0 {
            0.0
        } else {
            let total: i64 = game.participants.iter().map(|p| i64::from(p.score)).sum();
            total as f64 / count as f64
        };
        game_intensity.push(IntensityPoint {
            label: label.clone(),
            avg_score: (avg * 100.0).round() / 100.0,
            date: game.date,
        });
        game_attendance.push(AttendancePoint {
            label,
            player_count: count,
            date: game.date,
        });
    }

    let mut counts = [0usize; SCORE_BANDS.len()];
    for game in games {
        for participant in &game.participants {
            if let Some(i) = SCORE_BANDS
                .iter()
                .position(|(lo, hi, _)| participant.score >= *lo && participant.score <= *hi)
            {
                counts[i] += 1;
            }
        }
    }
    let score_distribution = SCORE_BANDS
        .iter()
        .zip(counts)
        .map(|((_, _, label), count)| ScoreBucket {
            label: (*label).to_string(),
            count,
        })
        .collect();

    let mut tightest_game: Option<TightestGame> = None;
    let mut most_explosive_game: Option<MostExplosiveGame> = None;
    for game in games {
        if game.participants.len() < 2 {
            continue;
        }
        let scores = game.participants.iter().map(|p| p.score);
        let min = scores.clone().min().unwrap_or(0);
        let max = scores.max().unwrap_or(0);
        let gap = max - min;
        let total: i64 = game.participants.iter().map(|p| i64::from(p.score)).sum();

        if tightest_game.as_ref().map_or(true, |t| gap < t.gap) {
            tightest_game = Some(TightestGame {
                game: game.clone(),
                gap,
            });
        }
        if most_explosive_game
            .as_ref()
            .map_or(true, |m| total > m.total_score)
        {
            most_explosive_game = Some(MostExplosiveGame {
                game: game.clone(),
                total_score: total,
            });
        }
    }

    GlobalStats {
        game_intensity,
        game_attendance,
        score_distribution,
        tightest_game,
        most_explosive_game,
    }
}
