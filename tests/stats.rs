//! Integration tests for the stats calculators: leaderboard, profiles,
//! hall of fame, global stats, win-rate matrix.

use chrono::NaiveDate;
use take_six_tracker::{
    calculate_global_stats, calculate_hall_of_fame, calculate_leaderboard,
    calculate_player_profile, calculate_win_rate_by_table_size, resolve_games, GameData,
    GameRecord, Player, PlayerId, ScoreEntry, Tracker,
};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).expect("valid date")
}

fn entry(player_id: PlayerId, score: i32) -> ScoreEntry {
    ScoreEntry { player_id, score }
}

/// Roster A, B, C and the three reference games:
/// G1 {A:10, B:20, C:30}, G2 {A:15, B:5, C:25}, G3 {A:20, B:10, C:0}.
fn reference_tracker() -> (Tracker, PlayerId, PlayerId, PlayerId) {
    let mut t = Tracker::new();
    let a = t.add_player("A", Some("bull_1")).unwrap().id;
    let b = t.add_player("B", Some("bull_2")).unwrap().id;
    let c = t.add_player("C", Some("bull_3")).unwrap().id;
    t.record_game(date(1), vec![entry(a, 10), entry(b, 20), entry(c, 30)])
        .unwrap();
    t.record_game(date(2), vec![entry(a, 15), entry(b, 5), entry(c, 25)])
        .unwrap();
    t.record_game(date(3), vec![entry(a, 20), entry(b, 10), entry(c, 0)])
        .unwrap();
    (t, a, b, c)
}

#[test]
fn leaderboard_orders_by_ascending_average() {
    let (t, a, b, c) = reference_tracker();
    let board = calculate_leaderboard(t.players(), &t.games());

    assert_eq!(board.len(), 3);
    assert_eq!(board[0].player.id, b);
    assert_eq!(board[1].player.id, a);
    assert_eq!(board[2].player.id, c);
    assert!((board[0].avg_score_per_game - 35.0 / 3.0).abs() < 1e-9);
    assert!((board[1].avg_score_per_game - 15.0).abs() < 1e-9);
    assert!((board[2].avg_score_per_game - 55.0 / 3.0).abs() < 1e-9);
    for pair in board.windows(2) {
        assert!(pair[0].avg_score_per_game <= pair[1].avg_score_per_game);
    }
}

#[test]
fn leaderboard_excludes_players_without_games() {
    let (mut t, a, b, c) = reference_tracker();
    let idle = t.add_player("Idle", None).unwrap().id;
    let board = calculate_leaderboard(t.players(), &t.games());

    assert!(board.iter().all(|e| e.player.id != idle));
    for id in [a, b, c] {
        assert_eq!(board.iter().filter(|e| e.player.id == id).count(), 1);
    }
}

#[test]
fn leaderboard_is_empty_without_games() {
    let mut t = Tracker::new();
    t.add_player("Solo", None).unwrap();
    assert!(calculate_leaderboard(t.players(), &t.games()).is_empty());
}

#[test]
fn leaderboard_ties_keep_roster_order() {
    let mut t = Tracker::new();
    let a = t.add_player("A", None).unwrap().id;
    let b = t.add_player("B", None).unwrap().id;
    t.record_game(date(1), vec![entry(a, 12), entry(b, 12)])
        .unwrap();
    let board = calculate_leaderboard(t.players(), &t.games());
    assert_eq!(board[0].player.id, a);
    assert_eq!(board[1].player.id, b);
}

#[test]
fn profile_unknown_player_is_none() {
    let (t, _, _, _) = reference_tracker();
    assert!(calculate_player_profile(PlayerId::new_v4(), t.players(), &t.games()).is_none());
}

#[test]
fn profile_zero_state_for_player_without_games() {
    let (mut t, _, _, _) = reference_tracker();
    let idle = t.add_player("Idle", None).unwrap().id;
    let profile = calculate_player_profile(idle, t.players(), &t.games()).unwrap();

    assert_eq!(profile.games_played, 0);
    assert_eq!(profile.wins, 0);
    assert_eq!(profile.win_rate, 0.0);
    assert_eq!(profile.avg_score_per_game, 0.0);
    assert_eq!(profile.total_points, 0);
    assert_eq!(profile.best_score, None);
    assert_eq!(profile.worst_score, None);
    assert!(profile.nemesis.is_none());
    assert!(profile.lucky_charm.is_none());
}

#[test]
fn profile_aggregates_for_reference_player() {
    let (t, a, _, _) = reference_tracker();
    let profile = calculate_player_profile(a, t.players(), &t.games()).unwrap();

    assert_eq!(profile.games_played, 3);
    assert_eq!(profile.wins, 1);
    assert!((profile.win_rate - 100.0 / 3.0).abs() < 1e-9);
    assert!((profile.avg_score_per_game - 15.0).abs() < 1e-9);
    assert_eq!(profile.total_points, 45);
    assert_eq!(profile.best_score, Some(10));
    assert_eq!(profile.worst_score, Some(20));
}

#[test]
fn nemesis_requires_more_than_two_shared_games() {
    let mut t = Tracker::new();
    let target = t.add_player("Target", None).unwrap().id;
    let rival = t.add_player("Rival", None).unwrap().id;
    // Rival wins both shared games, but 2 games do not qualify.
    t.record_game(date(1), vec![entry(target, 30), entry(rival, 5)])
        .unwrap();
    t.record_game(date(2), vec![entry(target, 40), entry(rival, 10)])
        .unwrap();
    let profile = calculate_player_profile(target, t.players(), &t.games()).unwrap();
    assert!(profile.nemesis.is_none());
    assert!(profile.lucky_charm.is_none());

    // A third shared game qualifies the rival.
    t.record_game(date(3), vec![entry(target, 20), entry(rival, 5)])
        .unwrap();
    let profile = calculate_player_profile(target, t.players(), &t.games()).unwrap();
    assert_eq!(profile.nemesis.unwrap().id, rival);
}

#[test]
fn nemesis_picks_highest_loss_rate() {
    let mut t = Tracker::new();
    let target = t.add_player("Target", None).unwrap().id;
    let mild = t.add_player("Mild", None).unwrap().id;
    let fierce = t.add_player("Fierce", None).unwrap().id;
    // Three games all together: fierce wins two, mild wins one.
    t.record_game(date(1), vec![entry(target, 20), entry(mild, 30), entry(fierce, 5)])
        .unwrap();
    t.record_game(date(2), vec![entry(target, 25), entry(mild, 15), entry(fierce, 5)])
        .unwrap();
    t.record_game(date(3), vec![entry(target, 20), entry(mild, 5), entry(fierce, 30)])
        .unwrap();
    let profile = calculate_player_profile(target, t.players(), &t.games()).unwrap();
    assert_eq!(profile.nemesis.unwrap().id, fierce);
}

#[test]
fn nemesis_tie_keeps_the_first_opponent_in_roster_order() {
    let mut t = Tracker::new();
    let target = t.add_player("Target", None).unwrap().id;
    let first = t.add_player("First", None).unwrap().id;
    let second = t.add_player("Second", None).unwrap().id;
    // Three shared games, one win each: both opponents end at loss rate 1/3.
    t.record_game(date(1), vec![entry(target, 20), entry(first, 5), entry(second, 30)])
        .unwrap();
    t.record_game(date(2), vec![entry(target, 20), entry(first, 30), entry(second, 5)])
        .unwrap();
    t.record_game(date(3), vec![entry(target, 5), entry(first, 20), entry(second, 30)])
        .unwrap();
    let profile = calculate_player_profile(target, t.players(), &t.games()).unwrap();
    assert_eq!(profile.nemesis.unwrap().id, first);
}

#[test]
fn lucky_charm_tie_keeps_the_first_ally_in_roster_order() {
    let mut t = Tracker::new();
    let target = t.add_player("Target", None).unwrap().id;
    let first = t.add_player("First", None).unwrap().id;
    let second = t.add_player("Second", None).unwrap().id;
    let loser = t.add_player("Loser", None).unwrap().id;
    // Target wins three games with both allies present and a fixed loser:
    // both allies qualify with an identical win rate.
    for day in 1..=3 {
        t.record_game(
            date(day),
            vec![
                entry(target, 0),
                entry(first, 10),
                entry(second, 15),
                entry(loser, 40),
            ],
        )
        .unwrap();
    }
    let profile = calculate_player_profile(target, t.players(), &t.games()).unwrap();
    assert_eq!(profile.lucky_charm.unwrap().id, first);
}

#[test]
fn lucky_charm_counts_won_games_and_skips_the_loser() {
    let mut t = Tracker::new();
    let target = t.add_player("Target", None).unwrap().id;
    let unlucky = t.add_player("Unlucky", None).unwrap().id;
    let charm = t.add_player("Charm", None).unwrap().id;
    // Target wins three games; Unlucky always loses, so only Charm counts as
    // an ally even though Unlucky sat at the same table.
    for day in 1..=3 {
        t.record_game(
            date(day),
            vec![entry(target, 0), entry(charm, 10), entry(unlucky, 30)],
        )
        .unwrap();
    }
    let profile = calculate_player_profile(target, t.players(), &t.games()).unwrap();
    assert_eq!(profile.lucky_charm.unwrap().id, charm);
}

#[test]
fn hall_of_fame_is_all_none_without_games() {
    let mut t = Tracker::new();
    t.add_player("Lonely", None).unwrap();
    let hof = calculate_hall_of_fame(t.players(), &t.games());
    assert!(hof.king.is_none());
    assert!(hof.collector.is_none());
    assert!(hof.metronome.is_none());

    let empty = Tracker::new();
    let hof = calculate_hall_of_fame(empty.players(), &empty.games());
    assert!(hof.king.is_none());
    assert!(hof.collector.is_none());
    assert!(hof.metronome.is_none());
}

#[test]
fn hall_of_fame_reference_awards() {
    let (t, a, b, c) = reference_tracker();
    let hof = calculate_hall_of_fame(t.players(), &t.games());

    // One win each; the tie keeps the first player in roster order.
    let king = hof.king.unwrap();
    assert_eq!(king.player.id, a);
    assert_eq!(king.wins, 1);

    let collector = hof.collector.unwrap();
    assert_eq!(collector.player.id, c);
    assert_eq!(collector.points, 55);

    let metronome = hof.metronome.unwrap();
    assert_eq!(metronome.player.id, b);
    assert!((metronome.avg_score - 35.0 / 3.0).abs() < 1e-9);
}

#[test]
fn global_stats_empty_history() {
    let stats = calculate_global_stats(&[]);
    assert!(stats.game_intensity.is_empty());
    assert!(stats.game_attendance.is_empty());
    assert!(stats.score_distribution.iter().all(|b| b.count == 0));
    assert!(stats.tightest_game.is_none());
    assert!(stats.most_explosive_game.is_none());
}

#[test]
fn global_stats_series_follow_date_order() {
    let (t, _, _, _) = reference_tracker();
    let stats = calculate_global_stats(&t.games());

    let labels: Vec<&str> = stats.game_intensity.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, ["Game 1", "Game 2", "Game 3"]);
    assert_eq!(stats.game_intensity[0].date, date(1));
    assert_eq!(stats.game_intensity[2].date, date(3));
    // G1 mean = (10+20+30)/3 = 20.
    assert_eq!(stats.game_intensity[0].avg_score, 20.0);
    assert!(stats.game_attendance.iter().all(|p| p.player_count == 3));
}

#[test]
fn intensity_average_is_rounded_to_two_decimals() {
    let mut t = Tracker::new();
    let a = t.add_player("A", None).unwrap().id;
    let b = t.add_player("B", None).unwrap().id;
    let c = t.add_player("C", None).unwrap().id;
    // Mean 10/3 = 3.333... -> 3.33.
    t.record_game(date(1), vec![entry(a, 3), entry(b, 3), entry(c, 4)])
        .unwrap();
    let stats = calculate_global_stats(&t.games());
    assert_eq!(stats.game_intensity[0].avg_score, 3.33);
}

#[test]
fn histogram_counts_every_participant_score() {
    let (t, _, _, _) = reference_tracker();
    let games = t.games();
    let stats = calculate_global_stats(&games);

    let total_entries: usize = games.iter().map(|g| g.participants.len()).sum();
    let bucketed: usize = stats.score_distribution.iter().map(|b| b.count).sum();
    assert_eq!(bucketed, total_entries);

    let by_label = |label: &str| {
        stats
            .score_distribution
            .iter()
            .find(|b| b.label == label)
            .map(|b| b.count)
            .unwrap()
    };
    // Scores: 10,20,30 / 15,5,25 / 20,10,0.
    assert_eq!(by_label("0-10"), 4);
    assert_eq!(by_label("11-20"), 3);
    assert_eq!(by_label("21-30"), 2);
    assert_eq!(by_label("66+"), 0);
}

#[test]
fn histogram_band_bounds_are_inclusive() {
    let mut t = Tracker::new();
    let a = t.add_player("A", None).unwrap().id;
    let b = t.add_player("B", None).unwrap().id;
    t.record_game(date(1), vec![entry(a, 51), entry(b, 65)])
        .unwrap();
    t.record_game(date(2), vec![entry(a, 66), entry(b, 120)])
        .unwrap();
    let stats = calculate_global_stats(&t.games());
    let by_label = |label: &str| {
        stats
            .score_distribution
            .iter()
            .find(|b| b.label == label)
            .map(|b| b.count)
            .unwrap()
    };
    assert_eq!(by_label("51-65"), 2);
    assert_eq!(by_label("66+"), 2);
}

#[test]
fn record_games_for_reference_history() {
    let (t, _, _, _) = reference_tracker();
    let stats = calculate_global_stats(&t.games());

    // Gaps: G1 20, G2 20, G3 20 -> first found wins; totals: 60, 45, 30.
    let tightest = stats.tightest_game.unwrap();
    assert_eq!(tightest.gap, 20);
    let explosive = stats.most_explosive_game.unwrap();
    assert_eq!(explosive.total_score, 60);
    assert_eq!(explosive.game.date, date(1));
}

#[test]
fn single_participant_games_are_never_records() {
    let players = vec![Player::new("Solo", "bull_1"), Player::new("Duo", "bull_2")];
    let solo = GameRecord::new(date(1), vec![entry(players[0].id, 1)]);
    let duo = GameRecord::new(
        date(2),
        vec![entry(players[0].id, 40), entry(players[1].id, 50)],
    );
    let games: Vec<GameData> = resolve_games(&players, &[solo, duo]);

    let stats = calculate_global_stats(&games);
    // The solo game has gap 0 and would otherwise win "tightest".
    assert_eq!(stats.tightest_game.unwrap().game.date, date(2));
    assert_eq!(stats.most_explosive_game.unwrap().total_score, 90);

    // It is also excluded from the win-rate matrix.
    let matrix = calculate_win_rate_by_table_size(&players, &games);
    assert_eq!(matrix.table_sizes, vec![2]);
    assert!(matrix.stats[&players[0].id].get(&1).is_none());
}

#[test]
fn win_rate_matrix_reference_example() {
    let (t, a, b, c) = reference_tracker();
    let matrix = calculate_win_rate_by_table_size(t.players(), &t.games());

    assert_eq!(matrix.table_sizes, vec![3]);
    for id in [a, b, c] {
        let cell = matrix.stats[&id][&3];
        assert_eq!(cell.games, 3);
        assert_eq!(cell.wins, 1);
    }
}

#[test]
fn win_rate_matrix_tracks_each_table_size_separately() {
    let mut t = Tracker::new();
    let a = t.add_player("A", None).unwrap().id;
    let b = t.add_player("B", None).unwrap().id;
    let c = t.add_player("C", None).unwrap().id;
    t.record_game(date(1), vec![entry(a, 5), entry(b, 10)]).unwrap();
    t.record_game(date(2), vec![entry(a, 10), entry(b, 5), entry(c, 20)])
        .unwrap();
    let matrix = calculate_win_rate_by_table_size(t.players(), &t.games());

    assert_eq!(matrix.table_sizes, vec![2, 3]);
    let a_cells = &matrix.stats[&a];
    assert_eq!(a_cells[&2].wins, 1);
    assert_eq!(a_cells[&2].games, 1);
    assert_eq!(a_cells[&3].wins, 0);
    assert_eq!(a_cells[&3].games, 1);
    // C never played 2-player tables: no cell at that size.
    assert!(matrix.stats[&c].get(&2).is_none());
}

#[test]
fn stats_include_inactive_players_history() {
    let (mut t, _, b, _) = reference_tracker();
    t.set_player_active(b, false).unwrap();
    let board = calculate_leaderboard(t.players(), &t.games());
    assert_eq!(board[0].player.id, b);
    let hof = calculate_hall_of_fame(t.players(), &t.games());
    assert_eq!(hof.metronome.unwrap().player.id, b);
}
