use rand::rngs::StdRng;
use rand::SeedableRng;

use typetrial::leaderboard::{leaderboard_rows, rank_label, rank_players};
use typetrial::passage::ROUND_COUNT;
use typetrial::roster::{
    load_leaderboard, load_lobby, load_monitor, Lobby, Monitor, StaticRoster, UnavailableRoster,
};

#[test]
fn bundled_leaderboard_ranks_by_average_wpm() {
    let roster = StaticRoster::bundled().unwrap();
    let players = load_leaderboard(&roster);
    let ranked = rank_players(&players);

    assert_eq!(ranked.len(), players.len());
    assert!(ranked.windows(2).all(|w| w[0].avg_wpm >= w[1].avg_wpm));
    assert_eq!(ranked[0].avg_wpm, 170);
    assert_eq!(rank_label(0), "1st");
}

#[test]
fn player_leaderboard_shows_top_three_and_placeholders() {
    let roster = StaticRoster::bundled().unwrap();
    let prepared = leaderboard_rows(&load_leaderboard(&roster), 3, 5);

    assert_eq!(prepared.rows.len(), 5);
    assert_eq!(prepared.rows.iter().filter(|r| r.is_placeholder).count(), 2);
    assert!(prepared.max_avg_accuracy >= prepared.rows[0].avg_accuracy);
}

#[test]
fn host_lobby_starts_once() {
    let roster = StaticRoster::bundled().unwrap();
    let mut lobby = Lobby::new(load_lobby(&roster));

    assert!(!lobby.team_counts().is_empty());
    assert!(lobby.start());
    assert!(!lobby.start());
    assert_eq!(lobby.host_status_pills().timer, "RUNNING");
}

#[test]
fn monitor_simulation_runs_every_player_to_the_last_round() {
    let roster = StaticRoster::bundled().unwrap();
    let mut monitor = Monitor::new(load_monitor(&roster));
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..500 {
        if monitor.all_completed() {
            break;
        }
        monitor.simulate_step(&mut rng);
    }

    assert!(monitor.all_completed());
    assert!(monitor
        .players()
        .iter()
        .all(|p| p.current_round == ROUND_COUNT as u32 && p.accuracy <= 100));
    assert!(monitor
        .team_progress()
        .iter()
        .all(|t| t.completed == t.total));
}

#[test]
fn unavailable_roster_degrades_gracefully() {
    let lobby = load_lobby(&UnavailableRoster);
    assert_eq!(lobby.len(), 8);
    assert!(lobby.iter().all(|p| p.ping_label() == "--"));

    assert!(load_monitor(&UnavailableRoster).is_empty());
    assert!(load_leaderboard(&UnavailableRoster).is_empty());
}
