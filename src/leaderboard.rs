use serde::Deserialize;

use crate::util::rounded_mean;

/// A competitor's per-round scores
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub team: String,
    #[serde(default)]
    pub wpm_rounds: Vec<u32>,
    #[serde(default)]
    pub accuracy_rounds: Vec<u32>,
}

/// A leaderboard row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankedPlayer {
    pub id: u32,
    pub name: String,
    pub team: String,
    pub avg_wpm: u32,
    pub avg_accuracy: u32,
    pub is_placeholder: bool,
}

impl RankedPlayer {
    fn placeholder() -> Self {
        Self {
            id: 0,
            name: "--".to_string(),
            team: "--".to_string(),
            avg_wpm: 0,
            avg_accuracy: 0,
            is_placeholder: true,
        }
    }
}

impl From<&Player> for RankedPlayer {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            team: player.team.clone(),
            avg_wpm: rounded_mean(&player.wpm_rounds),
            avg_accuracy: rounded_mean(&player.accuracy_rounds),
            is_placeholder: false,
        }
    }
}

/// Rows prepared for the player-facing leaderboard
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardRows {
    pub rows: Vec<RankedPlayer>,
    pub max_avg_accuracy: u32,
}

/// Averages per player, best average WPM first. Equal averages keep input order.
pub fn rank_players(players: &[Player]) -> Vec<RankedPlayer> {
    let mut ranked: Vec<RankedPlayer> = players.iter().map(RankedPlayer::from).collect();
    ranked.sort_by(|a, b| b.avg_wpm.cmp(&a.avg_wpm));
    ranked
}

pub fn rank_label(index: usize) -> String {
    match index {
        0 => "1st".to_string(),
        1 => "2nd".to_string(),
        2 => "3rd".to_string(),
        n => format!("{}th", n + 1),
    }
}

pub fn add_placeholders(mut rows: Vec<RankedPlayer>, total_rows: usize) -> Vec<RankedPlayer> {
    let needed = total_rows.saturating_sub(rows.len());
    rows.extend(std::iter::repeat_with(RankedPlayer::placeholder).take(needed));
    rows
}

/// Highest real average accuracy, never below 1
pub fn max_average_accuracy(rows: &[RankedPlayer]) -> u32 {
    rows.iter()
        .filter(|r| !r.is_placeholder)
        .map(|r| r.avg_accuracy)
        .max()
        .unwrap_or(0)
        .max(1)
}

/// Width of a row's accuracy bar relative to the best row
pub fn accuracy_bar_percent(avg_accuracy: u32, max_avg_accuracy: u32) -> u32 {
    ((avg_accuracy as f64 / max_avg_accuracy.max(1) as f64) * 100.0).round() as u32
}

pub fn leaderboard_rows(players: &[Player], top_count: usize, total_rows: usize) -> LeaderboardRows {
    let top: Vec<RankedPlayer> = rank_players(players).into_iter().take(top_count).collect();
    let rows = add_placeholders(top, total_rows);
    let max_avg_accuracy = max_average_accuracy(&rows);
    LeaderboardRows {
        rows,
        max_avg_accuracy,
    }
}
