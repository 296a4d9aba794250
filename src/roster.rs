use itertools::Itertools;
use rand::Rng;
use serde::Deserialize;
use serde_json::from_str;
use tracing::{info, warn};

use crate::error::{Result, TypetrialError};
use crate::events::StatusPills;
use crate::leaderboard::Player;
use crate::passage::{read_resource, ROUND_COUNT};

pub const AVATARS: [&str; 15] = [
    "👨‍💻", "👩‍💻", "🧑‍💻", "🎮", "🎯", "🚀", "✨", "🌟", "⚡", "🎨", "🔥", "💎", "🏆", "🎭", "🎪",
];

/// Seats in a lobby, also the size of the fallback roster
pub const LOBBY_CAPACITY: usize = 8;

/// Chance per simulation step that an unfinished player advances a round
pub const ADVANCE_CHANCE: f64 = 0.3;

pub fn avatar_for(id: u32) -> &'static str {
    AVATARS[id as usize % AVATARS.len()]
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct RawLobbyPlayer {
    pub id: u32,
    pub name: Option<String>,
    pub team: Option<String>,
    pub ping: Option<u32>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct RawMonitoredPlayer {
    pub id: u32,
    pub name: Option<String>,
    pub team: Option<String>,
    pub current_round: Option<u32>,
    pub is_completed: Option<bool>,
    pub wpm: Option<u32>,
    pub accuracy: Option<u32>,
}

/// Where roster data comes from
pub trait RosterSource {
    fn lobby(&self) -> Result<Vec<RawLobbyPlayer>>;
    fn monitor(&self) -> Result<Vec<RawMonitoredPlayer>>;
    fn leaderboard(&self) -> Result<Vec<Player>>;
}

#[derive(Deserialize, Clone, Debug, Default)]
struct RosterFile {
    lobby: Vec<RawLobbyPlayer>,
    monitor: Vec<RawMonitoredPlayer>,
    leaderboard: Vec<Player>,
}

/// Mock rosters bundled with the binary
#[derive(Clone, Debug)]
pub struct StaticRoster {
    file: RosterFile,
}

impl StaticRoster {
    pub fn bundled() -> Result<Self> {
        Self::from_json(read_resource("roster.json")?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self { file: from_str(json)? })
    }
}

impl RosterSource for StaticRoster {
    fn lobby(&self) -> Result<Vec<RawLobbyPlayer>> {
        Ok(self.file.lobby.clone())
    }

    fn monitor(&self) -> Result<Vec<RawMonitoredPlayer>> {
        Ok(self.file.monitor.clone())
    }

    fn leaderboard(&self) -> Result<Vec<Player>> {
        Ok(self.file.leaderboard.clone())
    }
}

/// Source used when the bundled roster cannot be read
#[derive(Clone, Debug, Default)]
pub struct UnavailableRoster;

impl RosterSource for UnavailableRoster {
    fn lobby(&self) -> Result<Vec<RawLobbyPlayer>> {
        Err(TypetrialError::Roster("roster unavailable".to_string()))
    }

    fn monitor(&self) -> Result<Vec<RawMonitoredPlayer>> {
        Err(TypetrialError::Roster("roster unavailable".to_string()))
    }

    fn leaderboard(&self) -> Result<Vec<Player>> {
        Err(TypetrialError::Roster("roster unavailable".to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LobbyPlayer {
    pub id: u32,
    pub name: String,
    pub team: String,
    pub ping: Option<u32>,
}

impl LobbyPlayer {
    fn unknown(id: u32) -> Self {
        Self {
            id,
            name: "Unknown".to_string(),
            team: String::new(),
            ping: None,
        }
    }

    pub fn ping_label(&self) -> String {
        self.ping.map_or_else(|| "--".to_string(), |p| p.to_string())
    }

    pub fn ping_tier(&self) -> PingTier {
        PingTier::from_ping(self.ping)
    }
}

impl From<RawLobbyPlayer> for LobbyPlayer {
    fn from(raw: RawLobbyPlayer) -> Self {
        Self {
            id: raw.id,
            name: raw
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            team: raw.team.unwrap_or_default(),
            ping: raw.ping,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PingTier {
    Unknown,
    Low,
    Medium,
    High,
}

impl PingTier {
    pub fn from_ping(ping: Option<u32>) -> Self {
        match ping {
            None => PingTier::Unknown,
            Some(ms) if ms < 50 => PingTier::Low,
            Some(ms) if ms < 100 => PingTier::Medium,
            Some(_) => PingTier::High,
        }
    }
}

pub fn fallback_lobby() -> Vec<LobbyPlayer> {
    (1..=LOBBY_CAPACITY as u32).map(LobbyPlayer::unknown).collect()
}

/// Lobby players from `source`, or the `Unknown` roster if it fails
pub fn load_lobby(source: &dyn RosterSource) -> Vec<LobbyPlayer> {
    match source.lobby() {
        Ok(raw) => raw.into_iter().map(LobbyPlayer::from).collect(),
        Err(e) => {
            warn!(error = %e, "failed to fetch lobby players, using placeholders");
            fallback_lobby()
        }
    }
}

pub fn load_monitor(source: &dyn RosterSource) -> Vec<MonitoredPlayer> {
    match source.monitor() {
        Ok(raw) => raw.into_iter().map(MonitoredPlayer::from).collect(),
        Err(e) => {
            warn!(error = %e, "failed to fetch monitored players");
            Vec::new()
        }
    }
}

pub fn load_leaderboard(source: &dyn RosterSource) -> Vec<Player> {
    match source.leaderboard() {
        Ok(players) => players,
        Err(e) => {
            warn!(error = %e, "failed to fetch leaderboard players");
            Vec::new()
        }
    }
}

/// A lobby as seen by a player or by the host
#[derive(Clone, Debug)]
pub struct Lobby {
    players: Vec<LobbyPlayer>,
    started: bool,
}

impl Lobby {
    pub fn new(players: Vec<LobbyPlayer>) -> Self {
        Self {
            players,
            started: false,
        }
    }

    pub fn players(&self) -> &[LobbyPlayer] {
        &self.players
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn can_start(&self) -> bool {
        !self.players.is_empty() && !self.started
    }

    /// Host action; returns true when the game actually starts
    pub fn start(&mut self) -> bool {
        if !self.can_start() {
            return false;
        }
        self.started = true;
        info!(players = self.players.len(), "host started the game");
        true
    }

    /// Members per team in order of first appearance, players without a team skipped
    pub fn team_counts(&self) -> Vec<(String, usize)> {
        let teams = || self.players.iter().map(|p| p.team.as_str()).filter(|t| !t.is_empty());
        teams()
            .unique()
            .map(|team| (team.to_string(), teams().filter(|t| *t == team).count()))
            .collect()
    }

    pub fn waiting_status_pills(&self) -> StatusPills {
        StatusPills::new("WAITING", "--:--")
    }

    pub fn host_status_pills(&self) -> StatusPills {
        StatusPills::new("HOST", if self.started { "RUNNING" } else { "READY" })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonitoredPlayer {
    pub id: u32,
    pub name: String,
    pub team: String,
    pub current_round: u32,
    pub is_completed: bool,
    pub wpm: u32,
    pub accuracy: u32,
}

impl From<RawMonitoredPlayer> for MonitoredPlayer {
    fn from(raw: RawMonitoredPlayer) -> Self {
        Self {
            id: raw.id,
            name: raw
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            team: raw
                .team
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "No Team".to_string()),
            current_round: raw.current_round.filter(|r| *r > 0).unwrap_or(1),
            is_completed: raw.is_completed.unwrap_or(false),
            wpm: raw.wpm.unwrap_or(0),
            accuracy: raw.accuracy.unwrap_or(0),
        }
    }
}

impl MonitoredPlayer {
    /// Apply one simulation step. `roll` in [0, 1) decides whether the player advances.
    pub fn advance(&mut self, roll: f64, wpm_gain: u32, accuracy_gain: u32) {
        if self.is_completed || roll <= 1.0 - ADVANCE_CHANCE {
            return;
        }
        self.current_round = (self.current_round + 1).min(ROUND_COUNT as u32);
        self.is_completed = self.current_round == ROUND_COUNT as u32;
        self.wpm += wpm_gain;
        self.accuracy = (self.accuracy + accuracy_gain).min(100);
    }

    pub fn round_tier(&self) -> RoundTier {
        RoundTier::of(self.current_round, self.is_completed)
    }

    pub fn progress_percent(&self) -> f64 {
        self.current_round as f64 / ROUND_COUNT as f64 * 100.0
    }
}

/// Colour band for a player's round indicator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundTier {
    Completed,
    FinalStretch,
    Late,
    Early,
}

impl RoundTier {
    pub fn of(round: u32, is_completed: bool) -> Self {
        if is_completed {
            RoundTier::Completed
        } else if round >= 6 {
            RoundTier::FinalStretch
        } else if round >= 4 {
            RoundTier::Late
        } else {
            RoundTier::Early
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamProgress {
    pub team: String,
    pub total: u32,
    pub completed: u32,
    pub total_rounds: u32,
}

impl TeamProgress {
    pub fn avg_round(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.total_rounds as f64 / self.total as f64
    }

    pub fn avg_round_label(&self) -> String {
        format!("{:.1}", self.avg_round())
    }

    pub fn completed_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64 * 100.0
    }
}

/// Host view over every player's live progress
#[derive(Clone, Debug)]
pub struct Monitor {
    players: Vec<MonitoredPlayer>,
}

impl Monitor {
    pub fn new(players: Vec<MonitoredPlayer>) -> Self {
        Self { players }
    }

    pub fn players(&self) -> &[MonitoredPlayer] {
        &self.players
    }

    /// (completed, active) in roster order
    pub fn split(&self) -> (Vec<&MonitoredPlayer>, Vec<&MonitoredPlayer>) {
        self.players.iter().partition(|p| p.is_completed)
    }

    pub fn completed_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_completed).count()
    }

    pub fn all_completed(&self) -> bool {
        !self.players.is_empty() && self.completed_count() == self.players.len()
    }

    pub fn team_progress(&self) -> Vec<TeamProgress> {
        self.players
            .iter()
            .map(|p| p.team.as_str())
            .unique()
            .map(|team| {
                let members = self.players.iter().filter(|p| p.team == team);
                let (total, completed, total_rounds) =
                    members.fold((0, 0, 0), |(total, completed, rounds), p| {
                        (total + 1, completed + p.is_completed as u32, rounds + p.current_round)
                    });
                TeamProgress {
                    team: team.to_string(),
                    total,
                    completed,
                    total_rounds,
                }
            })
            .collect()
    }

    /// Advance the simulated roster by one step
    pub fn simulate_step<R: Rng>(&mut self, rng: &mut R) {
        for player in &mut self.players {
            let roll: f64 = rng.gen();
            let wpm_gain = rng.gen_range(0..5);
            let accuracy_gain = rng.gen_range(0..3);
            player.advance(roll, wpm_gain, accuracy_gain);
        }
    }

    pub fn status_pills(&self) -> StatusPills {
        StatusPills::new(
            "HOST MONITOR",
            format!("{}/{} DONE", self.completed_count(), self.players.len()),
        )
    }
}
