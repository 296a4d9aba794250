use ratatui::{buffer::Buffer, layout::Rect};

use crate::{
    app::{App, View},
    ui::{self, rooms},
};

/// A UI Screen boundary: responsible for rendering one view's body
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Rules and the ranking podium
pub struct BriefingScreen;

impl Screen for BriefingScreen {
    fn render(&self, _app: &App, area: Rect, buf: &mut Buffer) {
        ui::render_briefing(area, buf);
    }
}

/// Untimed warm-up passage
pub struct PracticeScreen;

impl Screen for PracticeScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        if let Some(practice) = &app.practice {
            ui::render_practice(practice, area, buf);
        }
    }
}

/// The timed rounds, their overlays and the summary
pub struct TypingScreen;

impl Screen for TypingScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        if let Some(competition) = &app.competition {
            ui::render_competition(competition, area, buf);
        }
    }
}

pub struct WaitingScreen {
    host: bool,
}

impl Screen for WaitingScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        if let Some(lobby) = &app.lobby {
            rooms::render_lobby(lobby, self.host, area, buf);
        }
    }
}

pub struct MonitoringScreen;

impl Screen for MonitoringScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        if let Some(monitor) = &app.monitor {
            rooms::render_monitor(monitor, area, buf);
        }
    }
}

pub struct LeaderboardScreen {
    host: bool,
}

impl Screen for LeaderboardScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        if self.host {
            rooms::render_host_leaderboard(&app.leaderboard, area, buf);
        } else {
            rooms::render_leaderboard(&app.leaderboard, area, buf);
        }
    }
}

/// Helper to construct the appropriate screen for the current view
pub fn current_screen(view: View) -> Box<dyn Screen> {
    match view {
        View::Briefing => Box::new(BriefingScreen),
        View::Practice => Box::new(PracticeScreen),
        View::MainTyping => Box::new(TypingScreen),
        View::Waiting => Box::new(WaitingScreen { host: false }),
        View::HostWaiting => Box::new(WaitingScreen { host: true }),
        View::HostMonitoring => Box::new(MonitoringScreen),
        View::Leaderboard => Box::new(LeaderboardScreen { host: false }),
        View::HostLeaderboard => Box::new(LeaderboardScreen { host: true }),
    }
}
