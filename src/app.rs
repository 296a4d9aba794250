use std::rc::Rc;
use std::time::Duration;

use clap::ValueEnum;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use tracing::{debug, error, info};

use typetrial::{
    clock::Clock,
    competition::Competition,
    events::{EventQueue, SessionEvent, StatusPills},
    leaderboard::Player,
    passage::PassageSet,
    practice::PracticeRoom,
    roster::{load_leaderboard, load_lobby, load_monitor, Lobby, Monitor, RosterSource},
    runtime::keystroke,
    session::{SessionConfig, Stage},
    timers::{TimerKind, TimerSet},
};

/// Pause between the last monitored player finishing and the host leaderboard
const MONITOR_COMPLETE_DELAY: Duration = Duration::from_secs(2);
/// Shortest gap between simulated monitor steps
const MIN_MONITOR_STEP: Duration = Duration::from_millis(100);

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum View {
    Briefing,
    Practice,
    MainTyping,
    Waiting,
    HostWaiting,
    HostMonitoring,
    Leaderboard,
    HostLeaderboard,
}

impl View {
    /// Dev menu order
    pub const ALL: [View; 8] = [
        View::Briefing,
        View::Practice,
        View::MainTyping,
        View::Waiting,
        View::HostWaiting,
        View::HostMonitoring,
        View::Leaderboard,
        View::HostLeaderboard,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            View::Briefing => "System Briefing",
            View::Practice => "Practice Room",
            View::MainTyping => "Main Typing Test",
            View::Waiting => "Waiting Room (User)",
            View::HostWaiting => "Waiting Room (Host)",
            View::HostMonitoring => "Host Monitoring",
            View::Leaderboard => "Leaderboard (User)",
            View::HostLeaderboard => "Leaderboard (Host)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppTimer {
    MonitorStep,
    MonitoringComplete,
}

/// What the app needs to build every view
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub passages: PassageSet,
    pub session: SessionConfig,
    pub monitor_step: Duration,
}

pub struct App {
    pub view: View,
    pub status: StatusPills,
    pub dev_menu: Option<usize>,
    pub practice: Option<PracticeRoom>,
    pub competition: Option<Competition<Rc<dyn Clock>>>,
    pub lobby: Option<Lobby>,
    pub monitor: Option<Monitor>,
    pub leaderboard: Vec<Player>,
    options: AppOptions,
    roster: Box<dyn RosterSource>,
    clock: Rc<dyn Clock>,
    rng: StdRng,
    timers: TimerSet<AppTimer>,
    events: EventQueue,
    should_quit: bool,
}

impl App {
    pub fn new(
        options: AppOptions,
        roster: Box<dyn RosterSource>,
        clock: Rc<dyn Clock>,
        rng: StdRng,
        start: View,
    ) -> Self {
        let mut app = Self {
            view: start,
            status: StatusPills::new("BRIEFING", "--:--"),
            dev_menu: None,
            practice: None,
            competition: None,
            lobby: None,
            monitor: None,
            leaderboard: Vec::new(),
            options: AppOptions {
                monitor_step: options.monitor_step.max(MIN_MONITOR_STEP),
                ..options
            },
            roster,
            clock,
            rng,
            timers: TimerSet::new(),
            events: EventQueue::default(),
            should_quit: false,
        };
        app.enter(start);
        app
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Leave the current view and build the state for `view`
    pub fn enter(&mut self, view: View) {
        if let Some(competition) = self.competition.as_mut() {
            competition.teardown();
        }
        self.timers.cancel_all();
        self.practice = None;
        self.competition = None;
        self.lobby = None;
        self.monitor = None;
        self.dev_menu = None;

        info!(from = %self.view, to = %view, "view changed");
        self.view = view;

        match view {
            View::Briefing => {
                self.status = StatusPills::new("BRIEFING", "--:--");
            }
            View::Practice => {
                self.practice = Some(PracticeRoom::new(&self.options.passages.practice));
            }
            View::MainTyping => {
                match Competition::new(
                    self.options.passages.rounds.clone(),
                    self.options.session,
                    Rc::clone(&self.clock),
                ) {
                    Ok(competition) => self.competition = Some(competition),
                    Err(e) => {
                        error!(error = %e, "cannot start competition");
                        self.view = View::Briefing;
                        self.status = StatusPills::new("BRIEFING", "--:--");
                    }
                }
            }
            View::Waiting => {
                let lobby = Lobby::new(load_lobby(self.roster.as_ref()));
                self.status = lobby.waiting_status_pills();
                self.lobby = Some(lobby);
            }
            View::HostWaiting => {
                let lobby = Lobby::new(load_lobby(self.roster.as_ref()));
                self.status = lobby.host_status_pills();
                self.lobby = Some(lobby);
            }
            View::HostMonitoring => {
                let monitor = Monitor::new(load_monitor(self.roster.as_ref()));
                self.status = monitor.status_pills();
                self.monitor = Some(monitor);
                self.schedule_monitor_step();
            }
            View::Leaderboard => {
                self.leaderboard = load_leaderboard(self.roster.as_ref());
                self.status = StatusPills::new("LEADERBOARD", "TOP 3");
            }
            View::HostLeaderboard => {
                self.leaderboard = load_leaderboard(self.roster.as_ref());
                self.status = StatusPills::new("HOST LEADERBOARD", "ALL RESULTS");
            }
        }
        self.process_events();
    }

    pub fn on_tick(&mut self) {
        if let Some(competition) = self.competition.as_mut() {
            competition.tick();
        }

        let now = self.clock.now();
        while let Some(fired) = self.timers.pop_due(now) {
            if fired.generation != self.timers.generation() {
                continue;
            }
            match fired.action {
                AppTimer::MonitorStep => self.on_monitor_step(),
                AppTimer::MonitoringComplete => {
                    self.events.push(SessionEvent::MonitoringComplete);
                }
            }
        }

        self.process_events();
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if key.code == KeyCode::F(2) {
            self.dev_menu = match self.dev_menu {
                Some(_) => None,
                None => Some(View::ALL.iter().position(|v| *v == self.view).unwrap_or(0)),
            };
            return;
        }

        if self.dev_menu.is_some() {
            self.on_dev_menu_key(key);
            return;
        }

        match self.view {
            View::Briefing => match key.code {
                KeyCode::Enter => self.enter(View::Practice),
                KeyCode::Esc => self.should_quit = true,
                _ => {}
            },
            View::Practice => self.on_practice_key(key),
            View::MainTyping => self.on_typing_key(key),
            View::Waiting | View::Leaderboard | View::HostLeaderboard => {
                if key.code == KeyCode::Esc {
                    self.enter(View::Briefing);
                }
            }
            View::HostWaiting => match key.code {
                KeyCode::Enter => {
                    if self.lobby.as_mut().is_some_and(Lobby::start) {
                        self.enter(View::MainTyping);
                    }
                }
                KeyCode::Esc => self.enter(View::Briefing),
                _ => {}
            },
            View::HostMonitoring => {
                if key.code == KeyCode::Esc {
                    self.enter(View::HostWaiting);
                }
            }
        }

        self.process_events();
    }

    fn on_practice_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.enter(View::Briefing);
            return;
        }
        let Some(practice) = self.practice.as_mut() else {
            return;
        };

        if practice.is_complete() {
            match key.code {
                KeyCode::Enter => {
                    practice.proceed();
                }
                KeyCode::Char('r') => practice.reset(),
                _ => {}
            }
        } else {
            practice.on_key(keystroke(&key));
        }
    }

    fn on_typing_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.enter(View::Briefing);
            return;
        }
        let Some(competition) = self.competition.as_mut() else {
            return;
        };

        if competition.stage() == Stage::Summary {
            match key.code {
                KeyCode::Enter => {
                    competition.wait_for_results();
                }
                KeyCode::Char('r') => competition.restart(),
                _ => {}
            }
        } else {
            competition.on_key(keystroke(&key));
        }
    }

    fn on_dev_menu_key(&mut self, key: KeyEvent) {
        let Some(selected) = self.dev_menu else {
            return;
        };
        let last = View::ALL.len() - 1;

        match key.code {
            KeyCode::Esc => self.dev_menu = None,
            KeyCode::Up => self.dev_menu = Some(selected.saturating_sub(1)),
            KeyCode::Down => self.dev_menu = Some((selected + 1).min(last)),
            KeyCode::Enter => self.enter(View::ALL[selected]),
            KeyCode::Char(c) => {
                if let Some(view) = c
                    .to_digit(10)
                    .and_then(|d| (d as usize).checked_sub(1))
                    .and_then(|i| View::ALL.get(i))
                {
                    self.enter(*view);
                }
            }
            _ => {}
        }
    }

    fn schedule_monitor_step(&mut self) {
        let due = self.clock.now() + self.options.monitor_step;
        self.timers
            .schedule(due, TimerKind::Delay, AppTimer::MonitorStep);
    }

    fn on_monitor_step(&mut self) {
        let Some(monitor) = self.monitor.as_mut() else {
            return;
        };
        monitor.simulate_step(&mut self.rng);
        self.status = monitor.status_pills();

        if monitor.all_completed() {
            info!(players = monitor.players().len(), "every player finished");
            let due = self.clock.now() + MONITOR_COMPLETE_DELAY;
            self.timers
                .schedule(due, TimerKind::Delay, AppTimer::MonitoringComplete);
        } else {
            self.schedule_monitor_step();
        }
    }

    /// Drain controller notifications and follow the navigation they ask for
    fn process_events(&mut self) {
        let mut pending = self.events.drain();
        if let Some(practice) = self.practice.as_mut() {
            pending.extend(practice.drain_events());
        }
        if let Some(competition) = self.competition.as_mut() {
            pending.extend(competition.drain_events());
        }

        for event in pending {
            match event {
                SessionEvent::StatusChanged(pills) => self.status = pills,
                SessionEvent::PhaseChanged { round, phase } => {
                    debug!(round = round + 1, %phase, "phase changed");
                }
                SessionEvent::RoundFinalized { round, result } => {
                    debug!(round = round + 1, wpm = ?result.wpm, "round result ready");
                }
                SessionEvent::SessionCompleted => {
                    debug!("showing session summary");
                }
                SessionEvent::Proceed | SessionEvent::WaitForResults => {
                    self.enter(View::Waiting);
                    return;
                }
                SessionEvent::MonitoringComplete => {
                    self.enter(View::HostLeaderboard);
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rand::SeedableRng;
    use typetrial::clock::ManualClock;
    use typetrial::roster::{StaticRoster, UnavailableRoster};
    use typetrial::sequencer::OverlayPhase;

    fn options(rounds: &[&str]) -> AppOptions {
        AppOptions {
            passages: PassageSet {
                practice: "hi".to_string(),
                rounds: rounds.iter().map(|r| r.to_string()).collect(),
            },
            session: SessionConfig::default(),
            monitor_step: Duration::from_secs(3),
        }
    }

    fn app_at(view: View, clock: &ManualClock) -> App {
        let roster = StaticRoster::bundled().unwrap();
        App::new(
            options(&["go", "ok"]),
            Box::new(roster),
            Rc::new(clock.clone()),
            StdRng::seed_from_u64(7),
            view,
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.on_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn briefing_enter_begins_practice() {
        let clock = ManualClock::new();
        let mut app = app_at(View::Briefing, &clock);
        assert_eq!(app.status, StatusPills::new("BRIEFING", "--:--"));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view, View::Practice);
        assert_eq!(app.status, StatusPills::new("PRACTICE", "--:--"));
    }

    #[test]
    fn practice_proceeds_to_waiting_once_complete() {
        let clock = ManualClock::new();
        let mut app = app_at(View::Practice, &clock);

        // not complete yet, enter does nothing
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view, View::Practice);

        type_str(&mut app, "hi");
        assert!(app.practice.as_ref().unwrap().is_complete());

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view, View::Waiting);
        assert_eq!(app.status, StatusPills::new("WAITING", "--:--"));
        assert!(app.lobby.is_some());
    }

    #[test]
    fn practice_more_clears_the_passage() {
        let clock = ManualClock::new();
        let mut app = app_at(View::Practice, &clock);
        type_str(&mut app, "hi");

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.practice.as_ref().unwrap().buffer().typed_len(), 0);
    }

    #[test]
    fn esc_from_practice_goes_back() {
        let clock = ManualClock::new();
        let mut app = app_at(View::Practice, &clock);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.view, View::Briefing);
        assert!(app.practice.is_none());
    }

    #[test]
    fn host_start_opens_the_competition() {
        let clock = ManualClock::new();
        let mut app = app_at(View::HostWaiting, &clock);
        assert_eq!(app.status, StatusPills::new("HOST", "READY"));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view, View::MainTyping);
        assert_eq!(app.status, StatusPills::new("ROUND 1 OF 2", "1:00"));
    }

    #[test]
    fn competition_flows_through_summary_to_waiting() {
        let clock = ManualClock::new();
        let mut app = app_at(View::MainTyping, &clock);

        for passage in ["go", "ok"] {
            clock.advance_ms(7_000);
            app.on_tick();
            assert_matches!(
                app.competition.as_ref().map(|c| c.phase()),
                Some(OverlayPhase::None)
            );
            type_str(&mut app, passage);
            assert_matches!(
                app.competition.as_ref().map(|c| c.phase()),
                Some(OverlayPhase::RoundResult)
            );
            press(&mut app, KeyCode::Char(' '));
        }

        assert_eq!(app.status, StatusPills::new("RESULTS", "--:--"));
        assert_matches!(
            app.competition.as_ref().map(|c| c.stage()),
            Some(Stage::Summary)
        );

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view, View::Waiting);
        assert!(app.competition.is_none());
    }

    #[test]
    fn zero_monitor_step_is_clamped() {
        let clock = ManualClock::new();
        let mut opts = options(&["go"]);
        opts.monitor_step = Duration::ZERO;
        let mut app = App::new(
            opts,
            Box::new(UnavailableRoster),
            Rc::new(clock.clone()),
            StdRng::seed_from_u64(7),
            View::HostMonitoring,
        );
        assert_eq!(app.options.monitor_step, MIN_MONITOR_STEP);

        // an empty roster never completes, each tick must still return
        for _ in 0..5 {
            clock.advance_ms(50);
            app.on_tick();
        }
        assert_eq!(app.view, View::HostMonitoring);
        assert_eq!(app.timers.len(), 1);
    }

    #[test]
    fn monitoring_completes_into_host_leaderboard() {
        let clock = ManualClock::new();
        let mut app = app_at(View::HostMonitoring, &clock);

        // every step has a 0.3 chance per player; 200 steps finish everyone
        for _ in 0..200 {
            if app.view != View::HostMonitoring {
                break;
            }
            clock.advance_ms(3_000);
            app.on_tick();
        }

        assert_eq!(app.view, View::HostLeaderboard);
        assert_eq!(app.status, StatusPills::new("HOST LEADERBOARD", "ALL RESULTS"));
        assert!(!app.leaderboard.is_empty());
    }

    #[test]
    fn dev_menu_jumps_to_any_view() {
        let clock = ManualClock::new();
        let mut app = app_at(View::Briefing, &clock);

        press(&mut app, KeyCode::F(2));
        assert_eq!(app.dev_menu, Some(0));

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view, View::MainTyping);
        assert_eq!(app.dev_menu, None);

        press(&mut app, KeyCode::F(2));
        press(&mut app, KeyCode::Char('7'));
        assert_eq!(app.view, View::Leaderboard);
        assert_eq!(app.status, StatusPills::new("LEADERBOARD", "TOP 3"));
    }

    #[test]
    fn leaving_the_competition_cancels_its_timers() {
        let clock = ManualClock::new();
        let mut app = app_at(View::MainTyping, &clock);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.view, View::Briefing);

        clock.advance_ms(10_000);
        app.on_tick();
        assert_eq!(app.view, View::Briefing);
        assert_eq!(app.status, StatusPills::new("BRIEFING", "--:--"));
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        let clock = ManualClock::new();
        for view in View::ALL {
            let mut app = app_at(view, &clock);
            app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
            assert!(app.should_quit(), "{view} did not quit");
        }
    }

    #[test]
    fn unavailable_roster_shows_unknown_players() {
        let clock = ManualClock::new();
        let app = App::new(
            options(&["go"]),
            Box::new(UnavailableRoster),
            Rc::new(clock),
            StdRng::seed_from_u64(1),
            View::Waiting,
        );
        let lobby = app.lobby.as_ref().unwrap();
        assert_eq!(lobby.players().len(), 8);
        assert!(lobby.players().iter().all(|p| p.name == "Unknown"));
    }
}
