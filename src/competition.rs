use std::time::Duration;

use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, TypetrialError};
use crate::events::{EventQueue, SessionEvent, StatusPills};
use crate::scoring::{average_accuracy, build_round_result, format_time, RoundInput, RoundResult};
use crate::sequencer::{OverlayPhase, ROUND_TIMELINE};
use crate::session::{SessionConfig, Stage};
use crate::time_series::ProgressSeries;
use crate::timers::{TimerKind, TimerSet};
use crate::typing::{Keystroke, TypingBuffer};

const COUNTDOWN_STEP: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq)]
enum TimerAction {
    SetPhase(OverlayPhase),
    CountdownTick,
    Finalize,
}

/// Controller for a multi-round timed typing session.
///
/// Owns the round's keystroke record, the overlay phase, and every pending
/// timer. Time only moves when [`Competition::tick`] reads the clock.
#[derive(Debug)]
pub struct Competition<C: Clock = SystemClock> {
    passages: Vec<String>,
    config: SessionConfig,
    clock: C,
    round_index: usize,
    buffer: TypingBuffer,
    phase: OverlayPhase,
    time_left: u32,
    stage: Stage,
    results: Vec<RoundResult>,
    progress: ProgressSeries,
    last_result: Option<RoundResult>,
    finalizing: bool,
    timers: TimerSet<TimerAction>,
    events: EventQueue,
}

impl<C: Clock> Competition<C> {
    pub fn new(passages: Vec<String>, config: SessionConfig, clock: C) -> Result<Self> {
        if passages.is_empty() {
            return Err(TypetrialError::Config(
                "a competition needs at least one passage".to_string(),
            ));
        }

        let mut competition = Self {
            buffer: TypingBuffer::default(),
            passages,
            time_left: config.round_secs,
            config,
            clock,
            round_index: 0,
            phase: OverlayPhase::None,
            stage: Stage::Running,
            results: Vec::new(),
            progress: ProgressSeries::new(),
            last_result: None,
            finalizing: false,
            timers: TimerSet::new(),
            events: EventQueue::default(),
        };
        competition.start_round();
        Ok(competition)
    }

    fn start_round(&mut self) {
        self.timers.cancel_all();
        self.finalizing = false;
        self.last_result = None;
        self.buffer = TypingBuffer::new(&self.passages[self.round_index]);
        self.time_left = self.config.round_secs;

        let start = self.clock.now();
        for (offset_ms, phase) in ROUND_TIMELINE {
            if offset_ms > 0 {
                self.timers.schedule(
                    start + Duration::from_millis(offset_ms),
                    TimerKind::Phase,
                    TimerAction::SetPhase(phase),
                );
            }
        }

        info!(
            round = self.round_index + 1,
            rounds = self.passages.len(),
            "round started"
        );
        self.set_phase(ROUND_TIMELINE[0].1);
        self.emit_status();
    }

    /// Fire every timer that has come due
    pub fn tick(&mut self) {
        let now = self.clock.now();
        while let Some(fired) = self.timers.pop_due(now) {
            if fired.generation != self.timers.generation() {
                debug!(kind = ?fired.kind, "dropping timer from a superseded round");
                continue;
            }

            match fired.action {
                TimerAction::SetPhase(phase) => self.on_timeline_phase(phase, fired.due),
                TimerAction::CountdownTick => self.on_countdown_tick(fired.due),
                TimerAction::Finalize => {
                    self.finalize_round();
                }
            }
        }
    }

    fn on_timeline_phase(&mut self, phase: OverlayPhase, at: Duration) {
        if self.stage != Stage::Running {
            return;
        }
        self.set_phase(phase);

        if phase == OverlayPhase::None {
            self.timers
                .schedule(at + COUNTDOWN_STEP, TimerKind::Countdown, TimerAction::CountdownTick);
            if self.buffer.is_complete() {
                self.finalize_round();
            }
        }
    }

    fn on_countdown_tick(&mut self, at: Duration) {
        if self.stage != Stage::Running || self.phase != OverlayPhase::None {
            return;
        }

        self.time_left = self.time_left.saturating_sub(1);
        self.emit_status();

        if self.time_left == 0 {
            self.time_up(at);
        } else {
            self.timers
                .schedule(at + COUNTDOWN_STEP, TimerKind::Countdown, TimerAction::CountdownTick);
        }
    }

    fn time_up(&mut self, at: Duration) {
        if self.finalizing {
            return;
        }

        self.timers.cancel(TimerKind::Phase);
        self.timers.cancel(TimerKind::Countdown);
        self.timers.cancel(TimerKind::Finalize);
        info!(round = self.round_index + 1, typed = self.buffer.typed_len(), "time up");

        self.set_phase(OverlayPhase::TimeUp);
        self.timers.schedule(
            at + self.config.time_up_delay,
            TimerKind::Finalize,
            TimerAction::Finalize,
        );
    }

    /// Route a keystroke according to the current phase
    pub fn on_key(&mut self, key: Keystroke) {
        if self.phase == OverlayPhase::RoundResult {
            if key == Keystroke::Char(' ') {
                self.advance_to_next_round();
            }
            return;
        }

        if self.typing_blocked() {
            return;
        }

        if self.buffer.apply(key) && self.buffer.is_complete() {
            self.finalize_round();
        }
    }

    pub fn typing_blocked(&self) -> bool {
        self.buffer.is_complete() || self.stage == Stage::Summary || self.phase.blocks_typing()
    }

    /// Score the current round and show its result.
    ///
    /// Returns false when the round is already being finalized.
    pub fn finalize_round(&mut self) -> bool {
        if self.finalizing || self.stage != Stage::Running {
            return false;
        }
        self.finalizing = true;
        self.timers.cancel_all();

        let (result, progress) = build_round_result(
            RoundInput {
                entries: self.buffer.entries(),
                passage_len: self.buffer.passage_len(),
                round_secs: self.config.round_secs,
                time_left: self.time_left,
                round_index: self.round_index,
            },
            &self.progress,
        );

        if self.round_index < self.results.len() {
            self.results[self.round_index] = result;
        } else {
            self.results.push(result);
        }
        self.progress = progress;
        self.last_result = Some(result);

        info!(
            round = self.round_index + 1,
            wpm = ?result.wpm,
            accuracy = ?result.accuracy,
            "round finalized"
        );
        self.set_phase(OverlayPhase::RoundResult);
        self.events.push(SessionEvent::RoundFinalized {
            round: self.round_index,
            result,
        });
        true
    }

    /// Dismiss the result overlay: next round, or the summary after the last
    pub fn advance_to_next_round(&mut self) {
        if self.phase != OverlayPhase::RoundResult {
            return;
        }

        if self.is_final_round() {
            self.timers.cancel_all();
            self.stage = Stage::Summary;
            self.set_phase(OverlayPhase::None);
            info!(
                average_accuracy = self.average_accuracy(),
                "session completed"
            );
            self.events.push(SessionEvent::SessionCompleted);
            self.emit_status();
            return;
        }

        self.round_index += 1;
        self.start_round();
    }

    /// Start over from the first round with an empty history
    pub fn restart(&mut self) {
        info!("session restarted");
        self.round_index = 0;
        self.results.clear();
        self.progress = ProgressSeries::new();
        self.stage = Stage::Running;
        self.start_round();
    }

    /// Ask to leave the summary for the results lobby
    pub fn wait_for_results(&mut self) -> bool {
        if self.stage != Stage::Summary {
            return false;
        }
        self.events.push(SessionEvent::WaitForResults);
        true
    }

    /// Cancel all pending work, e.g. when the screen is left
    pub fn teardown(&mut self) {
        self.timers.cancel_all();
    }

    fn set_phase(&mut self, phase: OverlayPhase) {
        if self.phase != phase {
            debug!(round = self.round_index + 1, %phase, "overlay phase");
        }
        self.phase = phase;
        self.events.push(SessionEvent::PhaseChanged {
            round: self.round_index,
            phase,
        });
    }

    fn emit_status(&mut self) {
        let pills = self.status_pills();
        self.events.push(SessionEvent::StatusChanged(pills));
    }

    pub fn status_pills(&self) -> StatusPills {
        match self.stage {
            Stage::Summary => StatusPills::new("RESULTS", "--:--"),
            Stage::Running => StatusPills::new(
                format!("ROUND {} OF {}", self.round_index + 1, self.passages.len()),
                format_time(self.time_left as i64),
            ),
        }
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain()
    }

    pub fn round_index(&self) -> usize {
        self.round_index
    }

    pub fn round_count(&self) -> usize {
        self.passages.len()
    }

    pub fn is_final_round(&self) -> bool {
        self.round_index + 1 == self.passages.len()
    }

    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn buffer(&self) -> &TypingBuffer {
        &self.buffer
    }

    pub fn results(&self) -> &[RoundResult] {
        &self.results
    }

    pub fn progress(&self) -> &ProgressSeries {
        &self.progress
    }

    pub fn last_result(&self) -> Option<&RoundResult> {
        self.last_result.as_ref()
    }

    pub fn average_accuracy(&self) -> u32 {
        average_accuracy(&self.results)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}
