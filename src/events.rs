use crate::scoring::RoundResult;
use crate::sequencer::OverlayPhase;

/// Header status text: mode label and timer label
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusPills {
    pub mode: String,
    pub timer: String,
}

impl StatusPills {
    pub fn new(mode: impl Into<String>, timer: impl Into<String>) -> Self {
        Self {
            mode: mode.into(),
            timer: timer.into(),
        }
    }
}

/// Notifications emitted by the session controllers at transition points
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    StatusChanged(StatusPills),
    PhaseChanged { round: usize, phase: OverlayPhase },
    RoundFinalized { round: usize, result: RoundResult },
    /// The final round's result was dismissed; the summary is showing
    SessionCompleted,
    /// The player asked to wait for the other players' results
    WaitForResults,
    /// Practice finished and the player moves on to the lobby
    Proceed,
    /// Every monitored player finished all rounds
    MonitoringComplete,
}

/// Queue of events waiting to be drained by the owner
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: Vec<SessionEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: SessionEvent) {
        self.pending.push(event);
    }

    pub fn drain(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
