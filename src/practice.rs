use tracing::info;

use crate::events::{EventQueue, SessionEvent, StatusPills};
use crate::typing::{Keystroke, TypingBuffer};

/// Untimed single-passage warm-up
#[derive(Debug)]
pub struct PracticeRoom {
    buffer: TypingBuffer,
    events: EventQueue,
}

impl PracticeRoom {
    pub fn new(passage: &str) -> Self {
        let mut room = Self {
            buffer: TypingBuffer::new(passage),
            events: EventQueue::default(),
        };
        room.events
            .push(SessionEvent::StatusChanged(room.status_pills()));
        room
    }

    pub fn status_pills(&self) -> StatusPills {
        StatusPills::new("PRACTICE", "--:--")
    }

    pub fn on_key(&mut self, key: Keystroke) {
        if self.buffer.is_complete() {
            return;
        }
        self.buffer.apply(key);
        if self.buffer.is_complete() {
            info!(
                correct = self.buffer.correct_count(),
                total = self.buffer.passage_len(),
                "practice passage complete"
            );
        }
    }

    pub fn is_complete(&self) -> bool {
        self.buffer.is_complete()
    }

    /// Practice the same passage again
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Move on to the lobby; only offered once the passage is done
    pub fn proceed(&mut self) -> bool {
        if !self.buffer.is_complete() {
            return false;
        }
        self.events.push(SessionEvent::Proceed);
        true
    }

    pub fn buffer(&self) -> &TypingBuffer {
        &self.buffer
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain()
    }
}
