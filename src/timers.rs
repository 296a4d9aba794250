use std::time::Duration;

/// Grouping used to cancel related timers together
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Phase,
    Countdown,
    Finalize,
    Delay,
}

#[derive(Clone, Debug, PartialEq)]
struct ScheduledTask<A> {
    due: Duration,
    kind: TimerKind,
    generation: u64,
    seq: u64,
    action: A,
}

/// A task that came due
#[derive(Clone, Debug, PartialEq)]
pub struct Fired<A> {
    pub due: Duration,
    pub kind: TimerKind,
    pub generation: u64,
    pub action: A,
}

/// Owned set of cancellable delayed actions.
///
/// Every task records the generation it was scheduled under. `cancel_all`
/// drops the pending tasks and bumps the generation, so a caller holding a
/// fired task can tell whether it still belongs to the current generation.
#[derive(Debug)]
pub struct TimerSet<A> {
    tasks: Vec<ScheduledTask<A>>,
    generation: u64,
    next_seq: u64,
}

impl<A> Default for TimerSet<A> {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            generation: 0,
            next_seq: 0,
        }
    }
}

impl<A> TimerSet<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn schedule(&mut self, due: Duration, kind: TimerKind, action: A) {
        self.tasks.push(ScheduledTask {
            due,
            kind,
            generation: self.generation,
            seq: self.next_seq,
            action,
        });
        self.next_seq += 1;
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.tasks.retain(|t| t.kind != kind);
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
        self.generation += 1;
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.tasks.iter().any(|t| t.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Earliest pending task due at or before `now`, removed from the set.
    /// Ties fire in scheduling order.
    pub fn pop_due(&mut self, now: Duration) -> Option<Fired<A>> {
        let idx = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= now)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(i, _)| i)?;

        let task = self.tasks.remove(idx);
        Some(Fired {
            due: task.due,
            kind: task.kind,
            generation: task.generation,
            action: task.action,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn fires_in_due_order() {
        let mut timers = TimerSet::new();
        timers.schedule(ms(300), TimerKind::Phase, "c");
        timers.schedule(ms(100), TimerKind::Phase, "a");
        timers.schedule(ms(200), TimerKind::Countdown, "b");

        assert!(timers.pop_due(ms(50)).is_none());

        let fired: Vec<_> = std::iter::from_fn(|| timers.pop_due(ms(250)))
            .map(|f| f.action)
            .collect();
        assert_eq!(fired, vec!["a", "b"]);
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn same_due_keeps_schedule_order() {
        let mut timers = TimerSet::new();
        timers.schedule(ms(100), TimerKind::Phase, 1);
        timers.schedule(ms(100), TimerKind::Phase, 2);

        assert_eq!(timers.pop_due(ms(100)).map(|f| f.action), Some(1));
        assert_eq!(timers.pop_due(ms(100)).map(|f| f.action), Some(2));
    }

    #[test]
    fn cancel_by_kind() {
        let mut timers = TimerSet::new();
        timers.schedule(ms(100), TimerKind::Phase, 1);
        timers.schedule(ms(100), TimerKind::Countdown, 2);

        timers.cancel(TimerKind::Phase);
        assert!(!timers.is_pending(TimerKind::Phase));
        assert!(timers.is_pending(TimerKind::Countdown));
        assert_eq!(timers.generation(), 0);
    }

    #[test]
    fn cancel_all_bumps_generation() {
        let mut timers = TimerSet::new();
        timers.schedule(ms(100), TimerKind::Phase, 1);
        let before = timers.generation();

        timers.cancel_all();
        assert!(timers.is_empty());
        assert_eq!(timers.generation(), before + 1);

        timers.schedule(ms(100), TimerKind::Phase, 2);
        let fired = timers.pop_due(ms(100)).unwrap();
        assert_eq!(fired.generation, before + 1);
    }
}
