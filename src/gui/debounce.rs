use crate::timer::{Millis, Scheduler, Task, TimerId};

/// Trailing-edge debounce: a burst of triggers inside the window collapses
/// into one task fired `wait` after the last trigger.
#[derive(Debug)]
pub struct Debouncer {
    wait: Millis,
    pending: Option<TimerId>,
}

impl Debouncer {
    pub fn new(wait: Millis) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    pub fn trigger(&mut self, timers: &mut Scheduler, task: Task) {
        if let Some(id) = self.pending.take() {
            timers.clear(id);
        }
        self.pending = Some(timers.set_timeout(self.wait, task));
    }

    /// Called when the debounced task runs.
    pub fn fired(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn set_wait(&mut self, wait: Millis) {
        self.wait = wait;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_collapses_to_one_trailing_call() {
        let mut timers = Scheduler::new();
        let mut debounce = Debouncer::new(10);

        for t in [0, 4, 8] {
            timers.settle(t);
            debounce.trigger(&mut timers, Task::ScrollEffects);
        }

        assert_eq!(timers.pending(), 1);
        assert!(timers.pop_due(17).is_none());

        let (_, task) = timers.pop_due(18).unwrap();
        debounce.fired();
        assert_eq!(task, Task::ScrollEffects);
        assert_eq!(timers.now(), 18);
        assert!(!debounce.is_pending());
    }

    #[test]
    fn test_spaced_triggers_fire_separately() {
        let mut timers = Scheduler::new();
        let mut debounce = Debouncer::new(10);

        debounce.trigger(&mut timers, Task::ScrollEffects);
        assert!(timers.pop_due(10).is_some());
        debounce.fired();

        timers.settle(50);
        debounce.trigger(&mut timers, Task::ScrollEffects);
        assert!(timers.pop_due(60).is_some());
    }
}
