//! Cooperative timer queue on a virtual millisecond clock.
//!
//! Timers carry a [`Task`] instead of a callback; the app pops due tasks
//! one at a time and runs them to completion, so a component always sees
//! the state its previous callback left behind.

use crate::dom::ElementId;

pub type Millis = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    CarouselTick,
    TestimonialTick,
    TypewriterStep,
    ScrollEffects,
    Reveal(ElementId),
    Navigate(String),
}

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    due: Millis,
    period: Option<Millis>,
    task: Task,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: Millis,
    next_id: u64,
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    fn push(&mut self, delay: Millis, period: Option<Millis>, task: Task) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        log::trace!("Arming {:?} for {:?} in {}ms", id, task, delay);
        self.timers.push(Timer {
            id,
            due: self.now.saturating_add(delay),
            period,
            task,
        });
        id
    }

    pub fn set_timeout(&mut self, delay: Millis, task: Task) -> TimerId {
        self.push(delay, None, task)
    }

    /// Recurring timer; a zero period is clamped to 1ms.
    pub fn set_interval(&mut self, period: Millis, task: Task) -> TimerId {
        let period = period.max(1);
        self.push(period, Some(period), task)
    }

    pub fn clear(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        before != self.timers.len()
    }

    pub fn clear_all(&mut self) {
        self.timers.clear();
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.timers.iter().map(|t| t.due).min()
    }

    /// Pops the earliest timer due at or before `until`, moving the clock to
    /// its deadline. Ties fire in arming order. Intervals are re-armed.
    pub fn pop_due(&mut self, until: Millis) -> Option<(TimerId, Task)> {
        let pos = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.id))
            .map(|(i, _)| i)?;

        let timer = &mut self.timers[pos];
        self.now = self.now.max(timer.due);
        let fired = (timer.id, timer.task.clone());

        // an interval whose next deadline is past the end of the clock is done
        match timer.period.and_then(|p| timer.due.checked_add(p)) {
            Some(next) => timer.due = next,
            None => {
                self.timers.swap_remove(pos);
            }
        }
        Some(fired)
    }

    /// Moves the clock forward once every due timer has been popped.
    pub fn settle(&mut self, until: Millis) {
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(s: &mut Scheduler, until: Millis) -> Vec<(Millis, Task)> {
        let mut fired = Vec::new();
        while let Some((_, task)) = s.pop_due(until) {
            fired.push((s.now(), task));
        }
        s.settle(until);
        fired
    }

    #[test]
    fn test_timeouts_fire_once_in_order() {
        let mut s = Scheduler::new();
        s.set_timeout(200, Task::ScrollEffects);
        s.set_timeout(100, Task::TypewriterStep);

        assert_eq!(
            drain(&mut s, 1000),
            vec![(100, Task::TypewriterStep), (200, Task::ScrollEffects)]
        );
        assert_eq!(s.pending(), 0);
        assert_eq!(s.now(), 1000);
    }

    #[test]
    fn test_interval_rearms() {
        let mut s = Scheduler::new();
        let id = s.set_interval(5000, Task::CarouselTick);

        assert_eq!(drain(&mut s, 4999), vec![]);
        assert_eq!(drain(&mut s, 15000).len(), 3);
        assert!(s.is_pending(id));
        assert_eq!(s.next_due(), Some(20000));
    }

    #[test]
    fn test_cleared_timer_never_fires() {
        let mut s = Scheduler::new();
        let id = s.set_interval(10, Task::CarouselTick);
        assert!(s.clear(id));
        assert!(!s.clear(id));
        assert_eq!(drain(&mut s, 100), vec![]);
    }

    #[test]
    fn test_ties_fire_in_arming_order() {
        let mut s = Scheduler::new();
        s.set_timeout(100, Task::Reveal(ElementId::new("a")));
        s.set_timeout(100, Task::Reveal(ElementId::new("b")));
        let fired: Vec<Task> = drain(&mut s, 100).into_iter().map(|(_, t)| t).collect();
        assert_eq!(
            fired,
            vec![
                Task::Reveal(ElementId::new("a")),
                Task::Reveal(ElementId::new("b"))
            ]
        );
    }

    #[test]
    fn test_deadlines_saturate_at_end_of_clock() {
        let mut timers = Scheduler::new();
        timers.settle(10);
        timers.set_timeout(u64::MAX, Task::TypewriterStep);
        let id = timers.set_interval(u64::MAX, Task::CarouselTick);
        assert_eq!(timers.next_due(), Some(u64::MAX));

        assert_eq!(timers.pop_due(u64::MAX).map(|(_, t)| t), Some(Task::TypewriterStep));
        assert_eq!(timers.pop_due(u64::MAX), Some((id, Task::CarouselTick)));
        // no deadline left to re-arm at
        assert_eq!(timers.pop_due(u64::MAX), None);
        assert!(!timers.is_pending(id));
    }
}
