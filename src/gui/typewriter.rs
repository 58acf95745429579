use crate::config::TypewriterConfig;
use crate::dom::{Document, ElementId, Selector};
use crate::gui::TYPEWRITER;
use crate::timer::{Millis, Scheduler, Task};

/// Which delay follows a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    Type,
    Delete,
    EndPause,
    BetweenPause,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypewriterState {
    phrases: Vec<Vec<char>>,
    phrase: usize,
    chars: usize,
    deleting: bool,
}

impl TypewriterState {
    /// Empty phrases are skipped; `None` when nothing is left to type.
    pub fn new<S: AsRef<str>>(phrases: &[S]) -> Option<Self> {
        let phrases: Vec<Vec<char>> = phrases
            .iter()
            .map(|p| p.as_ref().chars().collect::<Vec<_>>())
            .filter(|p| !p.is_empty())
            .collect();

        (!phrases.is_empty()).then_some(Self {
            phrases,
            phrase: 0,
            chars: 0,
            deleting: false,
        })
    }

    pub fn text(&self) -> String {
        self.phrases[self.phrase][..self.chars].iter().collect()
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase
    }

    pub fn step(&mut self) -> Pace {
        let len = self.phrases[self.phrase].len();

        if self.deleting {
            self.chars -= 1;
            if self.chars == 0 {
                self.deleting = false;
                self.phrase = (self.phrase + 1) % self.phrases.len();
                return Pace::BetweenPause;
            }
            Pace::Delete
        } else {
            self.chars += 1;
            if self.chars == len {
                self.deleting = true;
                return Pace::EndPause;
            }
            Pace::Type
        }
    }
}

#[derive(Debug)]
pub struct Typewriter {
    target: ElementId,
    state: TypewriterState,
    config: TypewriterConfig,
    started: bool,
}

impl Typewriter {
    pub fn mount(page: &mut Document, config: TypewriterConfig) -> Option<Self> {
        let target = page.query(&Selector::parse(TYPEWRITER))?;
        let state = TypewriterState::new(config.phrases.as_slice())?;
        page.set_text(&target, "");

        Some(Self {
            target,
            state,
            config,
            started: false,
        })
    }

    pub fn state(&self) -> &TypewriterState {
        &self.state
    }

    /// Never zero: the step re-arms itself and must move the clock.
    fn delay(&self, pace: Pace) -> Millis {
        let ms = match pace {
            Pace::Type => self.config.type_ms,
            Pace::Delete => self.config.delete_ms,
            Pace::EndPause => self.config.end_pause_ms,
            Pace::BetweenPause => self.config.between_pause_ms,
        };
        ms.max(1)
    }

    /// Arms the first tick after the startup delay. Later calls are ignored.
    pub fn start(&mut self, timers: &mut Scheduler) {
        if self.started {
            return;
        }
        self.started = true;
        timers.set_timeout(self.config.start_delay_ms, Task::TypewriterStep);
    }

    pub fn step(&mut self, page: &mut Document, timers: &mut Scheduler) {
        let pace = self.state.step();
        page.set_text(&self.target, &self.state.text());
        timers.set_timeout(self.delay(pace), Task::TypewriterStep);
    }

    /// New timings apply from the next tick. A changed phrase list restarts
    /// the cycle from an empty line.
    pub fn set_config(&mut self, page: &mut Document, config: TypewriterConfig) {
        if config.phrases != self.config.phrases
            && let Some(state) = TypewriterState::new(config.phrases.as_slice())
        {
            self.state = state;
            page.set_text(&self.target, "");
        }
        self.config = config;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementSpec;
    use crate::test_helpers::{id, page_from};

    #[test]
    fn test_empty_phrase_list() {
        assert!(TypewriterState::new::<&str>(&[]).is_none());
        assert!(TypewriterState::new(&["", ""]).is_none());
    }

    #[test]
    fn test_state_machine_cycle() {
        let mut state = TypewriterState::new(&["ab", "c"]).unwrap();
        assert_eq!(state.text(), "");

        let mut trace = Vec::new();
        for _ in 0..7 {
            let pace = state.step();
            trace.push((state.text(), pace));
        }

        assert_eq!(
            trace,
            vec![
                ("a".to_string(), Pace::Type),
                ("ab".to_string(), Pace::EndPause),
                ("a".to_string(), Pace::Delete),
                ("".to_string(), Pace::BetweenPause),
                ("c".to_string(), Pace::EndPause),
                ("".to_string(), Pace::BetweenPause),
                ("a".to_string(), Pace::Type),
            ]
        );
    }

    #[test]
    fn test_multibyte_phrases() {
        let mut state = TypewriterState::new(&["é😀"]).unwrap();
        state.step();
        assert_eq!(state.text(), "é");
        state.step();
        assert_eq!(state.text(), "é😀");
    }

    #[test]
    fn test_timed_scenario() {
        let mut page = page_from(vec![ElementSpec::new("typewriter", "span")]);
        let mut timers = Scheduler::new();
        let config = TypewriterConfig {
            phrases: vec!["ab".to_string(), "c".to_string()],
            type_ms: 100,
            delete_ms: 50,
            end_pause_ms: 2500,
            between_pause_ms: 500,
            start_delay_ms: 1000,
        };
        let mut typewriter = Typewriter::mount(&mut page, config).unwrap();
        typewriter.start(&mut timers);
        typewriter.start(&mut timers);
        assert_eq!(timers.pending(), 1);

        let mut seen = Vec::new();
        while let Some((_, Task::TypewriterStep)) = timers.pop_due(5000) {
            typewriter.step(&mut page, &mut timers);
            seen.push((timers.now(), page.text(&id("typewriter")).unwrap().to_string()));
        }

        assert_eq!(
            seen,
            vec![
                (1000, "a".to_string()),
                (1100, "ab".to_string()),
                (3600, "a".to_string()),
                (3650, "".to_string()),
                (4150, "c".to_string()),
            ]
        );
        assert_eq!(timers.next_due(), Some(6650));
    }

    #[test]
    fn test_zero_timings_still_advance_the_clock() {
        let mut page = page_from(vec![ElementSpec::new("typewriter", "span")]);
        let mut timers = Scheduler::new();
        let config = TypewriterConfig {
            phrases: vec!["ab".to_string()],
            type_ms: 0,
            delete_ms: 0,
            end_pause_ms: 0,
            between_pause_ms: 0,
            start_delay_ms: 0,
        };
        let mut typewriter = Typewriter::mount(&mut page, config).unwrap();
        typewriter.start(&mut timers);

        let mut steps = 0;
        while let Some((_, Task::TypewriterStep)) = timers.pop_due(10) {
            typewriter.step(&mut page, &mut timers);
            steps += 1;
        }
        assert_eq!(steps, 11);
        assert_eq!(timers.next_due(), Some(11));
    }
}
