//! Viewport-driven one-shot effects: staggered reveal and lazy images.

use crate::config::RevealConfig;
use crate::dom::{Document, ElementId, Observer, ObserverOptions, Selector};
use crate::gui::{LAZY_IMAGE, REVEAL_TARGETS, VISIBLE};
use crate::timer::{Millis, Scheduler, Task};

#[derive(Debug)]
pub struct Reveal {
    observer: Observer,
    stagger: Millis,
}

impl Reveal {
    /// Without intersection observation every target is shown immediately
    /// and nothing is mounted.
    pub fn mount(page: &mut Document, config: &RevealConfig) -> Option<Self> {
        let targets = page.query_all(&Selector::parse(REVEAL_TARGETS));
        if targets.is_empty() {
            return None;
        }

        if !page.supports_intersection_observer() {
            for target in &targets {
                page.add_class(target, VISIBLE);
            }
            return None;
        }

        let mut observer = Observer::new(ObserverOptions {
            threshold: config.threshold,
            bottom_margin: config.bottom_margin,
        });
        for target in targets {
            observer.observe(target);
        }

        Some(Self {
            observer,
            stagger: config.stagger_ms,
        })
    }

    pub fn is_observing(&self, id: &ElementId) -> bool {
        self.observer.is_observing(id)
    }

    pub fn set_stagger(&mut self, stagger: Millis) {
        self.stagger = stagger;
    }

    /// Schedules the marker for every target that just came into view and
    /// stops watching it.
    pub fn poll(&mut self, page: &Document, timers: &mut Scheduler) {
        for entry in self.observer.poll(page) {
            if !entry.intersecting {
                continue;
            }
            self.observer.unobserve(&entry.id);
            let delay = entry.batch_index as Millis * self.stagger;
            log::trace!("Revealing {} in {}ms", entry.id, delay);
            timers.set_timeout(delay, Task::Reveal(entry.id));
        }
    }

    pub fn show(page: &mut Document, id: &ElementId) {
        page.add_class(id, VISIBLE);
    }
}

#[derive(Debug)]
pub struct LazyImages {
    observer: Observer,
}

impl LazyImages {
    /// Not mounted without intersection observation; images then keep their
    /// default source.
    pub fn mount(page: &Document) -> Option<Self> {
        if !page.supports_intersection_observer() {
            log::debug!("No intersection observation, images load eagerly");
            return None;
        }
        let images = page.query_all(&Selector::parse(LAZY_IMAGE));
        if images.is_empty() {
            return None;
        }

        let mut observer = Observer::new(ObserverOptions {
            threshold: 0.0,
            bottom_margin: 0.0,
        });
        for image in images {
            observer.observe(image);
        }
        Some(Self { observer })
    }

    pub fn is_observing(&self, id: &ElementId) -> bool {
        self.observer.is_observing(id)
    }

    pub fn poll(&mut self, page: &mut Document) {
        for entry in self.observer.poll(page) {
            if !entry.intersecting {
                continue;
            }
            self.observer.unobserve(&entry.id);

            if let Some(src) = page.attr(&entry.id, "data-src").map(str::to_owned) {
                page.set_attr(&entry.id, "src", &src);
                page.remove_attr(&entry.id, "data-src");
                log::trace!("Loaded {} into {}", src, entry.id);
            }
        }
    }
}
