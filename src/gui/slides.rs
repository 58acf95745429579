//! Cyclic slide display shared by the hero carousel and the testimonial
//! slider.

use crate::dom::{Document, ElementId, Selector};
use crate::gui::{ACTIVE, CAROUSEL, CAROUSEL_NEXT, CAROUSEL_PREV, CAROUSEL_SLIDE, TESTIMONIAL};
use crate::gui::wrap_index;
use crate::timer::{Millis, Scheduler, Task, TimerId};

#[derive(Debug, Clone)]
pub struct SlideSet {
    panels: Vec<ElementId>,
    index: usize,
}

impl SlideSet {
    /// `None` when there is nothing to cycle through.
    pub fn new(panels: Vec<ElementId>) -> Option<Self> {
        (!panels.is_empty()).then_some(Self { panels, index: 0 })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn current(&self) -> &ElementId {
        &self.panels[self.index]
    }

    pub fn advance_to(&mut self, page: &mut Document, raw: i64) {
        for panel in &self.panels {
            page.remove_class(panel, ACTIVE);
        }
        self.index = wrap_index(raw, self.panels.len());
        page.add_class(&self.panels[self.index], ACTIVE);
    }

    pub fn step(&mut self, page: &mut Document, direction: i64) {
        self.advance_to(page, self.index as i64 + direction);
    }
}

/// A slide set with autoplay. The carousel variant pauses while the pointer
/// is over its container.
#[derive(Debug)]
pub struct SlideShow {
    slides: SlideSet,
    container: Option<ElementId>,
    interval: Millis,
    tick: Task,
    timer: Option<TimerId>,
}

impl SlideShow {
    pub fn mount_carousel(page: &mut Document, interval: Millis) -> Option<Self> {
        let container = page.query(&Selector::parse(CAROUSEL))?;
        let panels = page.query_within(&container, &Selector::parse(CAROUSEL_SLIDE));
        Self::mount(page, panels, Some(container), interval, Task::CarouselTick)
    }

    pub fn mount_testimonials(page: &mut Document, interval: Millis) -> Option<Self> {
        let panels = page.query_all(&Selector::parse(TESTIMONIAL));
        Self::mount(page, panels, None, interval, Task::TestimonialTick)
    }

    fn mount(
        page: &mut Document,
        panels: Vec<ElementId>,
        container: Option<ElementId>,
        interval: Millis,
        tick: Task,
    ) -> Option<Self> {
        let mut slides = SlideSet::new(panels)?;
        slides.advance_to(page, 0);
        log::debug!("Mounted {:?} slide show with {} panels", tick, slides.len());

        Some(Self {
            slides,
            container,
            interval,
            tick,
            timer: None,
        })
    }

    pub fn slides(&self) -> &SlideSet {
        &self.slides
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Arms autoplay; an already running timer is cancelled first so only
    /// one ever exists.
    pub fn start(&mut self, timers: &mut Scheduler) {
        self.stop(timers);
        self.timer = Some(timers.set_interval(self.interval, self.tick.clone()));
    }

    pub fn stop(&mut self, timers: &mut Scheduler) {
        if let Some(id) = self.timer.take() {
            timers.clear(id);
        }
    }

    pub fn tick(&mut self, page: &mut Document) {
        self.slides.step(page, 1);
        log::trace!("{:?} -> panel {}", self.tick, self.slides.index());
    }

    /// Manual navigation. A running autoplay restarts so the new panel gets
    /// a full interval.
    pub fn move_by(&mut self, page: &mut Document, timers: &mut Scheduler, direction: i64) {
        self.slides.step(page, direction);
        if self.is_running() {
            self.start(timers);
        }
    }

    pub fn set_interval(&mut self, timers: &mut Scheduler, interval: Millis) {
        self.interval = interval;
        if self.is_running() {
            self.start(timers);
        }
    }

    pub fn on_pointer_enter(&mut self, timers: &mut Scheduler, target: &ElementId) {
        if self.container.as_ref() == Some(target) {
            self.stop(timers);
        }
    }

    /// Resuming waits a full interval before the next advance.
    pub fn on_pointer_leave(&mut self, timers: &mut Scheduler, target: &ElementId) {
        if self.container.as_ref() == Some(target) {
            self.start(timers);
        }
    }

    /// Prev/next controls inside the container.
    pub fn on_click(&mut self, page: &mut Document, timers: &mut Scheduler, target: &ElementId) -> bool {
        let Some(container) = self.container.clone() else {
            return false;
        };
        if !page.contains(&container, target) {
            return false;
        }

        if page.closest(target, &Selector::parse(CAROUSEL_PREV)).is_some() {
            self.move_by(page, timers, -1);
            true
        } else if page.closest(target, &Selector::parse(CAROUSEL_NEXT)).is_some() {
            self.move_by(page, timers, 1);
            true
        } else {
            false
        }
    }
}
