//! Intersection observation over the page document.
//!
//! Mirrors the browser observer contract: the first poll after `observe`
//! reports every target, later polls report only targets whose
//! intersecting state changed. Entries carry their position in the batch.

use crate::dom::{Document, ElementId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Minimum visible fraction; `0.0` means any overlap.
    pub threshold: f64,
    /// Shrinks the trigger zone from the viewport bottom.
    pub bottom_margin: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: ElementId,
    pub batch_index: usize,
    pub intersecting: bool,
    pub ratio: f64,
}

#[derive(Debug, Clone)]
struct Watch {
    id: ElementId,
    last: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct Observer {
    options: ObserverOptions,
    targets: Vec<Watch>,
}

impl Observer {
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            targets: Vec::new(),
        }
    }

    pub fn observe(&mut self, id: ElementId) {
        if !self.is_observing(&id) {
            self.targets.push(Watch { id, last: None });
        }
    }

    pub fn unobserve(&mut self, id: &ElementId) {
        self.targets.retain(|w| &w.id != id);
    }

    pub fn is_observing(&self, id: &ElementId) -> bool {
        self.targets.iter().any(|w| &w.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    fn is_intersecting(&self, ratio: f64) -> bool {
        if self.options.threshold <= 0.0 {
            ratio > 0.0
        } else {
            ratio >= self.options.threshold
        }
    }

    pub fn poll(&mut self, page: &Document) -> Vec<Entry> {
        let mut entries = Vec::new();

        for i in 0..self.targets.len() {
            let ratio = page
                .intersection_ratio(&self.targets[i].id, self.options.bottom_margin)
                .unwrap_or(0.0);
            let intersecting = self.is_intersecting(ratio);

            let watch = &mut self.targets[i];
            if watch.last == Some(intersecting) {
                continue;
            }
            watch.last = Some(intersecting);

            entries.push(Entry {
                id: watch.id.clone(),
                batch_index: entries.len(),
                intersecting,
                ratio,
            });
        }

        entries
    }
}
