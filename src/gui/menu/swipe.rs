use crate::config::SwipeDirection;

/// Horizontal swipe detection from touch-start to touch-move.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwipeTracker {
    start_x: Option<f64>,
}

impl SwipeTracker {
    pub fn begin(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    pub fn reset(&mut self) {
        self.start_x = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.start_x.is_some()
    }

    /// True once the displacement passes `threshold` in `direction`; tracking
    /// then stops until the next `begin`.
    pub fn update(&mut self, x: f64, threshold: f64, direction: SwipeDirection) -> bool {
        let Some(start) = self.start_x else {
            return false;
        };
        if direction.closes(x - start, threshold) {
            self.start_x = None;
            return true;
        }
        false
    }
}
