pub mod model;
pub mod swipe;

pub use model::{MenuTransition, NavMenu};
pub use swipe::SwipeTracker;

pub const ARIA_EXPANDED: &str = "aria-expanded";
pub const ARIA_HIDDEN: &str = "aria-hidden";
pub const ARIA_CONTROLS: &str = "aria-controls";

/// Link targets that never navigate.
pub fn is_inert_href(href: &str) -> bool {
    let href = href.trim();
    href.is_empty() || href == "#" || href.to_ascii_lowercase().starts_with("javascript:")
}
