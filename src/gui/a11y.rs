//! Keyboard accessibility helpers.

use crate::dom::{Document, ElementId, Selector};
use crate::events::Key;
use crate::gui::{FOCUSABLE, wrap_index};

/// Keys that activate a button-like control.
pub fn is_activation_key(key: &Key) -> bool {
    matches!(key, Key::Enter | Key::Space)
}

/// Lets a non-button element take focus and act as a button.
pub fn make_activatable(page: &mut Document, id: &ElementId) {
    if page.attr(id, "role").is_none() {
        page.set_attr(id, "role", "button");
    }
    if page.attr(id, "tabindex").is_none() {
        page.set_attr(id, "tabindex", "0");
    }
}

/// Keeps keyboard focus cycling inside a container.
#[derive(Debug, Clone)]
pub struct FocusTrap {
    container: ElementId,
}

impl FocusTrap {
    pub fn new(container: ElementId) -> Self {
        Self { container }
    }

    fn focusables(&self, page: &Document) -> Vec<ElementId> {
        page.query_within(&self.container, &Selector::parse(FOCUSABLE))
    }

    /// Focuses the first focusable descendant, if any.
    pub fn enter(&self, page: &mut Document) {
        if let Some(first) = self.focusables(page).into_iter().next() {
            page.focus(&first);
        }
    }

    /// Moves focus one step (backwards with `reverse`), wrapping at both
    /// ends. Focus outside the container re-enters at the near end.
    pub fn cycle(&self, page: &mut Document, reverse: bool) {
        let items = self.focusables(page);
        if items.is_empty() {
            return;
        }

        let step = if reverse { -1 } else { 1 };
        let next = match page
            .focused()
            .and_then(|f| items.iter().position(|i| i == f))
        {
            Some(pos) => wrap_index(pos as i64 + step, items.len()),
            None if reverse => items.len() - 1,
            None => 0,
        };
        page.focus(&items[next]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementSpec;
    use crate::test_helpers::{id, page_from};

    fn page() -> Document {
        page_from(vec![
            ElementSpec::new("body", "body"),
            ElementSpec::new("outside", "a").parent("body"),
            ElementSpec::new("dialog", "div").parent("body"),
            ElementSpec::new("close", "button").parent("dialog"),
            ElementSpec::new("text", "p").parent("dialog"),
            ElementSpec::new("more", "a").parent("dialog"),
        ])
    }

    #[test]
    fn test_activation_keys() {
        assert!(is_activation_key(&Key::Enter));
        assert!(is_activation_key(&Key::Space));
        assert!(!is_activation_key(&Key::Escape));
        assert!(!is_activation_key(&Key::Other("a".to_string())));
    }

    #[test]
    fn test_make_activatable_keeps_existing_values() {
        let mut page = page();
        page.set_attr(&id("text"), "tabindex", "-1");
        make_activatable(&mut page, &id("text"));
        assert_eq!(page.attr(&id("text"), "role"), Some("button"));
        assert_eq!(page.attr(&id("text"), "tabindex"), Some("-1"));
    }

    #[test]
    fn test_cycle_wraps_both_ways() {
        let mut page = page();
        let trap = FocusTrap::new(id("dialog"));

        trap.enter(&mut page);
        assert_eq!(page.focused(), Some(&id("close")));

        trap.cycle(&mut page, false);
        assert_eq!(page.focused(), Some(&id("more")));
        trap.cycle(&mut page, false);
        assert_eq!(page.focused(), Some(&id("close")));
        trap.cycle(&mut page, true);
        assert_eq!(page.focused(), Some(&id("more")));
    }

    #[test]
    fn test_cycle_pulls_focus_back_inside() {
        let mut page = page();
        let trap = FocusTrap::new(id("dialog"));
        page.focus(&id("outside"));
        trap.cycle(&mut page, true);
        assert_eq!(page.focused(), Some(&id("more")));
    }
}
