use crate::dom::{Document, ElementId, Selector};
use crate::gui::{ACTIVE, FAQ_ITEM};

/// Accordion toggle: every sibling item closes first, then the clicked one
/// flips. Clicking the open item therefore leaves all of them closed.
pub fn toggle(page: &mut Document, item: &ElementId) {
    if !page.exists(item) {
        return;
    }
    let was_open = page.has_class(item, ACTIVE);
    let selector = Selector::parse(FAQ_ITEM);

    let siblings = match page.parent(item).cloned() {
        Some(parent) => page
            .query_within(&parent, &selector)
            .into_iter()
            .filter(|s| page.parent(s) == Some(&parent))
            .collect(),
        None => page.query_all(&selector),
    };

    for sibling in &siblings {
        page.remove_class(sibling, ACTIVE);
    }
    if !was_open {
        page.add_class(item, ACTIVE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{clinic_page, id};

    fn open_items(page: &Document) -> Vec<ElementId> {
        page.query_all(&Selector::parse(FAQ_ITEM))
            .into_iter()
            .filter(|i| page.has_class(i, ACTIVE))
            .collect()
    }

    #[test]
    fn test_only_one_item_open() {
        let mut page = clinic_page();
        toggle(&mut page, &id("faq-1"));
        toggle(&mut page, &id("faq-3"));
        assert_eq!(open_items(&page), vec![id("faq-3")]);
    }

    #[test]
    fn test_toggling_open_item_closes_it() {
        let mut page = clinic_page();
        toggle(&mut page, &id("faq-2"));
        toggle(&mut page, &id("faq-2"));
        assert!(open_items(&page).is_empty());
    }

    #[test]
    fn test_unknown_item_is_ignored() {
        let mut page = clinic_page();
        toggle(&mut page, &id("faq-1"));
        toggle(&mut page, &id("faq-9"));
        assert_eq!(open_items(&page), vec![id("faq-1")]);
    }
}
