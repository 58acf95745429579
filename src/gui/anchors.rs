use crate::dom::{Document, ElementId, Selector};
use crate::gui::LINK;

/// In-page links (`href="#id"`) scroll their target into view. Links
/// inside `skip` are left to their owner. A missing target means no
/// scrolling.
pub fn on_click(page: &mut Document, target: &ElementId, skip: Option<&ElementId>) -> bool {
    let Some(link) = page.closest(target, &Selector::parse(LINK)) else {
        return false;
    };
    if skip.is_some_and(|s| page.contains(s, &link)) {
        return false;
    }

    let Some(fragment) = page
        .attr(&link, "href")
        .and_then(|h| h.strip_prefix('#'))
        .filter(|f| !f.is_empty())
        .map(ElementId::new)
    else {
        return false;
    };

    page.scroll_into_view(&fragment)
}
