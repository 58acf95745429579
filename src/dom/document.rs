//! In-memory page document.
//!
//! Holds the element tree the interactive components read and write: ids,
//! tags, classes, attributes, inline style, text and a vertical layout box
//! per element, plus the window-level state (viewport, scroll offset, focus,
//! location and session storage).

use crate::dom::{ElementId, PageError, Rect, Selector};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

const DEFAULT_PAGE: &str = include_str!("default_page.toml");

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_true")]
    pub intersection_observer: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 390.0,
            height: 844.0,
            intersection_observer: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ElementSpec {
    pub id: ElementId,
    pub tag: String,
    #[serde(default)]
    pub parent: Option<ElementId>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub rect: Option<Rect>,
}

impl ElementSpec {
    pub fn new(id: &str, tag: &str) -> Self {
        Self {
            id: ElementId::new(id),
            tag: tag.to_ascii_lowercase(),
            parent: None,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            text: String::new(),
            rect: None,
        }
    }

    pub fn parent(mut self, parent: &str) -> Self {
        self.parent = Some(ElementId::new(parent));
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn rect(mut self, top: f64, height: f64) -> Self {
        self.rect = Some(Rect::new(top, height));
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PageManifest {
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
}

#[derive(Debug, Clone)]
struct Element {
    id: ElementId,
    tag: String,
    parent: Option<ElementId>,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: String,
    rect: Option<Rect>,
}

impl Element {
    fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Id(id) => &self.id == id,
            Selector::Class(class) => self.classes.iter().any(|c| c == class),
            Selector::Attr(name) => self.attrs.contains_key(name),
            Selector::Tag(tag) => &self.tag == tag,
            Selector::Any(list) => list.iter().any(|s| self.matches(s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
    index: HashMap<ElementId, usize>,
    viewport: Viewport,
    scroll_y: f64,
    focused: Option<ElementId>,
    location: Option<String>,
    session: HashMap<String, String>,
    scroll_locks: HashSet<ElementId>,
}

impl Document {
    /// Builds a document from a manifest. Elements keep manifest order and a
    /// parent must be declared before its children.
    pub fn new(manifest: PageManifest) -> Result<Self, PageError> {
        let mut index = HashMap::with_capacity(manifest.elements.len());
        let mut elements = Vec::with_capacity(manifest.elements.len());

        for spec in manifest.elements {
            if index.contains_key(&spec.id) {
                return Err(PageError::DuplicateId(spec.id));
            }
            if let Some(parent) = &spec.parent
                && !index.contains_key(parent)
            {
                return Err(PageError::UnknownParent {
                    id: spec.id,
                    parent: parent.clone(),
                });
            }

            index.insert(spec.id.clone(), elements.len());
            elements.push(Element {
                id: spec.id,
                tag: spec.tag.to_ascii_lowercase(),
                parent: spec.parent,
                classes: spec.classes,
                attrs: spec.attrs,
                style: BTreeMap::new(),
                text: spec.text,
                rect: spec.rect,
            });
        }

        Ok(Self {
            elements,
            index,
            viewport: manifest.viewport,
            scroll_y: 0.0,
            focused: None,
            location: None,
            session: HashMap::new(),
            scroll_locks: HashSet::new(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, PageError> {
        let manifest: PageManifest = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize()?;
        Self::new(manifest)
    }

    pub fn default_page() -> Result<Self, PageError> {
        let manifest: PageManifest = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_PAGE,
                config::FileFormat::Toml,
            ))
            .build()?
            .try_deserialize()?;
        Self::new(manifest)
    }

    fn get(&self, id: &ElementId) -> Option<&Element> {
        self.index.get(id).map(|&i| &self.elements[i])
    }

    fn get_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        let i = *self.index.get(id)?;
        self.elements.get_mut(i)
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub fn exists(&self, id: &ElementId) -> bool {
        self.index.contains_key(id)
    }

    pub fn query(&self, selector: &Selector) -> Option<ElementId> {
        self.elements
            .iter()
            .find(|e| e.matches(selector))
            .map(|e| e.id.clone())
    }

    pub fn query_all(&self, selector: &Selector) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|e| e.matches(selector))
            .map(|e| e.id.clone())
            .collect()
    }

    /// Descendants of `root` (excluding `root`) matching `selector`, in
    /// document order.
    pub fn query_within(&self, root: &ElementId, selector: &Selector) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|e| &e.id != root && e.matches(selector) && self.contains(root, &e.id))
            .map(|e| e.id.clone())
            .collect()
    }

    pub fn matches(&self, id: &ElementId, selector: &Selector) -> bool {
        self.get(id).is_some_and(|e| e.matches(selector))
    }

    /// Nearest inclusive ancestor of `id` matching `selector`.
    pub fn closest(&self, id: &ElementId, selector: &Selector) -> Option<ElementId> {
        let mut current = self.get(id);
        while let Some(el) = current {
            if el.matches(selector) {
                return Some(el.id.clone());
            }
            current = el.parent.as_ref().and_then(|p| self.get(p));
        }
        None
    }

    /// Inclusive containment: an element contains itself.
    pub fn contains(&self, ancestor: &ElementId, node: &ElementId) -> bool {
        let mut current = self.get(node);
        while let Some(el) = current {
            if &el.id == ancestor {
                return true;
            }
            current = el.parent.as_ref().and_then(|p| self.get(p));
        }
        false
    }

    pub fn parent(&self, id: &ElementId) -> Option<&ElementId> {
        self.get(id).and_then(|e| e.parent.as_ref())
    }

    pub fn tag(&self, id: &ElementId) -> Option<&str> {
        self.get(id).map(|e| e.tag.as_str())
    }

    pub fn rect(&self, id: &ElementId) -> Option<Rect> {
        self.get(id).and_then(|e| e.rect)
    }

    // ---------------------------------------------------------------------
    // Classes, attributes, style, text
    // ---------------------------------------------------------------------

    pub fn has_class(&self, id: &ElementId, class: &str) -> bool {
        self.get(id).is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    pub fn add_class(&mut self, id: &ElementId, class: &str) {
        if let Some(el) = self.get_mut(id)
            && !el.classes.iter().any(|c| c == class)
        {
            el.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: &ElementId, class: &str) {
        if let Some(el) = self.get_mut(id) {
            el.classes.retain(|c| c != class);
        }
    }

    pub fn set_class(&mut self, id: &ElementId, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    pub fn attr(&self, id: &ElementId, name: &str) -> Option<&str> {
        self.get(id)
            .and_then(|e| e.attrs.get(name))
            .map(String::as_str)
    }

    pub fn set_attr(&mut self, id: &ElementId, name: &str, value: &str) {
        if let Some(el) = self.get_mut(id) {
            el.attrs.insert(name.to_string(), value.to_string());
        }
    }

    pub fn remove_attr(&mut self, id: &ElementId, name: &str) {
        if let Some(el) = self.get_mut(id) {
            el.attrs.remove(name);
        }
    }

    pub fn style(&self, id: &ElementId, property: &str) -> Option<&str> {
        self.get(id)
            .and_then(|e| e.style.get(property))
            .map(String::as_str)
    }

    /// Sets an inline style property; an empty value removes it.
    pub fn set_style(&mut self, id: &ElementId, property: &str, value: &str) {
        if let Some(el) = self.get_mut(id) {
            if value.is_empty() {
                el.style.remove(property);
            } else {
                el.style.insert(property.to_string(), value.to_string());
            }
        }
    }

    pub fn text(&self, id: &ElementId) -> Option<&str> {
        self.get(id).map(|e| e.text.as_str())
    }

    pub fn set_text(&mut self, id: &ElementId, text: &str) {
        if let Some(el) = self.get_mut(id) {
            el.text.clear();
            el.text.push_str(text);
        }
    }

    // ---------------------------------------------------------------------
    // Window state
    // ---------------------------------------------------------------------

    fn body(&self) -> Option<ElementId> {
        self.query(&Selector::Tag("body".to_string()))
    }

    /// Takes or releases `owner`'s hold on page scrolling. The body keeps
    /// `overflow: hidden` while any holder remains.
    pub fn lock_scroll(&mut self, owner: &ElementId, locked: bool) {
        if locked {
            self.scroll_locks.insert(owner.clone());
        } else {
            self.scroll_locks.remove(owner);
        }
        let hidden = !self.scroll_locks.is_empty();
        if let Some(body) = self.body() {
            self.set_style(&body, "overflow", if hidden { "hidden" } else { "" });
        }
    }

    pub fn is_scroll_locked(&self) -> bool {
        !self.scroll_locks.is_empty()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport_size(&mut self, width: f64, height: Option<f64>) {
        self.viewport.width = width;
        if let Some(h) = height {
            self.viewport.height = h;
        }
    }

    pub fn supports_intersection_observer(&self) -> bool {
        self.viewport.intersection_observer
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y.max(0.0);
    }

    /// Scrolls so the element's top edge meets the viewport top. Returns
    /// false when the element is missing or has no layout box.
    pub fn scroll_into_view(&mut self, id: &ElementId) -> bool {
        match self.rect(id) {
            Some(rect) => {
                self.set_scroll_y(rect.top);
                true
            }
            None => false,
        }
    }

    pub fn focused(&self) -> Option<&ElementId> {
        self.focused.as_ref()
    }

    pub fn focus(&mut self, id: &ElementId) {
        if self.exists(id) {
            self.focused = Some(id.clone());
        }
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Follows a link. Fragment links scroll to their target when present.
    pub fn navigate(&mut self, href: &str) {
        if let Some(fragment) = href.strip_prefix('#') {
            let target = ElementId::new(fragment);
            self.scroll_into_view(&target);
        }
        log::debug!("Navigating to {}", href);
        self.location = Some(href.to_string());
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn session_get(&self, key: &str) -> Option<&str> {
        self.session.get(key).map(String::as_str)
    }

    pub fn session_set(&mut self, key: &str, value: &str) {
        self.session.insert(key.to_string(), value.to_string());
    }

    // ---------------------------------------------------------------------
    // Intersection
    // ---------------------------------------------------------------------

    /// Visible fraction of an element inside the viewport, with the viewport
    /// bottom edge pulled up by `bottom_margin`. `None` without a layout box.
    pub fn intersection_ratio(&self, id: &ElementId, bottom_margin: f64) -> Option<f64> {
        let rect = self.rect(id)?;
        let view_top = self.scroll_y;
        let view_bottom = self.scroll_y + self.viewport.height - bottom_margin;
        let visible = rect.bottom().min(view_bottom) - rect.top.max(view_top);

        if rect.height <= 0.0 {
            let inside = rect.top >= view_top && rect.top <= view_bottom;
            return Some(if inside { 1.0 } else { 0.0 });
        }
        Some((visible / rect.height).clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{id, page_from};

    #[test]
    fn test_default_page_loads() {
        let page = Document::default_page().unwrap();
        assert!(page.exists(&id("hamburger")));
        assert!(page.exists(&id("navLinks")));
        assert!(page.exists(&id("photoModal")));
        assert_eq!(page.query_all(&".carousel-slide".into()).len(), 3);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let manifest = PageManifest {
            viewport: Viewport::default(),
            elements: vec![ElementSpec::new("a", "div"), ElementSpec::new("a", "div")],
        };
        assert!(matches!(
            Document::new(manifest),
            Err(PageError::DuplicateId(_))
        ));
    }

    #[test]
    fn test_parent_must_precede_child() {
        let manifest = PageManifest {
            viewport: Viewport::default(),
            elements: vec![
                ElementSpec::new("child", "div").parent("root"),
                ElementSpec::new("root", "div"),
            ],
        };
        assert!(matches!(
            Document::new(manifest),
            Err(PageError::UnknownParent { .. })
        ));
    }

    #[test]
    fn test_containment_and_closest() {
        let page = page_from(vec![
            ElementSpec::new("body", "body"),
            ElementSpec::new("nav", "ul").parent("body"),
            ElementSpec::new("link", "a").parent("nav").attr("href", "#x"),
            ElementSpec::new("label", "span").parent("link"),
        ]);

        assert!(page.contains(&id("nav"), &id("label")));
        assert!(page.contains(&id("nav"), &id("nav")));
        assert!(!page.contains(&id("link"), &id("nav")));
        assert_eq!(page.closest(&id("label"), &"a".into()), Some(id("link")));
        assert_eq!(page.query_within(&id("nav"), &"a".into()), vec![id("link")]);
    }

    #[test]
    fn test_mutators_ignore_unknown_ids() {
        let mut page = page_from(vec![ElementSpec::new("body", "body")]);
        page.add_class(&id("ghost"), "active");
        page.set_attr(&id("ghost"), "src", "x.jpg");
        page.focus(&id("ghost"));
        assert!(!page.has_class(&id("ghost"), "active"));
        assert!(page.focused().is_none());
    }

    #[test]
    fn test_class_toggling_is_idempotent() {
        let mut page = page_from(vec![ElementSpec::new("el", "div")]);
        page.add_class(&id("el"), "visible");
        page.add_class(&id("el"), "visible");
        page.remove_class(&id("el"), "visible");
        assert!(!page.has_class(&id("el"), "visible"));
    }

    #[test]
    fn test_intersection_ratio_with_margin() {
        let mut page = page_from(vec![
            ElementSpec::new("card", "div").rect(700.0, 200.0),
            ElementSpec::new("hidden", "div"),
        ]);
        page.set_viewport_size(400.0, Some(800.0));

        // visible band is [0, 800 - 100] so 0 of 200 units show
        assert_eq!(page.intersection_ratio(&id("card"), 100.0), Some(0.0));
        assert_eq!(page.intersection_ratio(&id("card"), 0.0), Some(0.5));

        page.set_scroll_y(100.0);
        assert_eq!(page.intersection_ratio(&id("card"), 100.0), Some(0.5));
        assert_eq!(page.intersection_ratio(&id("hidden"), 0.0), None);
    }

    #[test]
    fn test_navigate_fragment_scrolls_when_target_exists() {
        let mut page = page_from(vec![
            ElementSpec::new("body", "body"),
            ElementSpec::new("services", "section").rect(1200.0, 400.0),
        ]);
        page.navigate("#services");
        assert_eq!(page.scroll_y(), 1200.0);

        page.navigate("#missing");
        assert_eq!(page.scroll_y(), 1200.0);
        assert_eq!(page.location(), Some("#missing"));
    }

    #[test]
    fn test_scroll_stays_locked_while_any_holder_remains() {
        let mut page = page_from(vec![ElementSpec::new("body", "body")]);
        let (menu, modal) = (id("menu"), id("modal"));

        page.lock_scroll(&modal, true);
        page.lock_scroll(&menu, true);
        page.lock_scroll(&menu, false);
        assert!(page.is_scroll_locked());
        assert_eq!(page.style(&id("body"), "overflow"), Some("hidden"));

        page.lock_scroll(&modal, false);
        page.lock_scroll(&modal, false);
        assert!(!page.is_scroll_locked());
        assert_eq!(page.style(&id("body"), "overflow"), None);
    }
}
