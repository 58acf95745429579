//! Shared fixtures for unit tests.

use crate::dom::{Document, ElementId, ElementSpec, PageManifest, Viewport};

pub fn id(s: &str) -> ElementId {
    ElementId::new(s)
}

/// A page with the default viewport built from `elements`.
pub fn page_from(elements: Vec<ElementSpec>) -> Document {
    Document::new(PageManifest {
        viewport: Viewport::default(),
        elements,
    })
    .unwrap()
}

/// The bundled clinic page.
pub fn clinic_page() -> Document {
    Document::default_page().unwrap()
}
