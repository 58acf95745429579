use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod document;
pub mod observer;
pub mod selector;

pub use document::{Document, ElementSpec, PageManifest, Viewport};
pub use observer::{Entry, Observer, ObserverOptions};
pub use selector::Selector;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ElementId(String);

crate::impl_string_newtype!(ElementId);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ImageSrc(String);

crate::impl_string_newtype!(ImageSrc);

/// Vertical layout box of an element, in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Error, Debug)]
pub enum PageError {
    #[error("Page manifest error: {0}")]
    Manifest(#[from] config::ConfigError),
    #[error("Duplicate element id '{0}'")]
    DuplicateId(ElementId),
    #[error("Element '{id}' references unknown parent '{parent}'")]
    UnknownParent { id: ElementId, parent: ElementId },
}
