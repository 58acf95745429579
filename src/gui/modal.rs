//! Photo lightbox.

use crate::dom::{Document, ElementId, ImageSrc, Selector};
use crate::events::Key;
use crate::gui::a11y::FocusTrap;
use crate::gui::{GALLERY_IMAGE, MODAL_CLOSE, MODAL_IMAGE, PHOTO_MODAL};

#[derive(Debug)]
pub struct Lightbox {
    overlay: ElementId,
    image: ElementId,
    open: bool,
    current: Option<ImageSrc>,
    trap: FocusTrap,
}

impl Lightbox {
    pub fn mount(page: &mut Document) -> Option<Self> {
        let overlay = page.query(&Selector::parse(PHOTO_MODAL))?;
        let image = page.query(&Selector::parse(MODAL_IMAGE))?;
        page.set_style(&overlay, "display", "none");

        Some(Self {
            trap: FocusTrap::new(overlay.clone()),
            overlay,
            image,
            open: false,
            current: None,
        })
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Last image shown; kept after closing until the next `open`.
    pub fn current(&self) -> Option<&ImageSrc> {
        self.current.as_ref()
    }

    pub fn open(&mut self, page: &mut Document, src: ImageSrc) {
        page.set_attr(&self.image, "src", &src);
        page.set_style(&self.overlay, "display", "flex");
        page.lock_scroll(&self.overlay, true);
        log::debug!("Lightbox showing {}", src);

        self.current = Some(src);
        self.open = true;
        self.trap.enter(page);
    }

    pub fn close(&mut self, page: &mut Document) {
        if !self.open {
            return;
        }
        page.set_style(&self.overlay, "display", "none");
        page.lock_scroll(&self.overlay, false);
        self.open = false;
        log::debug!("Lightbox closed");
    }

    /// Backdrop and close-control clicks close; gallery images open.
    pub fn on_click(&mut self, page: &mut Document, target: &ElementId) -> bool {
        if self.open {
            let on_close_control = page
                .closest(target, &Selector::parse(MODAL_CLOSE))
                .is_some_and(|c| page.contains(&self.overlay, &c));

            if target == &self.overlay || on_close_control {
                self.close(page);
                return true;
            }
            return false;
        }

        if page.matches(target, &Selector::parse(GALLERY_IMAGE))
            && let Some(src) = page.attr(target, "src")
        {
            let src = ImageSrc::new(src);
            self.open(page, src);
            return true;
        }
        false
    }

    pub fn on_key(&mut self, page: &mut Document, key: &Key, shift: bool) {
        if !self.open {
            return;
        }
        match key {
            Key::Escape => self.close(page),
            Key::Tab => self.trap.cycle(page, shift),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementSpec;
    use crate::test_helpers::{clinic_page, id, page_from};

    #[test]
    fn test_missing_structure_does_not_mount() {
        let mut page = page_from(vec![
            ElementSpec::new("body", "body"),
            ElementSpec::new("photoModal", "div").parent("body"),
        ]);
        assert!(Lightbox::mount(&mut page).is_none());
    }

    #[test]
    fn test_open_shows_image_and_locks_scroll() {
        let mut page = clinic_page();
        let mut lightbox = Lightbox::mount(&mut page).unwrap();

        lightbox.open(&mut page, ImageSrc::new("x.jpg"));
        assert!(lightbox.is_open());
        assert_eq!(page.attr(&id("modalImg"), "src"), Some("x.jpg"));
        assert_eq!(page.style(&id("photoModal"), "display"), Some("flex"));
        assert!(page.is_scroll_locked());
        assert_eq!(page.focused(), Some(&id("modal-close")));
    }

    #[test]
    fn test_backdrop_click_closes_and_keeps_image() {
        let mut page = clinic_page();
        let mut lightbox = Lightbox::mount(&mut page).unwrap();

        lightbox.open(&mut page, ImageSrc::new("x.jpg"));
        assert!(lightbox.on_click(&mut page, &id("photoModal")));

        assert!(!lightbox.is_open());
        assert_eq!(page.style(&id("photoModal"), "display"), Some("none"));
        assert!(!page.is_scroll_locked());
        assert_eq!(lightbox.current(), Some(&ImageSrc::new("x.jpg")));
        assert_eq!(page.attr(&id("modalImg"), "src"), Some("x.jpg"));
    }

    #[test]
    fn test_content_click_keeps_open() {
        let mut page = clinic_page();
        let mut lightbox = Lightbox::mount(&mut page).unwrap();
        lightbox.open(&mut page, ImageSrc::new("x.jpg"));

        assert!(!lightbox.on_click(&mut page, &id("modalImg")));
        assert!(!lightbox.on_click(&mut page, &id("modal-content")));
        assert!(lightbox.is_open());

        assert!(lightbox.on_click(&mut page, &id("modal-close")));
        assert!(!lightbox.is_open());
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut page = clinic_page();
        let mut lightbox = Lightbox::mount(&mut page).unwrap();
        lightbox.open(&mut page, ImageSrc::new("x.jpg"));

        lightbox.close(&mut page);
        let once = (lightbox.is_open(), page.style(&id("photoModal"), "display").map(str::to_owned));
        lightbox.close(&mut page);
        let twice = (lightbox.is_open(), page.style(&id("photoModal"), "display").map(str::to_owned));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_gallery_click_opens_and_escape_closes() {
        let mut page = clinic_page();
        let mut lightbox = Lightbox::mount(&mut page).unwrap();

        assert!(lightbox.on_click(&mut page, &id("gallery-2")));
        assert_eq!(lightbox.current(), Some(&ImageSrc::new("images/placeholder.jpg")));

        lightbox.on_key(&mut page, &Key::Escape, false);
        assert!(!lightbox.is_open());
    }

    #[test]
    fn test_tab_stays_inside_overlay() {
        let mut page = clinic_page();
        let mut lightbox = Lightbox::mount(&mut page).unwrap();
        lightbox.open(&mut page, ImageSrc::new("x.jpg"));

        lightbox.on_key(&mut page, &Key::Tab, false);
        assert_eq!(page.focused(), Some(&id("modal-close")));
        lightbox.on_key(&mut page, &Key::Tab, true);
        assert_eq!(page.focused(), Some(&id("modal-close")));
    }
}
