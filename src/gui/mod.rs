pub mod a11y;
pub mod anchors;
pub mod app;
pub mod booking;
pub mod debounce;
pub mod faq;
pub mod menu;
pub mod modal;
pub mod reveal;
pub mod scroll;
pub mod slides;
pub mod typewriter;

// Markup contract of the clinic page.
pub const CAROUSEL: &str = ".carousel";
pub const CAROUSEL_SLIDE: &str = ".carousel-slide";
pub const CAROUSEL_PREV: &str = ".carousel-prev";
pub const CAROUSEL_NEXT: &str = ".carousel-next";
pub const TESTIMONIAL: &str = ".testimonial";
pub const MENU_TOGGLE: &str = "#hamburger";
pub const MENU_PANEL: &str = "#navLinks";
pub const PHOTO_MODAL: &str = "#photoModal";
pub const MODAL_IMAGE: &str = "#modalImg";
pub const MODAL_CLOSE: &str = ".modal-close";
pub const GALLERY_IMAGE: &str = ".gallery-img";
pub const HEADER: &str = "header";
pub const HERO: &str = ".hero";
pub const REVEAL_TARGETS: &str = ".fade-in, .scale-in, .reveal";
pub const LAZY_IMAGE: &str = "[data-src]";
pub const TYPEWRITER: &str = "#typewriter";
pub const FAQ_ITEM: &str = ".faq-item";
pub const LINK: &str = "a";
pub const FOCUSABLE: &str = "a, button, input, select, textarea, [tabindex]";

// State classes.
pub const ACTIVE: &str = "active";
pub const SHOW: &str = "show";
pub const SCROLLED: &str = "scrolled";
pub const VISIBLE: &str = "visible";

/// Maps any signed position onto `0..len`, so stepping back from 0 lands on
/// the last element. `len` must be non-zero.
pub fn wrap_index(raw: i64, len: usize) -> usize {
    raw.rem_euclid(len as i64) as usize
}
