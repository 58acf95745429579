use crate::config::ScrollConfig;
use crate::dom::{Document, ElementId, Selector};
use crate::gui::{HEADER, HERO, SCROLLED};

/// Header restyling and hero parallax, run from the debounced scroll task.
#[derive(Debug)]
pub struct ScrollEffects {
    header: Option<ElementId>,
    hero: Option<ElementId>,
    config: ScrollConfig,
}

impl ScrollEffects {
    pub fn mount(page: &Document, config: ScrollConfig) -> Option<Self> {
        let header = page.query(&Selector::parse(HEADER));
        let hero = page.query(&Selector::parse(HERO));
        if header.is_none() && hero.is_none() {
            return None;
        }
        Some(Self {
            header,
            hero,
            config,
        })
    }

    pub fn set_config(&mut self, config: ScrollConfig) {
        self.config = config;
    }

    pub fn apply(&self, page: &mut Document) {
        let y = page.scroll_y();

        if let Some(header) = &self.header {
            page.set_class(header, SCROLLED, y > self.config.header_threshold);
        }

        // past the first screen the hero is out of sight; leave it alone
        if let Some(hero) = &self.hero
            && y < page.viewport().height
        {
            let offset = y * self.config.parallax_factor;
            page.set_style(hero, "transform", &format!("translateY({offset}px)"));
        }
    }
}
