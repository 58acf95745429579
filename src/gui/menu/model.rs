use crate::config::MenuConfig;
use crate::dom::{Document, ElementId, Selector};
use crate::events::Key;
use crate::gui::a11y;
use crate::gui::menu::{ARIA_CONTROLS, ARIA_EXPANDED, ARIA_HIDDEN, SwipeTracker, is_inert_href};
use crate::gui::{ACTIVE, LINK, MENU_PANEL, MENU_TOGGLE, SHOW};
use crate::timer::{Scheduler, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTransition {
    Opened,
    Closed,
    Unchanged,
}

/// Slide-out navigation for narrow viewports.
#[derive(Debug)]
pub struct NavMenu {
    toggle: ElementId,
    panel: ElementId,
    open: bool,
    swipe: SwipeTracker,
    config: MenuConfig,
}

impl NavMenu {
    pub fn mount(page: &mut Document, config: MenuConfig) -> Option<Self> {
        let toggle = page.query(&Selector::parse(MENU_TOGGLE))?;
        let panel = page.query(&Selector::parse(MENU_PANEL))?;

        a11y::make_activatable(page, &toggle);
        page.set_attr(&toggle, ARIA_CONTROLS, &panel);

        let mut menu = Self {
            toggle,
            panel,
            open: false,
            swipe: SwipeTracker::default(),
            config,
        };
        menu.on_resize(page);
        log::debug!("Mounted navigation menu ({} -> {})", menu.toggle, menu.panel);
        Some(menu)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle_id(&self) -> &ElementId {
        &self.toggle
    }

    pub fn panel_id(&self) -> &ElementId {
        &self.panel
    }

    pub fn set_config(&mut self, page: &mut Document, config: MenuConfig) {
        self.config = config;
        self.on_resize(page);
    }

    fn is_mobile(&self, page: &Document) -> bool {
        page.viewport().width <= self.config.breakpoint
    }

    pub fn open(&mut self, page: &mut Document) -> MenuTransition {
        if self.open {
            return MenuTransition::Unchanged;
        }
        self.open = true;

        page.add_class(&self.panel, SHOW);
        page.add_class(&self.toggle, ACTIVE);
        page.set_attr(&self.toggle, ARIA_EXPANDED, "true");
        page.set_attr(&self.panel, ARIA_HIDDEN, "false");
        page.lock_scroll(&self.panel, true);

        if self.config.focus_first_link
            && let Some(first) = page
                .query_within(&self.panel, &Selector::parse(LINK))
                .into_iter()
                .next()
        {
            page.focus(&first);
        }

        log::debug!("Menu opened");
        MenuTransition::Opened
    }

    pub fn close(&mut self, page: &mut Document) -> MenuTransition {
        if !self.open {
            return MenuTransition::Unchanged;
        }
        self.write_closed(page);
        log::debug!("Menu closed");
        MenuTransition::Closed
    }

    /// Writes the closed state whatever the current one. Scrolling is only
    /// restored when the menu was the one holding it.
    fn write_closed(&mut self, page: &mut Document) {
        let was_open = self.open;
        self.open = false;
        self.swipe.reset();

        page.remove_class(&self.panel, SHOW);
        page.remove_class(&self.toggle, ACTIVE);
        page.set_attr(&self.toggle, ARIA_EXPANDED, "false");
        page.set_attr(&self.panel, ARIA_HIDDEN, "true");

        if was_open {
            page.lock_scroll(&self.panel, false);
            if page
                .focused()
                .is_some_and(|f| page.contains(&self.panel, f))
            {
                page.focus(&self.toggle);
            }
        }
    }

    pub fn toggle(&mut self, page: &mut Document) -> MenuTransition {
        if self.open {
            self.close(page)
        } else {
            self.open(page)
        }
    }

    fn is_inside(&self, page: &Document, target: &ElementId) -> bool {
        page.contains(&self.toggle, target) || page.contains(&self.panel, target)
    }

    pub fn on_click(
        &mut self,
        page: &mut Document,
        timers: &mut Scheduler,
        target: &ElementId,
    ) -> MenuTransition {
        if page.contains(&self.toggle, target) {
            return self.toggle(page);
        }

        if page.contains(&self.panel, target) {
            let Some(link) = page.closest(target, &Selector::parse(LINK)) else {
                return MenuTransition::Unchanged;
            };
            let href = page.attr(&link, "href").unwrap_or_default().to_string();

            let transition = self.close(page);
            if !is_inert_href(&href) {
                if transition == MenuTransition::Closed {
                    // let the close transition play before leaving
                    timers.set_timeout(self.config.close_delay_ms, Task::Navigate(href));
                } else {
                    page.navigate(&href);
                }
            }
            return transition;
        }

        self.close(page)
    }

    pub fn on_touch_start(&mut self, page: &mut Document, target: &ElementId, x: f64) -> MenuTransition {
        if !self.open {
            return MenuTransition::Unchanged;
        }
        if !self.is_inside(page, target) {
            return self.close(page);
        }
        self.swipe.begin(x);
        MenuTransition::Unchanged
    }

    pub fn on_touch_move(&mut self, page: &mut Document, x: f64) -> MenuTransition {
        if self.open
            && self
                .swipe
                .update(x, self.config.swipe_threshold, self.config.swipe_direction)
        {
            log::debug!("Swipe closes menu");
            return self.close(page);
        }
        MenuTransition::Unchanged
    }

    pub fn on_touch_end(&mut self) {
        self.swipe.reset();
    }

    pub fn on_key(&mut self, page: &mut Document, key: &Key) -> MenuTransition {
        match key {
            Key::Escape => self.close(page),
            _ if a11y::is_activation_key(key)
                && page.focused() == Some(&self.toggle) =>
            {
                self.toggle(page)
            }
            _ => MenuTransition::Unchanged,
        }
    }

    /// Past the breakpoint the collapsed form is not used: force closed and
    /// drop the mobile-only attributes. Below it, make sure they exist.
    pub fn on_resize(&mut self, page: &mut Document) {
        if self.is_mobile(page) {
            if page.attr(&self.toggle, ARIA_EXPANDED).is_none() {
                let open = if self.open { "true" } else { "false" };
                page.set_attr(&self.toggle, ARIA_EXPANDED, open);
            }
            if page.attr(&self.panel, ARIA_HIDDEN).is_none() {
                let hidden = if self.open { "false" } else { "true" };
                page.set_attr(&self.panel, ARIA_HIDDEN, hidden);
            }
        } else {
            self.write_closed(page);
            page.remove_attr(&self.toggle, ARIA_EXPANDED);
            page.remove_attr(&self.panel, ARIA_HIDDEN);
        }
    }
}
