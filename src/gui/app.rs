use crate::config::{self, Config};
use crate::dom::{Document, ElementId, ImageSrc};
use crate::events::{AppEvent, Key, PageCall};
use crate::gui::debounce::Debouncer;
use crate::gui::menu::NavMenu;
use crate::gui::modal::Lightbox;
use crate::gui::reveal::{LazyImages, Reveal};
use crate::gui::scroll::ScrollEffects;
use crate::gui::slides::SlideShow;
use crate::gui::typewriter::Typewriter;
use crate::gui::{anchors, booking, faq};
use crate::timer::{Millis, Scheduler, Task};

/// Every interactive feature of the page. Each one is `None` when the page
/// lacks the markup it needs.
#[derive(Debug, Default)]
struct Components {
    scroll: Option<ScrollEffects>,
    carousel: Option<SlideShow>,
    testimonials: Option<SlideShow>,
    menu: Option<NavMenu>,
    lightbox: Option<Lightbox>,
    reveal: Option<Reveal>,
    lazy: Option<LazyImages>,
    typewriter: Option<Typewriter>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub now: Millis,
    pub booted: bool,
    pub carousel: Option<usize>,
    pub carousel_playing: bool,
    pub testimonial: Option<usize>,
    pub menu_open: bool,
    pub lightbox_open: bool,
    pub lightbox_image: Option<ImageSrc>,
    pub typewriter: Option<String>,
    pub scroll_y: f64,
    pub scroll_locked: bool,
    pub location: Option<String>,
    pub pending_timers: usize,
}

pub struct App {
    config: Config,
    page: Document,
    timers: Scheduler,
    scroll_debounce: Debouncer,
    components: Components,
    booted: bool,
}

impl App {
    pub fn new(config: Config, page: Document) -> Self {
        Self {
            scroll_debounce: Debouncer::new(config.scroll.debounce_ms),
            config,
            page,
            timers: Scheduler::new(),
            components: Components::default(),
            booted: false,
        }
    }

    pub fn page(&self) -> &Document {
        &self.page
    }

    pub fn now(&self) -> Millis {
        self.timers.now()
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.timers.next_due()
    }

    pub fn is_booted(&self) -> bool {
        self.booted
    }

    /// Runs every timer due up to `until`, one task at a time.
    pub fn advance_to(&mut self, until: Millis) {
        while let Some((_, task)) = self.timers.pop_due(until) {
            let before = self.page.scroll_y();
            self.run_task(task);
            self.sync_scroll(before);
        }
        self.timers.settle(until);
    }

    pub fn advance(&mut self, ms: Millis) {
        self.advance_to(self.timers.now().saturating_add(ms));
    }

    pub fn dispatch(&mut self, event: AppEvent) {
        log::trace!("t={} {:?}", self.timers.now(), event);
        let before = self.page.scroll_y();

        match event {
            AppEvent::DomReady => self.boot(),
            AppEvent::Load => self.on_load(),
            AppEvent::Unload => self.teardown(),
            AppEvent::Status => log::info!("{:?}", self.status()),
            AppEvent::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.reconfigure(new_config);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppEvent::Scroll(y) => {
                self.page.set_scroll_y(y);
                self.on_scrolled();
                return;
            }
            AppEvent::Resize { width, height } => {
                self.page.set_viewport_size(width, height);
                self.on_resize();
            }
            AppEvent::Focus(target) => self.page.focus(&target),
            event if !self.booted => log::debug!("Ignoring {:?} before the page is ready", event),
            AppEvent::Click(target) => self.on_click(&target),
            AppEvent::PointerEnter(target) => {
                if let Some(carousel) = &mut self.components.carousel {
                    carousel.on_pointer_enter(&mut self.timers, &target);
                }
            }
            AppEvent::PointerLeave(target) => {
                if let Some(carousel) = &mut self.components.carousel {
                    carousel.on_pointer_leave(&mut self.timers, &target);
                }
            }
            AppEvent::KeyDown { key, shift } => self.on_key(&key, shift),
            AppEvent::TouchStart { target, x } => {
                if let Some(menu) = &mut self.components.menu {
                    menu.on_touch_start(&mut self.page, &target, x);
                }
            }
            AppEvent::TouchMove { x } => {
                if let Some(menu) = &mut self.components.menu {
                    menu.on_touch_move(&mut self.page, x);
                }
            }
            AppEvent::TouchEnd => {
                if let Some(menu) = &mut self.components.menu {
                    menu.on_touch_end();
                }
            }
            AppEvent::Call(call) => self.on_call(call),
        }

        self.sync_scroll(before);
    }

    /// Mounts every component in a fixed order. A second ready signal is
    /// ignored.
    fn boot(&mut self) {
        if self.booted {
            log::debug!("Page already initialized");
            return;
        }
        let cfg = &self.config;
        let page = &mut self.page;
        let timers = &mut self.timers;

        let mut c = Components {
            scroll: ScrollEffects::mount(page, cfg.scroll.clone()),
            carousel: SlideShow::mount_carousel(page, cfg.carousel.interval_ms),
            testimonials: SlideShow::mount_testimonials(page, cfg.testimonials.interval_ms),
            menu: NavMenu::mount(page, cfg.menu.clone()),
            lightbox: Lightbox::mount(page),
            reveal: Reveal::mount(page, &cfg.reveal),
            lazy: LazyImages::mount(page),
            typewriter: Typewriter::mount(page, cfg.typewriter.clone()),
        };

        if let Some(carousel) = &mut c.carousel {
            carousel.start(timers);
        }
        if let Some(testimonials) = &mut c.testimonials {
            testimonials.start(timers);
        }
        if let Some(scroll) = &c.scroll {
            scroll.apply(page);
        }
        if let Some(reveal) = &mut c.reveal {
            reveal.poll(page, timers);
        }
        if let Some(lazy) = &mut c.lazy {
            lazy.poll(page);
        }

        log::info!(
            "Page ready: carousel={} testimonials={} menu={} lightbox={} reveal={} lazy={} typewriter={}",
            c.carousel.is_some(),
            c.testimonials.is_some(),
            c.menu.is_some(),
            c.lightbox.is_some(),
            c.reveal.is_some(),
            c.lazy.is_some(),
            c.typewriter.is_some(),
        );

        self.components = c;
        self.booted = true;
    }

    fn on_load(&mut self) {
        if !self.booted {
            self.boot();
        }
        if let Some(typewriter) = &mut self.components.typewriter {
            typewriter.start(&mut self.timers);
        }
    }

    /// Drops every component and cancels every timer.
    fn teardown(&mut self) {
        self.timers.clear_all();
        self.components = Components::default();
        self.scroll_debounce = Debouncer::new(self.config.scroll.debounce_ms);
        self.booted = false;
        log::info!("Page unloaded");
    }

    pub fn reconfigure(&mut self, config: Config) {
        let c = &mut self.components;
        if let Some(carousel) = &mut c.carousel {
            carousel.set_interval(&mut self.timers, config.carousel.interval_ms);
        }
        if let Some(testimonials) = &mut c.testimonials {
            testimonials.set_interval(&mut self.timers, config.testimonials.interval_ms);
        }
        if let Some(menu) = &mut c.menu {
            menu.set_config(&mut self.page, config.menu.clone());
        }
        if let Some(typewriter) = &mut c.typewriter {
            typewriter.set_config(&mut self.page, config.typewriter.clone());
        }
        if let Some(scroll) = &mut c.scroll {
            scroll.set_config(config.scroll.clone());
        }
        if let Some(reveal) = &mut c.reveal {
            reveal.set_stagger(config.reveal.stagger_ms);
        }
        self.scroll_debounce.set_wait(config.scroll.debounce_ms);
        self.config = config;
    }

    fn run_task(&mut self, task: Task) {
        let c = &mut self.components;
        match task {
            Task::CarouselTick => {
                if let Some(carousel) = &mut c.carousel {
                    carousel.tick(&mut self.page);
                }
            }
            Task::TestimonialTick => {
                if let Some(testimonials) = &mut c.testimonials {
                    testimonials.tick(&mut self.page);
                }
            }
            Task::TypewriterStep => {
                if let Some(typewriter) = &mut c.typewriter {
                    typewriter.step(&mut self.page, &mut self.timers);
                }
            }
            Task::ScrollEffects => {
                self.scroll_debounce.fired();
                if let Some(scroll) = &c.scroll {
                    scroll.apply(&mut self.page);
                }
            }
            Task::Reveal(id) => Reveal::show(&mut self.page, &id),
            Task::Navigate(href) => self.page.navigate(&href),
        }
    }

    /// Programmatic scrolling (anchors, fragment navigation) is seen by the
    /// scroll listeners like a user scroll.
    fn sync_scroll(&mut self, before: f64) {
        if self.page.scroll_y() != before {
            self.on_scrolled();
        }
    }

    fn on_scrolled(&mut self) {
        if !self.booted {
            return;
        }
        if self.components.scroll.is_some() {
            self.scroll_debounce
                .trigger(&mut self.timers, Task::ScrollEffects);
        }
        self.poll_observers();
    }

    fn poll_observers(&mut self) {
        if let Some(reveal) = &mut self.components.reveal {
            reveal.poll(&self.page, &mut self.timers);
        }
        if let Some(lazy) = &mut self.components.lazy {
            lazy.poll(&mut self.page);
        }
    }

    fn on_resize(&mut self) {
        if !self.booted {
            return;
        }
        if let Some(menu) = &mut self.components.menu {
            menu.on_resize(&mut self.page);
        }
        self.poll_observers();
    }

    fn on_click(&mut self, target: &ElementId) {
        if !self.page.exists(target) {
            log::debug!("Click on unknown element {}", target);
        }
        let c = &mut self.components;

        let menu_panel = c.menu.as_ref().map(|m| m.panel_id().clone());
        if let Some(menu) = &mut c.menu {
            menu.on_click(&mut self.page, &mut self.timers, target);
        }
        if let Some(lightbox) = &mut c.lightbox {
            lightbox.on_click(&mut self.page, target);
        }
        if let Some(carousel) = &mut c.carousel {
            carousel.on_click(&mut self.page, &mut self.timers, target);
        }
        anchors::on_click(&mut self.page, target, menu_panel.as_ref());
    }

    fn on_key(&mut self, key: &Key, shift: bool) {
        let c = &mut self.components;
        if let Some(menu) = &mut c.menu {
            menu.on_key(&mut self.page, key);
        }
        if let Some(lightbox) = &mut c.lightbox {
            lightbox.on_key(&mut self.page, key, shift);
        }
    }

    fn on_call(&mut self, call: PageCall) {
        let c = &mut self.components;
        match call {
            PageCall::OpenModal(src) => {
                if let Some(lightbox) = &mut c.lightbox {
                    lightbox.open(&mut self.page, src);
                }
            }
            PageCall::CloseModal => {
                if let Some(lightbox) = &mut c.lightbox {
                    lightbox.close(&mut self.page);
                }
            }
            PageCall::ToggleFaq(item) => faq::toggle(&mut self.page, &item),
            PageCall::MoveTestimonial(direction) => {
                if let Some(testimonials) = &mut c.testimonials {
                    testimonials.move_by(&mut self.page, &mut self.timers, direction);
                }
            }
            PageCall::Book(service) => {
                booking::redirect(&mut self.page, &self.config.booking, service.as_deref())
            }
        }
    }

    pub fn status(&self) -> Status {
        let c = &self.components;
        Status {
            now: self.timers.now(),
            booted: self.booted,
            carousel: c.carousel.as_ref().map(|s| s.slides().index()),
            carousel_playing: c.carousel.as_ref().is_some_and(SlideShow::is_running),
            testimonial: c.testimonials.as_ref().map(|s| s.slides().index()),
            menu_open: c.menu.as_ref().is_some_and(NavMenu::is_open),
            lightbox_open: c.lightbox.as_ref().is_some_and(Lightbox::is_open),
            lightbox_image: c.lightbox.as_ref().and_then(|l| l.current().cloned()),
            typewriter: c.typewriter.as_ref().map(|t| t.state().text()),
            scroll_y: self.page.scroll_y(),
            scroll_locked: self.page.is_scroll_locked(),
            location: self.page.location().map(str::to_owned),
            pending_timers: self.timers.pending(),
        }
    }
}
