#![forbid(unsafe_code)]

//! The demo page model: hero plus four revealable sections over the
//! starfield backdrop.

use starlit_core::event::Event;
use starlit_fx::{FxQuality, StarfieldParams};
use starlit_render::{PackedRgba, Surface};
use starlit_runtime::reveal::visible_fraction;
use starlit_runtime::{Cmd, Model, RevealObserver, StarfieldMount};
use tracing::info;
use web_time::Instant;

/// Sections below the hero, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    About,
    Gallery,
    Music,
    Contact,
}

impl Section {
    pub const ALL: [Self; 4] = [Self::About, Self::Gallery, Self::Music, Self::Contact];

    pub const fn name(self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Gallery => "gallery",
            Self::Music => "music",
            Self::Contact => "contact",
        }
    }
}

/// One page message: a host event, unmodified.
pub enum Msg {
    Host(Event),
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        Self::Host(event)
    }
}

/// The whole page: the mounted backdrop, section geometry, and the
/// one-shot reveal observers.
pub struct PageModel {
    mount: StarfieldMount,
    viewport_height: f64,
    /// `(top, height)` per section, hero first at offset 0.
    sections: [(f64, f64); 4],
    reveals: [RevealObserver; 4],
    pending: Vec<Event>,
    scroll: f64,
    quality: FxQuality,
}

impl PageModel {
    /// Build the page at the initial viewport size. Each section is one
    /// viewport tall, stacked under the hero.
    #[must_use]
    pub fn new(width: f64, height: f64, params: StarfieldParams) -> Self {
        let mut reveals = [RevealObserver::new(); 4];
        for obs in &mut reveals {
            obs.observe();
        }
        let sections = [
            (height, height),
            (height * 2.0, height),
            (height * 3.0, height),
            (height * 4.0, height),
        ];
        Self {
            mount: StarfieldMount::mount(width, height, params),
            viewport_height: height,
            sections,
            reveals,
            pending: Vec::new(),
            scroll: 0.0,
            quality: FxQuality::Full,
        }
    }

    /// Current scroll offset.
    #[must_use]
    pub const fn scroll(&self) -> f64 {
        self.scroll
    }

    /// The mounted backdrop.
    #[must_use]
    pub const fn mount(&self) -> &StarfieldMount {
        &self.mount
    }

    /// Sections whose reveal has fired.
    pub fn revealed(&self) -> impl Iterator<Item = Section> {
        Section::ALL
            .into_iter()
            .zip(self.reveals)
            .filter(|(_, obs)| obs.triggered())
            .map(|(section, _)| section)
    }

    fn handle_scroll(&mut self, offset: f64) {
        self.scroll = offset;
        self.mount.handle_scroll(offset);
        for ((section, (top, h)), obs) in Section::ALL
            .into_iter()
            .zip(self.sections)
            .zip(&mut self.reveals)
        {
            if obs.report(visible_fraction(top, h, offset, self.viewport_height)) {
                info!(section = section.name(), offset, "section revealed");
            }
        }
    }
}

impl Model for PageModel {
    type Message = Msg;

    // Host events buffer here; `tick` drains them with the clock reading
    // the resize debouncer needs.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message> {
        let Msg::Host(event) = msg;
        self.pending.push(event);
        Cmd::none()
    }

    fn tick(&mut self, now: Instant, _frame: u64) -> Cmd<Self::Message> {
        for event in std::mem::take(&mut self.pending) {
            match event {
                Event::Resize { width, height } => {
                    self.mount.handle_resize_at(width, height, now);
                }
                Event::Scroll { offset } => self.handle_scroll(offset),
                Event::Unmount => {
                    self.mount.unmount();
                    return Cmd::quit();
                }
            }
        }
        self.mount.tick_at(now);
        Cmd::none()
    }

    fn view(&mut self, out: &mut Surface) {
        let Some(surface) = self.mount.render_frame(self.quality) else {
            return;
        };
        *out = surface.clone();

        // Revealed sections show as faint bands where they overlap the
        // viewport; unrevealed ones stay hidden until their observer fires.
        let band = PackedRgba::rgb(80, 90, 140).with_alpha(0.18);
        for ((top, h), obs) in self.sections.into_iter().zip(self.reveals) {
            if !obs.triggered() {
                continue;
            }
            let y0 = top - self.scroll;
            let y1 = y0 + h;
            if y1 <= 0.0 || y0 >= self.viewport_height {
                continue;
            }
            let y = y0.max(0.0) as i64;
            let height = (y1.min(self.viewport_height) - y0.max(0.0)).max(0.0) as u32;
            out.fill_rect(0, y, out.width(), height, band);
        }
    }
}
