#![forbid(unsafe_code)]

//! Scripted scroll-through of the Starlit page, rendered as ANSI
//! half-blocks. Logs go to stderr; filter with `RUST_LOG`.
//!
//! ```sh
//! RUST_LOG=starlit=debug cargo run -p starlit-showcase 2>showcase.log
//! ```

mod page;

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use starlit_core::event::Event;
use starlit_fx::starfield::DEFAULT_SEED;
use starlit_fx::StarfieldParams;
use starlit_runtime::{EventScript, Program, ProgramConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;
use web_time::Instant;

use crate::page::PageModel;

// Small enough to fit a terminal at two pixel rows per text row.
const WIDTH: f64 = 160.0;
const HEIGHT: f64 = 96.0;
const TOUR_FRAMES: u64 = 600;

/// Build the tour: scroll smoothly through all five screens, with a
/// window resize partway down to show the debounced regeneration.
fn scripted_tour() -> EventScript {
    let mut entries = Vec::new();
    // One scroll event per frame after a short hold on the hero.
    let total_scroll = HEIGHT * 4.0;
    let scroll_frames = TOUR_FRAMES - 120;
    for i in 0..scroll_frames {
        let t = f64::from(i as u32) / f64::from(scroll_frames as u32 - 1);
        entries.push((60 + i, Event::scroll(t * total_scroll)));
    }
    entries.push((TOUR_FRAMES - 30, Event::resize(WIDTH + 80.0, HEIGHT)));
    entries.push((TOUR_FRAMES - 1, Event::Unmount));
    entries.sort_by_key(|(frame, _)| *frame);
    EventScript::new(entries)
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let model = PageModel::new(
        WIDTH,
        HEIGHT,
        StarfieldParams {
            seed: DEFAULT_SEED,
            ..StarfieldParams::default()
        },
    );
    let mut program = Program::new(
        model,
        ProgramConfig {
            width: WIDTH as u32,
            height: HEIGHT as u32,
            max_frames: Some(TOUR_FRAMES),
        },
    );
    let mut script = scripted_tour();
    let mut presenter = starlit_render::present::AnsiPresenter::new();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    // Clear and hide the cursor for the duration of the tour.
    write!(out, "\x1b[2J\x1b[?25l")?;
    out.flush()?;

    info!(width = WIDTH, height = HEIGHT, frames = TOUR_FRAMES, "tour starting");
    while program.step_at(&mut script, Instant::now()) {
        presenter.present(program.surface(), &mut out)?;
        thread::sleep(Duration::from_millis(16));
    }

    write!(out, "\x1b[?25h\x1b[0m")?;
    out.flush()?;
    info!(frames = program.frame(), "tour finished");
    Ok(())
}
