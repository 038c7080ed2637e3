#![forbid(unsafe_code)]

//! Elm-style program loop: model, update, view.
//!
//! The loop is deliberately host-agnostic. Events come from an
//! [`EventSource`] the caller supplies, time comes in through
//! [`Program::step_at`], and the view renders into an owned surface the
//! caller can present however it likes. Tests drive the whole loop with a
//! scripted source and a fake clock.

use starlit_core::event::Event;
use starlit_render::Surface;
use tracing::debug;
use web_time::Instant;

/// Application state and behavior.
pub trait Model: Sized {
    /// The message type for this model. Must be convertible from host
    /// events.
    type Message: From<Event>;

    /// Called once before the first step.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// The core state transition.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Called once per step after events, with the step's clock reading.
    /// This is where debounce windows and animations advance.
    fn tick(&mut self, now: Instant, frame: u64) -> Cmd<Self::Message> {
        let _ = (now, frame);
        Cmd::none()
    }

    /// Render the current state.
    fn view(&mut self, out: &mut Surface);
}

/// Side effects returned from `init`/`update`/`tick`.
#[derive(Debug, Default)]
pub enum Cmd<M> {
    /// No operation.
    #[default]
    None,
    /// Stop the program.
    Quit,
    /// Feed a message back into `update`.
    Msg(M),
    /// Execute several commands in order.
    Batch(Vec<Cmd<M>>),
}

impl<M> Cmd<M> {
    /// Create a no-op command.
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    /// Create a quit command.
    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    /// Create a message command.
    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    /// Create a batch, collapsing trivial cases.
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut cmds: Vec<_> = cmds
            .into_iter()
            .filter(|c| !matches!(c, Self::None))
            .collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.remove(0),
            _ => Self::Batch(cmds),
        }
    }
}

/// Supplies events to the loop. `poll` is called repeatedly each step
/// until it returns `None`.
pub trait EventSource {
    fn poll(&mut self, frame: u64) -> Option<Event>;
}

/// Program loop configuration.
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Output surface dimensions.
    pub width: u32,
    /// Output surface height.
    pub height: u32,
    /// Stop after this many steps, if set.
    pub max_frames: Option<u64>,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            width: 120,
            height: 80,
            max_frames: None,
        }
    }
}

/// The program runtime: drains events, updates the model, renders.
pub struct Program<M: Model> {
    model: M,
    surface: Surface,
    running: bool,
    frame: u64,
    max_frames: Option<u64>,
}

impl<M: Model> Program<M> {
    /// Create a program and run the model's `init`.
    pub fn new(model: M, config: ProgramConfig) -> Self {
        let mut program = Self {
            model,
            surface: Surface::new(config.width, config.height),
            running: true,
            frame: 0,
            max_frames: config.max_frames,
        };
        let cmd = program.model.init();
        program.execute_cmd(cmd);
        program
    }

    /// True until a `Cmd::Quit` or the frame cap.
    #[inline]
    #[must_use]
    pub const fn running(&self) -> bool {
        self.running
    }

    /// Steps taken so far.
    #[inline]
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// The last rendered surface.
    #[inline]
    #[must_use]
    pub const fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Borrow the model (tests assert on it).
    #[inline]
    #[must_use]
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// Run one step at `now`: drain events, tick, render.
    ///
    /// Returns `false` once the program has stopped; further calls are
    /// no-ops.
    pub fn step_at(&mut self, source: &mut impl EventSource, now: Instant) -> bool {
        if !self.running {
            return false;
        }
        self.frame += 1;

        while let Some(event) = source.poll(self.frame) {
            debug!(?event, frame = self.frame, "event");
            let cmd = self.model.update(M::Message::from(event));
            self.execute_cmd(cmd);
            if !self.running {
                return false;
            }
        }

        let cmd = self.model.tick(now, self.frame);
        self.execute_cmd(cmd);
        if !self.running {
            return false;
        }

        self.model.view(&mut self.surface);

        if let Some(max) = self.max_frames
            && self.frame >= max
        {
            self.shutdown();
        }
        self.running
    }

    /// Stop the loop. Idempotent.
    pub fn shutdown(&mut self) {
        if self.running {
            self.running = false;
            debug!(frames = self.frame, "program stopped");
        }
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => self.shutdown(),
            Cmd::Msg(m) => {
                let cmd = self.model.update(m);
                self.execute_cmd(cmd);
            }
            Cmd::Batch(cmds) => {
                for c in cmds {
                    self.execute_cmd(c);
                    if !self.running {
                        break;
                    }
                }
            }
        }
    }
}

/// A pre-scripted event source: yields events scheduled for the current
/// frame, in order.
#[derive(Debug, Default)]
pub struct EventScript {
    entries: Vec<(u64, Event)>,
    cursor: usize,
}

impl EventScript {
    /// Build a script from `(frame, event)` pairs. Entries must be sorted
    /// by frame.
    #[must_use]
    pub fn new(entries: Vec<(u64, Event)>) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].0 <= w[1].0));
        Self { entries, cursor: 0 }
    }

    /// True when every scripted event has been delivered.
    #[must_use]
    pub fn exhausted(&self) -> bool {
        self.cursor >= self.entries.len()
    }
}

impl EventSource for EventScript {
    fn poll(&mut self, frame: u64) -> Option<Event> {
        let (at, event) = self.entries.get(self.cursor)?;
        if *at <= frame {
            self.cursor += 1;
            Some(*event)
        } else {
            None
        }
    }
}
