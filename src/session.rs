//! Terminal Session
//!
//! Ties together the interpreter, the rasterizer, the timers, and the
//! viewport adapter. This is the main integration point: callers feed it
//! discrete events (a submitted line, a clock reading, a resize) and read
//! back whatever presentation the current width calls for.
//!
//! Every handler runs to completion before the next event is processed, so
//! the state needs no locking.

use std::time::Duration;

use tracing::{debug, info};

use crate::app::{Config, FlashPolicy, LinkOpener};
use crate::boot::{BootController, BootState, BOOT_MESSAGE};
use crate::commands::{CommandTable, Dispatch, Effect, Interpreter};
use crate::core::{ModeState, OutputBuffer, Snapshot, TerminalState};
use crate::renderer::{PixelSurface, Rasterizer, SceneFrame};
use crate::scheduler::{Scheduler, TimerHandle};
use crate::viewport::{Layout, Viewport};

/// Deferred work owned by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    FinishBoot,
    RevertFlash,
}

/// What happened to a submitted line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Input arrived while booting and was dropped
    Rejected,
    /// The interpreter handled the input
    Dispatched(Dispatch),
}

/// What the front end should show
#[derive(Debug, Clone)]
pub enum Presentation {
    /// Boot screen, the only output until boot completes
    Booting(PixelSurface),
    /// Narrow viewport: the raw buffer as a text list
    Compact(Vec<String>),
    /// Wide viewport: texture and decoration for the 3D monitor
    Surface(SceneFrame),
}

/// A terminal session
pub struct Session {
    state: TerminalState,
    interpreter: Interpreter,
    rasterizer: Rasterizer,
    scheduler: Scheduler<Task>,
    boot: BootController,
    viewport: Viewport,
    width: u32,
    flash_delay: Duration,
    flash_policy: FlashPolicy,
    flash_timers: Vec<TimerHandle>,
    opener: Box<dyn LinkOpener>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("boot", &self.boot)
            .field("width", &self.width)
            .field("pending_timers", &self.scheduler.pending())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Start a session and arm the boot timer
    pub fn new(config: &Config, opener: Box<dyn LinkOpener>) -> Self {
        let interpreter = Interpreter::new(
            CommandTable::builtin(),
            config.terminal.header.clone(),
            config.terminal.profile_url.clone(),
        );
        let rasterizer = Rasterizer::new(
            config.surface.width,
            config.surface.height,
            config.text,
            config.palette.resolve(),
        )
        .with_crack_count(config.surface.crack_count);

        let mut session = Self {
            state: TerminalState::new(config.terminal.header.clone()),
            interpreter,
            rasterizer,
            scheduler: Scheduler::new(),
            boot: BootController::new(),
            viewport: Viewport::new(config.viewport.compact_threshold),
            width: config.viewport.compact_threshold,
            flash_delay: config.timing.flash_delay(),
            flash_policy: config.timing.flash_policy,
            flash_timers: Vec::new(),
            opener,
        };
        session
            .boot
            .arm(&mut session.scheduler, config.timing.boot_delay(), Task::FinishBoot);
        debug!(boot_delay_ms = config.timing.boot_delay_ms, "session started");
        session
    }

    /// Replace the rasterizer, e.g. to use a different glyph source
    pub fn with_rasterizer(mut self, rasterizer: Rasterizer) -> Self {
        self.rasterizer = rasterizer;
        self
    }

    /// Terminal state
    pub fn state(&self) -> &TerminalState {
        &self.state
    }

    /// Output buffer
    pub fn buffer(&self) -> &OutputBuffer {
        &self.state.buffer
    }

    /// Mode flags
    pub fn modes(&self) -> &ModeState {
        &self.state.modes
    }

    /// Boot state
    pub fn boot_state(&self) -> BootState {
        self.boot.state()
    }

    /// Session clock
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Timers waiting to fire
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// When the next timer fires, if any
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    /// The rasterizer
    pub fn rasterizer(&self) -> &Rasterizer {
        &self.rasterizer
    }

    /// Snapshot of the logical state
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Move the session clock to `elapsed` since start and fire due timers
    pub fn advance(&mut self, elapsed: Duration) {
        for task in self.scheduler.advance_to(elapsed) {
            match task {
                Task::FinishBoot => {
                    if self.boot.complete() {
                        self.state.modes.finish_boot();
                    }
                }
                Task::RevertFlash => {
                    let scheduler = &self.scheduler;
                    self.flash_timers.retain(|handle| scheduler.is_pending(*handle));
                    self.state.modes.flash_eyes = false;
                    debug!("flash reverted");
                }
            }
        }
    }

    /// Finish booting immediately, cancelling the boot timer
    pub fn skip_boot(&mut self) {
        self.boot.cancel(&mut self.scheduler);
        if self.boot.complete() {
            self.state.modes.finish_boot();
        }
    }

    /// Handle one submitted line
    pub fn submit(&mut self, raw: &str) -> Submission {
        if !self.boot.is_ready() {
            debug!("input rejected while booting");
            return Submission::Rejected;
        }

        let dispatch = self.interpreter.dispatch(raw, &mut self.state);
        for effect in &dispatch.effects {
            match effect {
                Effect::ScheduleFlashReset => self.schedule_flash_reset(),
                Effect::OpenLink(url) => {
                    info!(url = %url, "opening link");
                    self.opener.open(url);
                }
            }
        }
        Submission::Dispatched(dispatch)
    }

    fn schedule_flash_reset(&mut self) {
        if self.flash_policy == FlashPolicy::RestartWindow {
            for handle in self.flash_timers.drain(..) {
                self.scheduler.cancel(handle);
            }
        }
        let handle = self.scheduler.schedule(self.flash_delay, Task::RevertFlash);
        self.flash_timers.push(handle);
    }

    /// Record a new viewport width and return its layout
    pub fn resize(&mut self, width: u32) -> Layout {
        self.width = width;
        let layout = self.viewport.classify(width);
        debug!(width, ?layout, "resize");
        layout
    }

    /// Layout for the last recorded width
    pub fn layout(&self) -> Layout {
        self.viewport.classify(self.width)
    }

    /// Render the terminal surface regardless of viewport
    pub fn render(&self) -> PixelSurface {
        self.rasterizer.render(&self.state.buffer, &self.state.modes)
    }

    /// Build what the front end should show right now
    pub fn presentation(&self) -> Presentation {
        if !self.boot.is_ready() {
            return Presentation::Booting(self.rasterizer.render_boot(BOOT_MESSAGE));
        }
        match self.layout() {
            Layout::Compact => Presentation::Compact(self.state.buffer.lines().to_vec()),
            Layout::Surface => Presentation::Surface(self.rasterizer.frame(&self.state)),
        }
    }

    /// End the session, cancelling every pending timer before state is dropped.
    ///
    /// Returns how many timers were cancelled.
    pub fn teardown(mut self) -> usize {
        let mut cancelled = usize::from(self.boot.cancel(&mut self.scheduler));
        for handle in self.flash_timers.drain(..) {
            cancelled += usize::from(self.scheduler.cancel(handle));
        }
        cancelled += self.scheduler.cancel_all();
        debug!(cancelled, "session torn down");
        cancelled
    }
}
