//! Boot controller
//!
//! One-shot `Booting -> Ready` transition driven by a timer armed at
//! session start. There is no way back to `Booting` short of a new session.

use std::time::Duration;

use tracing::info;

use crate::scheduler::{Scheduler, TimerHandle};

/// Delay before the terminal becomes interactive
pub const DEFAULT_BOOT_DELAY: Duration = Duration::from_millis(2000);

/// Text on the boot screen
pub const BOOT_MESSAGE: &str = "Booting...";

/// Boot state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootState {
    Booting,
    Ready,
}

/// Tracks the boot transition and its pending timer
#[derive(Debug)]
pub struct BootController {
    state: BootState,
    timer: Option<TimerHandle>,
}

impl Default for BootController {
    fn default() -> Self {
        Self::new()
    }
}

impl BootController {
    /// A controller in `Booting` with no timer armed yet
    pub fn new() -> Self {
        Self {
            state: BootState::Booting,
            timer: None,
        }
    }

    /// Arm the boot timer; a zero delay still waits for the next clock advance
    pub fn arm<T>(&mut self, scheduler: &mut Scheduler<T>, delay: Duration, task: T) {
        if self.state == BootState::Ready {
            return;
        }
        if let Some(previous) = self.timer.take() {
            scheduler.cancel(previous);
        }
        self.timer = Some(scheduler.schedule(delay, task));
    }

    /// The boot timer fired; returns true if this caused the transition
    pub fn complete(&mut self) -> bool {
        self.timer = None;
        if self.state == BootState::Ready {
            return false;
        }
        self.state = BootState::Ready;
        info!("boot complete");
        true
    }

    /// Cancel the pending timer, if any
    pub fn cancel<T>(&mut self, scheduler: &mut Scheduler<T>) -> bool {
        match self.timer.take() {
            Some(handle) => scheduler.cancel(handle),
            None => false,
        }
    }

    /// Current state
    pub fn state(&self) -> BootState {
        self.state
    }

    /// Whether the terminal accepts input
    pub fn is_ready(&self) -> bool {
        self.state == BootState::Ready
    }

    /// Whether the boot timer is still pending
    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }
}
