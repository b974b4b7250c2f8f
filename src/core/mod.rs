//! Terminal Core Module
//!
//! Session-scoped terminal state. This module contains:
//! - Output buffer (display lines)
//! - Mode flags (boot, retro, destroyed, flash)
//! - Deterministic snapshot generation
//!
//! State lives in one owned value that is passed to the interpreter and the
//! rasterizer; nothing here is global.

mod buffer;
mod modes;
mod snapshot;

pub use buffer::OutputBuffer;
pub use modes::ModeState;
pub use snapshot::{ModesSnapshot, Snapshot};

/// Header shown at session start and after `clear`
pub const DEFAULT_HEADER: &str = "Welcome! Type \"help\" and press Enter.";

/// Everything the interpreter mutates and the rasterizer reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalState {
    /// Display lines
    pub buffer: OutputBuffer,
    /// Mode flags
    pub modes: ModeState,
}

impl TerminalState {
    /// Fresh session state: header only, booting
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            buffer: OutputBuffer::new(header),
            modes: ModeState::default(),
        }
    }

    /// Capture a snapshot of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_state(self)
    }
}

impl Default for TerminalState {
    fn default() -> Self {
        Self::new(DEFAULT_HEADER)
    }
}
