//! Deterministic snapshot generation
//!
//! Snapshots capture the terminal's logical state (buffer and modes) in a
//! serializable format for the compact text view, the CLI's JSON output,
//! and tests. Pixel output is deliberately not part of a snapshot.

use serde::{Deserialize, Serialize};

use super::{ModeState, TerminalState};

/// A complete snapshot of the terminal state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Buffer lines in display order
    pub lines: Vec<String>,
    /// Mode flags
    pub modes: ModesSnapshot,
}

/// Snapshot of the mode flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModesSnapshot {
    #[serde(default, skip_serializing_if = "is_false")]
    pub booting: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub retro: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub destroyed: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub flash_eyes: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl From<&ModeState> for ModesSnapshot {
    fn from(modes: &ModeState) -> Self {
        Self {
            booting: modes.booting,
            retro: modes.retro,
            destroyed: modes.destroyed,
            flash_eyes: modes.flash_eyes,
        }
    }
}

impl From<ModesSnapshot> for ModeState {
    fn from(snapshot: ModesSnapshot) -> Self {
        Self {
            booting: snapshot.booting,
            retro: snapshot.retro,
            destroyed: snapshot.destroyed,
            flash_eyes: snapshot.flash_eyes,
        }
    }
}

impl Snapshot {
    /// Capture the current terminal state
    pub fn from_state(state: &TerminalState) -> Self {
        Self {
            lines: state.buffer.lines().to_vec(),
            modes: ModesSnapshot::from(&state.modes),
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Plain text, one buffer line per text line
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OutputBuffer;

    fn sample_state() -> TerminalState {
        TerminalState {
            buffer: OutputBuffer::from_lines(["$ retro", "Retro mode ON!"]),
            modes: ModeState {
                booting: false,
                retro: true,
                destroyed: false,
                flash_eyes: false,
            },
        }
    }

    #[test]
    fn test_snapshot_text() {
        let snapshot = Snapshot::from_state(&sample_state());
        assert_eq!(snapshot.to_text(), "$ retro\nRetro mode ON!\n");
    }

    #[test]
    fn test_snapshot_json_skips_false_flags() {
        let snapshot = Snapshot::from_state(&sample_state());
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"retro\": true"));
        assert!(!json.contains("destroyed"));
    }

    #[test]
    fn test_snapshot_json_restores_modes() {
        let state = sample_state();
        let json = Snapshot::from_state(&state).to_json().unwrap();
        let restored = Snapshot::from_json(&json).unwrap();
        assert_eq!(restored.lines, state.buffer.lines());
        assert_eq!(ModeState::from(restored.modes), state.modes);
    }
}
