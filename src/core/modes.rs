//! Terminal mode flags
//!
//! Persistent and transient flags that affect how the terminal is drawn.
//! The flags are independent: any combination is valid.

use serde::{Deserialize, Serialize};

/// Terminal mode flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeState {
    /// Boot screen still showing
    /// One-way: cleared by the boot timer and never set again in a session
    pub booting: bool,

    /// Retro frame tint
    /// Toggled by `retro`; only decorative parameters change
    pub retro: bool,

    /// Screen shattered
    /// Set by `destroy`, cleared only by `clear`
    pub destroyed: bool,

    /// Transient eye flash
    /// Set by `bob` and reverted by a timer
    pub flash_eyes: bool,
}

impl Default for ModeState {
    fn default() -> Self {
        Self {
            booting: true,
            retro: false,
            destroyed: false,
            flash_eyes: false,
        }
    }
}

impl ModeState {
    /// Mode state of a session that has already finished booting
    pub fn ready() -> Self {
        Self {
            booting: false,
            ..Self::default()
        }
    }

    /// Clear every flag except `booting`
    pub fn reset_effects(&mut self) {
        self.retro = false;
        self.destroyed = false;
        self.flash_eyes = false;
    }

    /// Leave the boot screen
    pub fn finish_boot(&mut self) {
        self.booting = false;
    }

    /// Flip the retro flag and return the new value
    pub fn toggle_retro(&mut self) -> bool {
        self.retro = !self.retro;
        self.retro
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_modes() {
        let modes = ModeState::default();
        assert!(modes.booting);
        assert!(!modes.retro);
        assert!(!modes.destroyed);
        assert!(!modes.flash_eyes);
    }

    #[test]
    fn test_reset_keeps_booting() {
        let mut modes = ModeState {
            booting: true,
            retro: true,
            destroyed: true,
            flash_eyes: true,
        };
        modes.reset_effects();
        assert_eq!(modes, ModeState::default());

        modes.finish_boot();
        modes.retro = true;
        modes.reset_effects();
        assert_eq!(modes, ModeState::ready());
    }

    #[test]
    fn test_toggle_retro_alternates() {
        let mut modes = ModeState::ready();
        assert!(modes.toggle_retro());
        assert!(!modes.toggle_retro());
        assert!(!modes.retro);
    }

    #[test]
    fn test_flags_coexist() {
        let mut modes = ModeState::ready();
        modes.retro = true;
        modes.destroyed = true;
        assert!(modes.retro && modes.destroyed);
    }
}
