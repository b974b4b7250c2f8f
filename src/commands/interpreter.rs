//! Command interpreter
//!
//! Resolves one submitted input string against the reserved commands and
//! the command table, rewrites the output buffer, and flips mode flags.
//! Work that must happen outside the terminal state (timers, opening links)
//! is returned as [`Effect`]s for the caller to carry out.

use std::iter;

use tracing::debug;

use super::table::CommandTable;
use crate::core::{TerminalState, DEFAULT_HEADER};

/// Default profile opened by the `linkedin` command
pub const DEFAULT_PROFILE_URL: &str = "https://www.linkedin.com/in/cooperhoy";

const BOB_RESPONSE: [&str; 2] = ["Bob is watching you.", "Don't blink."];
const DESTROY_RESPONSE: [&str; 1] = ["💥 Terminal destroyed. Type \"clear\" to rebuild."];
const LINKEDIN_RESPONSE: [&str; 1] = ["Opening LinkedIn profile..."];

/// Commands handled by the interpreter itself, checked before the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reserved {
    Clear,
    Retro,
    Bob,
    Destroy,
    LinkedIn,
}

impl Reserved {
    /// Map a lowercased key to a reserved command
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "clear" => Some(Reserved::Clear),
            "retro" => Some(Reserved::Retro),
            "bob" => Some(Reserved::Bob),
            "destroy" => Some(Reserved::Destroy),
            "linkedin" => Some(Reserved::LinkedIn),
            _ => None,
        }
    }
}

/// How an input was classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Blank input; nothing changed
    Ignored,
    /// Reserved command or table entry
    Recognized,
    /// Unknown key; the buffer shows the advisory line
    Unrecognized,
}

/// Side effects the session performs after a dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Arm the timer that clears `flash_eyes`
    ScheduleFlashReset,
    /// Open an external resource, fire-and-forget
    OpenLink(String),
}

/// Result of dispatching one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub outcome: Outcome,
    pub effects: Vec<Effect>,
}

impl Dispatch {
    fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            effects: Vec::new(),
        }
    }

    fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Whether the input matched a reserved command or table entry
    pub fn is_recognized(&self) -> bool {
        self.outcome == Outcome::Recognized
    }
}

/// The command interpreter
#[derive(Debug, Clone)]
pub struct Interpreter {
    table: CommandTable,
    header: String,
    profile_url: String,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(CommandTable::builtin(), DEFAULT_HEADER, DEFAULT_PROFILE_URL)
    }
}

impl Interpreter {
    /// Create an interpreter over a table, header line, and profile link
    pub fn new(table: CommandTable, header: impl Into<String>, profile_url: impl Into<String>) -> Self {
        Self {
            table,
            header: header.into(),
            profile_url: profile_url.into(),
        }
    }

    /// The header line `clear` restores
    pub fn header(&self) -> &str {
        &self.header
    }

    /// The command table
    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    /// Dispatch one raw input string against the terminal state
    pub fn dispatch(&self, raw: &str, state: &mut TerminalState) -> Dispatch {
        let input = raw.trim();
        if input.is_empty() {
            return Dispatch::new(Outcome::Ignored);
        }

        let key = input.to_lowercase();
        let echo = format!("$ {input}");

        if let Some(reserved) = Reserved::from_key(&key) {
            debug!(?reserved, "reserved command");
            return self.dispatch_reserved(reserved, echo, state);
        }

        match self.table.get(&key) {
            Some(response) => {
                debug!(key = %key, lines = response.len(), "table command");
                state
                    .buffer
                    .replace(iter::once(echo).chain(response.iter().map(|line| line.to_string())));
                Dispatch::new(Outcome::Recognized)
            }
            None => {
                debug!(input = %input, "unknown command");
                state.buffer.replace([
                    echo,
                    format!("Unknown command: \"{input}\". Type \"help\"."),
                ]);
                Dispatch::new(Outcome::Unrecognized)
            }
        }
    }

    fn dispatch_reserved(&self, reserved: Reserved, echo: String, state: &mut TerminalState) -> Dispatch {
        let recognized = Dispatch::new(Outcome::Recognized);
        match reserved {
            Reserved::Clear => {
                state.modes.reset_effects();
                state.buffer.reset(self.header.as_str());
                recognized
            }
            Reserved::Retro => {
                let on = state.modes.toggle_retro();
                let status = if on { "Retro mode ON!" } else { "Retro mode OFF!" };
                state.buffer.replace([echo, status.to_string()]);
                recognized
            }
            Reserved::Bob => {
                state.modes.flash_eyes = true;
                state
                    .buffer
                    .replace(iter::once(echo).chain(BOB_RESPONSE.iter().map(|line| line.to_string())));
                recognized.with_effect(Effect::ScheduleFlashReset)
            }
            Reserved::Destroy => {
                state.modes.destroyed = true;
                state
                    .buffer
                    .replace(iter::once(echo).chain(DESTROY_RESPONSE.iter().map(|line| line.to_string())));
                recognized
            }
            Reserved::LinkedIn => {
                state
                    .buffer
                    .replace(iter::once(echo).chain(LINKEDIN_RESPONSE.iter().map(|line| line.to_string())));
                recognized.with_effect(Effect::OpenLink(self.profile_url.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ModeState;

    fn ready_state() -> TerminalState {
        let mut state = TerminalState::default();
        state.modes.finish_boot();
        state
    }

    fn run(interpreter: &Interpreter, state: &mut TerminalState, input: &str) -> Dispatch {
        interpreter.dispatch(input, state)
    }

    #[test]
    fn test_blank_input_is_noop() {
        let interpreter = Interpreter::default();
        let mut state = ready_state();
        let before = state.clone();

        for input in ["", "   ", "\t \n"] {
            let dispatch = run(&interpreter, &mut state, input);
            assert_eq!(dispatch.outcome, Outcome::Ignored);
            assert!(dispatch.effects.is_empty());
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let interpreter = Interpreter::default();
        let mut reference = ready_state();
        run(&interpreter, &mut reference, "help");
        let expected = &reference.buffer.lines()[1..];

        for input in ["HELP", "Help", " help "] {
            let mut state = ready_state();
            run(&interpreter, &mut state, input);
            assert_eq!(&state.buffer.lines()[1..], expected);
        }
    }

    #[test]
    fn test_echo_uses_trimmed_original_input() {
        let interpreter = Interpreter::default();
        let mut state = ready_state();
        run(&interpreter, &mut state, "  About  ");
        assert_eq!(state.buffer.lines()[0], "$ About");
    }

    #[test]
    fn test_table_command_replaces_buffer() {
        let interpreter = Interpreter::default();
        let mut state = ready_state();
        run(&interpreter, &mut state, "whoami");
        run(&interpreter, &mut state, "education");

        let mut expected = vec!["$ education".to_string()];
        expected.extend(
            interpreter
                .table()
                .get("education")
                .unwrap()
                .iter()
                .map(|s| s.to_string()),
        );
        assert_eq!(state.buffer.lines(), expected.as_slice());
    }

    #[test]
    fn test_unknown_command_literal() {
        let interpreter = Interpreter::default();
        let mut state = ready_state();
        let dispatch = run(&interpreter, &mut state, "zzz");
        assert_eq!(dispatch.outcome, Outcome::Unrecognized);
        assert_eq!(
            state.buffer.lines(),
            ["$ zzz", "Unknown command: \"zzz\". Type \"help\"."]
        );
    }

    #[test]
    fn test_unknown_command_keeps_original_case() {
        let interpreter = Interpreter::default();
        let mut state = ready_state();
        run(&interpreter, &mut state, " FooBar ");
        assert_eq!(
            state.buffer.lines()[1],
            "Unknown command: \"FooBar\". Type \"help\"."
        );
    }

    #[test]
    fn test_no_prefix_matching() {
        let interpreter = Interpreter::default();
        let mut state = ready_state();
        assert_eq!(run(&interpreter, &mut state, "hel").outcome, Outcome::Unrecognized);
        assert_eq!(run(&interpreter, &mut state, "helpme").outcome, Outcome::Unrecognized);
        assert_eq!(run(&interpreter, &mut state, "clear all").outcome, Outcome::Unrecognized);
    }

    #[test]
    fn test_retro_alternates() {
        let interpreter = Interpreter::default();
        let mut state = ready_state();

        run(&interpreter, &mut state, "retro");
        assert!(state.modes.retro);
        assert_eq!(state.buffer.lines(), ["$ retro", "Retro mode ON!"]);

        run(&interpreter, &mut state, "RETRO");
        assert!(!state.modes.retro);
        assert_eq!(state.buffer.lines(), ["$ RETRO", "Retro mode OFF!"]);
    }

    #[test]
    fn test_retro_survives_other_commands() {
        let interpreter = Interpreter::default();
        let mut state = ready_state();
        run(&interpreter, &mut state, "retro");
        run(&interpreter, &mut state, "about");
        run(&interpreter, &mut state, "nope");
        assert!(state.modes.retro);
    }

    #[test]
    fn test_bob_sets_flash_and_requests_reset() {
        let interpreter = Interpreter::default();
        let mut state = ready_state();
        let dispatch = run(&interpreter, &mut state, "bob");
        assert!(state.modes.flash_eyes);
        assert_eq!(dispatch.effects, vec![Effect::ScheduleFlashReset]);
        assert_eq!(state.buffer.len(), 3);
        assert_eq!(state.buffer.lines()[0], "$ bob");
    }

    #[test]
    fn test_destroy_is_one_way() {
        let interpreter = Interpreter::default();
        let mut state = ready_state();
        run(&interpreter, &mut state, "destroy");
        assert!(state.modes.destroyed);
        assert_eq!(state.buffer.len(), 2);

        for input in ["help", "retro", "retro", "bob", "destroy", "linkedin", "xyz"] {
            run(&interpreter, &mut state, input);
            assert!(state.modes.destroyed, "{input} reverted destroyed");
        }

        run(&interpreter, &mut state, "clear");
        assert!(!state.modes.destroyed);
    }

    #[test]
    fn test_linkedin_emits_open_link() {
        let interpreter = Interpreter::new(CommandTable::builtin(), "hi", "https://example.com/me");
        let mut state = ready_state();
        let dispatch = run(&interpreter, &mut state, "LinkedIn");
        assert_eq!(
            dispatch.effects,
            vec![Effect::OpenLink("https://example.com/me".to_string())]
        );
        assert_eq!(state.buffer.lines()[0], "$ LinkedIn");
        assert_eq!(state.modes, ModeState::ready());
    }

    #[test]
    fn test_clear_resets_everything_but_booting() {
        let interpreter = Interpreter::default();
        let mut state = ready_state();
        for input in ["retro", "bob", "destroy", "about"] {
            run(&interpreter, &mut state, input);
        }

        let dispatch = run(&interpreter, &mut state, "Clear");
        assert!(dispatch.is_recognized());
        assert_eq!(state.buffer.lines(), [DEFAULT_HEADER]);
        assert_eq!(state.modes, ModeState::ready());
    }

    #[test]
    fn test_clear_does_not_leave_booting() {
        let interpreter = Interpreter::default();
        let mut state = TerminalState::default();
        run(&interpreter, &mut state, "clear");
        assert!(state.modes.booting);
    }
}
