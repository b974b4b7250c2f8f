//! Command handling
//!
//! The static command table and the interpreter that resolves submitted
//! input against it.

mod interpreter;
mod table;

pub use interpreter::{Dispatch, Effect, Interpreter, Outcome, Reserved, DEFAULT_PROFILE_URL};
pub use table::{CommandEntry, CommandTable};
