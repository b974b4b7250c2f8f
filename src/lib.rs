//! Portfolio Terminal Library
//!
//! A command-driven pseudo-terminal for a personal portfolio. Visitors type
//! fixed commands and read canned profile text, rendered either as a plain
//! text list or onto a pixel surface that textures a 3D monitor.
//!
//! - `core`: Output buffer, mode flags, snapshots
//! - `commands`: Command table and interpreter
//! - `renderer`: Text layout and pixel rasterization
//! - `scheduler`, `boot`: Virtual-clock timers and the boot transition
//! - `viewport`: Compact vs. surface presentation
//! - `session`: Ties the above together
//! - `app`: Configuration, logging, and link opening

pub mod app;
pub mod boot;
pub mod commands;
pub mod core;
pub mod renderer;
pub mod scheduler;
pub mod session;
pub mod viewport;

pub use app::Config;
pub use commands::{Dispatch, Effect, Interpreter, Outcome};
pub use core::{ModeState, OutputBuffer, Snapshot, TerminalState};
pub use renderer::{PixelSurface, Rasterizer, SceneFrame};
pub use session::{Presentation, Session, Submission};
pub use viewport::{Layout, Viewport};
