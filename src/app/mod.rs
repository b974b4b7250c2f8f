//! Application glue module
//!
//! Configuration, logging setup, and the link opener used by the binary.

mod config;
mod logging;
mod opener;

pub use config::{
    default_config_path, Config, ConfigError, FlashPolicy, SurfaceConfig, TerminalConfig, TimingConfig,
    ViewportConfig, CONFIG_ENV,
};
pub use logging::init_logging;
pub use opener::{LinkOpener, NoopOpener, RecordingOpener, SystemOpener};
