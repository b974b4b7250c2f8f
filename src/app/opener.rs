//! External link opening
//!
//! Opening a link is fire-and-forget: failures are logged and never reach
//! the terminal buffer.

use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

/// Opens an external resource
pub trait LinkOpener {
    fn open(&mut self, url: &str);
}

/// Opens links with the platform's default handler
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl SystemOpener {
    fn command(url: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", url]);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }
}

impl LinkOpener for SystemOpener {
    fn open(&mut self, url: &str) {
        let spawned = Self::command(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(child) => debug!(pid = child.id(), url, "opened link"),
            Err(e) => warn!("Failed to open {}: {}", url, e),
        }
    }
}

/// Drops every link
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopOpener;

impl LinkOpener for NoopOpener {
    fn open(&mut self, url: &str) {
        debug!(url, "link opening disabled");
    }
}

/// Records opened links; clones share the same record
#[derive(Debug, Default, Clone)]
pub struct RecordingOpener {
    opened: Arc<Mutex<Vec<String>>>,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Links opened so far, oldest first
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl LinkOpener for RecordingOpener {
    fn open(&mut self, url: &str) {
        if let Ok(mut opened) = self.opened.lock() {
            opened.push(url.to_string());
        }
    }
}
