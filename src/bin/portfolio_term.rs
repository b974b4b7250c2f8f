//! Portfolio Terminal Runner
//!
//! Drives a session from stdin: each line is submitted as a command, and the
//! resulting state is printed as text or a JSON snapshot. Optionally writes
//! each rendered surface as a PPM frame.

use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use portfolio_term::app::{init_logging, Config, FlashPolicy, LinkOpener, NoopOpener, SystemOpener};
use portfolio_term::{PixelSurface, Presentation, Session, Submission};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "portfolio-term")]
#[command(about = "Command-driven portfolio terminal")]
#[command(version)]
struct CliArgs {
    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Viewport width in pixels
    #[arg(short, long, value_name = "PIXELS")]
    width: Option<u32>,

    /// Force the compact text layout
    #[arg(long)]
    compact: bool,

    /// Write each rendered surface as a PPM file into DIR
    #[arg(long, value_name = "DIR")]
    frames: Option<PathBuf>,

    /// Print JSON snapshots instead of text
    #[arg(short, long)]
    json: bool,

    /// Skip the boot screen
    #[arg(long)]
    no_boot_wait: bool,

    /// Repeated flash handling (restart-window, independent)
    #[arg(long, value_name = "POLICY")]
    flash_policy: Option<String>,

    /// Do not open external links
    #[arg(long)]
    no_open: bool,
}

fn main() -> ExitCode {
    init_logging("warn");
    let args = CliArgs::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Load configuration with precedence: CLI > env > file > defaults
fn load_config(args: &CliArgs) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(),
    };

    if let Some(name) = &args.flash_policy {
        config.timing.flash_policy =
            FlashPolicy::from_name(name).ok_or_else(|| format!("unknown flash policy '{name}'"))?;
    }

    config.validate()?;
    Ok(config)
}

fn run(args: &CliArgs, config: &Config) -> io::Result<()> {
    let opener: Box<dyn LinkOpener> = if args.no_open {
        Box::new(NoopOpener)
    } else {
        Box::new(SystemOpener)
    };

    let start = Instant::now();
    let mut session = Session::new(config, opener);

    let width = if args.compact {
        0
    } else {
        args.width.unwrap_or(config.viewport.compact_threshold)
    };
    let layout = session.resize(width);
    tracing::debug!(width, ?layout, "viewport");

    if let Some(dir) = &args.frames {
        std::fs::create_dir_all(dir)?;
    }

    if args.no_boot_wait {
        session.skip_boot();
    } else if let Some(deadline) = session.next_deadline() {
        if let Presentation::Booting(surface) = session.presentation() {
            write_frame(args.frames.as_deref(), 0, &surface)?;
        }
        std::thread::sleep(deadline.saturating_sub(start.elapsed()));
    }
    session.advance(start.elapsed());

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let stdin = io::stdin();

    for (index, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        session.advance(start.elapsed());

        if session.submit(&line) == Submission::Rejected {
            tracing::warn!("Input dropped while booting: {:?}", line);
            continue;
        }

        if args.json {
            let json = session
                .snapshot()
                .to_json()
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            writeln!(out, "{}", json)?;
        } else {
            match session.presentation() {
                Presentation::Compact(lines) => {
                    for text in &lines {
                        writeln!(out, "{}", text)?;
                    }
                }
                Presentation::Surface(_) | Presentation::Booting(_) => {
                    write!(out, "{}", session.snapshot().to_text())?;
                }
            }
            writeln!(out)?;
        }

        if args.frames.is_some() {
            write_frame(args.frames.as_deref(), index + 1, &session.render())?;
        }
    }

    out.flush()?;
    let cancelled = session.teardown();
    tracing::debug!(cancelled, "exiting");
    Ok(())
}

fn write_frame(dir: Option<&Path>, index: usize, surface: &PixelSurface) -> io::Result<()> {
    let Some(dir) = dir else {
        return Ok(());
    };
    let path = dir.join(format!("frame_{:04}.ppm", index));
    let mut file = BufWriter::new(File::create(&path)?);
    surface.write_ppm(&mut file)?;
    file.flush()?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}
