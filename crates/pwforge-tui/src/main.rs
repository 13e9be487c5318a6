//! `pwforge` — terminal random password generator.
//!
//! Four character-class toggles and a length gauge (8-32) drive a live
//! password with a color-coded strength rating. Every change regenerates
//! immediately; `c` copies the password through the terminal clipboard
//! (OSC 52) with a short-lived confirmation.
//!
//! Logs are written to a file (default `<temp dir>/pwforge.log`) to avoid
//! corrupting the terminal UI. Password contents are never logged.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod clipboard;
mod component;
mod event;
mod feedback;
mod screens;
mod state;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use pwforge_config::Config;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::{App, AppSettings};

const DEFAULT_LOG_NAME: &str = "pwforge.log";

/// Random password generator with live strength rating.
#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
#[command(name = "pwforge", version, about)]
struct Cli {
    /// Initial password length (8-32)
    #[arg(short = 'L', long, value_parser = clap::value_parser!(u8).range(8..=32))]
    length: Option<u8>,

    /// Start with uppercase letters disabled
    #[arg(long)]
    no_upper: bool,

    /// Start with lowercase letters disabled
    #[arg(long)]
    no_lower: bool,

    /// Start with digits disabled
    #[arg(long)]
    no_digits: bool,

    /// Start with special characters disabled
    #[arg(long)]
    no_symbols: bool,

    /// Config file (defaults to the platform config dir)
    #[arg(short, long, env = "PWFORGE_CONFIG")]
    config: Option<PathBuf>,

    /// Disable mouse capture
    #[arg(long)]
    no_mouse: bool,

    /// Log file path (defaults to <temp dir>/pwforge.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "pwforge={log_level},pwforge_core={log_level},pwforge_config={log_level}"
        ))
    });

    let log_file = cli
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_NAME));
    let log_dir = log_file
        .parent()
        .map_or_else(std::env::temp_dir, std::path::Path::to_path_buf);
    let log_filename = log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new(DEFAULT_LOG_NAME));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Resolve startup settings. Priority: CLI flags > env > config file > defaults.
fn build_settings(cli: &Cli) -> AppSettings {
    let config = match &cli.config {
        Some(path) => pwforge_config::load_config_from(path).unwrap_or_else(|e| {
            warn!(error = %e, path = %path.display(), "falling back to default config");
            Config::default()
        }),
        None => pwforge_config::load_config_or_default(),
    };

    let mut generator = config.generator_config();
    if let Some(length) = cli.length {
        generator.length = usize::from(length);
    }
    if cli.no_upper {
        generator.use_upper = false;
    }
    if cli.no_lower {
        generator.use_lower = false;
    }
    if cli.no_digits {
        generator.use_digits = false;
    }
    if cli.no_symbols {
        generator.use_symbols = false;
    }

    AppSettings {
        generator,
        copy_feedback: config.copy_feedback(),
        mouse: config.ui.mouse && !cli.no_mouse,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let settings = build_settings(&cli);
    info!(
        length = settings.generator.length,
        classes = settings.generator.enabled_classes().count(),
        mouse = settings.mouse,
        "starting pwforge"
    );

    let mut app = App::new(settings);
    app.run().await?;

    Ok(())
}
