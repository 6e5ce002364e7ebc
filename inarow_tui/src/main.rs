use std::fs::File;
use std::io::{stdout, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use inarow::{GameConfig, ScreenController};
use ratatui::{
    crossterm::{
        event::{self, DisableMouseCapture, EnableMouseCapture},
        terminal::{
            self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
        },
        ExecutableCommand,
    },
    prelude::*,
};
use tracing::debug;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod input;
mod ui;

const POLL_TIMEOUT: Duration = Duration::from_millis(16);

#[derive(Parser)]
struct Args {
    /// Path to a JSON config file. Fields it leaves out keep their terminal defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Board columns
    #[arg(long)]
    width: Option<usize>,

    /// Board rows
    #[arg(long)]
    height: Option<usize>,

    /// How many marks in a row win the game
    #[arg(short = 'k', long)]
    win_length: Option<usize>,

    /// Seconds before a won game starts over
    #[arg(long)]
    reset_delay: Option<f64>,

    /// Write logs to this file. The terminal belongs to the game, so nothing is logged without it
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

impl Args {
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load_over(path, &GameConfig::terminal())?,
            None => GameConfig::terminal(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(win_length) = self.win_length {
            config.win_length = win_length;
        }
        if let Some(secs) = self.reset_delay {
            config.auto_reset_delay = Duration::try_from_secs_f64(secs)
                .with_context(|| format!("Invalid reset delay {}", secs))?;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        initialize_logging(args.log_level, path)?;
    }

    let config = args.game_config()?;
    check_terminal_size(&config)?;
    debug!(?config, "Config in use");

    let result = setup_terminal()
        .and_then(|mut terminal| run(&mut terminal, ScreenController::new(config)));
    first_error(result, restore_terminal())
}

// The game's own error takes precedence over one from restoring the terminal.
fn first_error(result: anyhow::Result<()>, restored: anyhow::Result<()>) -> anyhow::Result<()> {
    result?;
    restored
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut controller: ScreenController,
) -> anyhow::Result<()> {
    while !controller.should_exit() {
        terminal.draw(|frame| ui::draw(frame, &controller))?;

        // Wait a frame for the first event, then drain whatever else is queued
        let mut timeout = POLL_TIMEOUT;
        while event::poll(timeout)? {
            if let Some(event) = input::translate(&event::read()?, controller.screen()) {
                controller.dispatch(event);
            }
            timeout = Duration::ZERO;
        }
        controller.tick();
    }
    Ok(())
}

fn check_terminal_size(config: &GameConfig) -> anyhow::Result<()> {
    let (columns, rows) = terminal::size().context("Could not query the terminal size")?;
    let (needed_columns, needed_rows) = config.required_area();
    if u32::from(columns) < needed_columns || u32::from(rows) < needed_rows {
        bail!(
            "The terminal is {}x{}, but this board needs at least {}x{}",
            columns,
            rows,
            needed_columns,
            needed_rows
        );
    }
    Ok(())
}

// Partial setup is undone by restore_terminal, which main always calls.
fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout()))?)
}

// Attempts every step even if an earlier one fails, and reports the first failure.
fn restore_terminal() -> anyhow::Result<()> {
    let mouse = stdout().execute(DisableMouseCapture).map(drop);
    let screen = stdout().execute(LeaveAlternateScreen).map(drop);
    let raw_mode = disable_raw_mode();
    mouse
        .and(screen)
        .and(raw_mode)
        .context("Could not restore the terminal")
}

fn initialize_logging(level: LevelFilter, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Could not create log file '{}'", path.display()))?;

    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(filter)
        .init();
    Ok(())
}
