//! roomchat — a text-mode chat screen.
//!
//! Shows, for the current room, the topic, a scrolling message log, the
//! participant list, a status line, and a single-line input.
//!
//! # Usage
//!
//! ```bash
//! roomchat                          # Start in the info room
//! roomchat '#rust' '#tokio'         # Open these rooms
//! roomchat --seed transcript.json   # Seed rooms from a JSON transcript
//! roomchat --nick louiz             # Post as "louiz"
//! ```
//!
//! Logs go to `~/.local/share/roomchat/roomchat.log`; set `ROOMCHAT_LOG`
//! (e.g. `ROOMCHAT_LOG=debug`) to change the level.

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::cursor::Show;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use roomchat::app::ChatApp;
use roomchat::event;
use roomchat::ui::palette::Palette;
use roomchat::ui::screen::Screen;
use roomchat_core::config::AppConfig;
use roomchat_core::types::Room;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, warn};

/// How long to wait for a terminal event before redrawing anyway.
const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(250);

/// roomchat — text-mode chat screen.
#[derive(Parser, Debug)]
#[command(name = "roomchat", about = "Text-mode multi-room chat screen")]
struct Cli {
    /// Rooms to open at startup.
    rooms: Vec<String>,

    /// Nick for the messages you type. Overrides the config file.
    #[arg(short, long)]
    nick: Option<String>,

    /// Path to the configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON file with rooms (name, topic, participants, lines) to preload.
    #[arg(long)]
    seed: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => AppConfig::config_file_path().context("could not determine config directory")?,
    };
    let config = load_or_create_config(&config_path)?;
    let nick = cli.nick.clone().unwrap_or_else(|| config.nick.clone());

    let mut rooms = match &cli.seed {
        Some(path) => load_rooms(path)?,
        None => Vec::new(),
    };
    rooms.extend(cli.rooms.iter().map(Room::new));

    let (width, height) = crossterm::terminal::size().context("could not read terminal size")?;
    let screen = Screen::with_min_size(
        height,
        width,
        Palette::from_theme(&config.theme),
        config.min_height,
        config.min_width,
    )
    .context("terminal too small")?;
    let mut app = ChatApp::new(screen, nick, rooms);

    install_panic_hook(restore_terminal);
    let mut terminal = setup_terminal()?;
    info!(width, height, "roomchat started");

    let result = run(&mut terminal, &mut app);

    restore_terminal();
    if let Err(e) = &result {
        error!(error = %e, "roomchat exited with an error");
    }
    result
}

/// Draw, wait for an event, apply it; until the app asks to quit.
fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut ChatApp) -> Result<()> {
    while !app.should_quit() {
        app.draw(terminal)?;

        if crossterm::event::poll(EVENT_POLL_TIMEOUT)? {
            let event = crossterm::event::read()?;
            if let Some(action) = event::handle_event(&event) {
                app.handle_action(action);
            }
        }
    }
    Ok(())
}

fn load_rooms(path: &Path) -> Result<Vec<Room>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let rooms: Vec<Room> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse rooms from {}", path.display()))?;
    info!(path = %path.display(), count = rooms.len(), "loaded seed rooms");
    Ok(rooms)
}

/// Loads the config file, writing the defaults there on first run.
fn load_or_create_config(path: &Path) -> Result<AppConfig> {
    if let Some(config) = AppConfig::load_from(path)? {
        info!(path = %path.display(), "loaded config");
        return Ok(config);
    }

    info!("first run detected, creating default config");
    let config = AppConfig::default();
    match config.save_to(path) {
        Ok(()) => info!(path = %path.display(), "saved default config"),
        Err(e) => warn!(error = %e, "could not save default config"),
    }
    Ok(config)
}

/// Enters raw mode and the alternate screen. If a later step fails, the
/// earlier ones are undone before the error is returned.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("could not enable raw mode")?;
    execute!(io::stdout(), EnterAlternateScreen, EnableBracketedPaste)
        .and_then(|()| Terminal::new(CrosstermBackend::new(io::stdout())))
        .map_err(|e| {
            restore_terminal();
            anyhow::Error::new(e).context("could not set up the terminal")
        })
}

/// Leaves the alternate screen and raw mode. Also runs from the panic hook,
/// so failures are logged rather than returned.
fn restore_terminal() {
    if let Err(e) = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen, Show) {
        warn!(error = %e, "could not restore the terminal screen");
    }
    if let Err(e) = disable_raw_mode() {
        warn!(error = %e, "could not leave raw mode");
    }
}

/// Runs `restore` before the previous panic hook, so the panic message is
/// printed on the normal screen.
fn install_panic_hook(restore: fn()) {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore();
        previous(info);
    }));
}

/// Initializes file logging.
///
/// The terminal belongs to the UI, so nothing is written to stderr. The
/// `ROOMCHAT_LOG` env var controls the level (default: info). If the log
/// file can't be opened, logging stays off.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_env("ROOMCHAT_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    let file = AppConfig::data_dir().and_then(|dir| {
        std::fs::create_dir_all(&dir).ok()?;
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("roomchat.log"))
            .ok()
    });

    if let Some(file) = file {
        fmt()
            .with_env_filter(env_filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .init();
    }
}
