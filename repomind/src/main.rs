//! repomind: a terminal demo of a repository question-answering assistant.
//!
//! Entry point for the `repomind` binary. Wires together the command line
//! (`cli`), config file (`config`), logging (`logging`), terminal lifecycle
//! (`tui`), unified event bus (`event`), application state (`app`) and the
//! renderer (`ui`).
//!
//! # Startup sequence
//!
//! 1. Parse flags, read the config file and resolve settings. Config errors
//!    are soft: they are logged and the defaults are used.
//! 2. Start logging. Nothing may print to the terminal after this point.
//! 3. Parse the initial location so a bad `--open` fails before the terminal
//!    is touched.
//! 4. `install_panic_hook()`, then `register_sigterm()`, then `init_tui()`.
//! 5. Create the event channel, spawn the input task and enter the first
//!    screen.
//!
//! `restore_tui()` runs after the event loop exits for every reason: quit key,
//! SIGTERM, or a closed channel. The panic hook covers panics.

mod app;
mod cli;
mod config;
mod event;
mod file_tree;
mod highlight;
mod logging;
mod palette;
mod theme;
mod tui;
mod ui;

use std::io;
use std::sync::atomic::Ordering;
use std::time::Duration;

use clap::Parser;
use repomind_core::route::Route;

use crate::event::AppEvent;
use crate::ui::keybindings::{self, KeyAction};

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = cli::Cli::parse();

    let config_file = cli.config.clone().unwrap_or_else(config::config_path);
    let (config, config_error) = match config::Config::load(&config_file) {
        Ok(config) => (config, None),
        Err(e) => (config::Config::default(), Some(e)),
    };
    let settings = config::Settings::resolve(&cli, config);

    logging::init(settings.log_file.as_deref())?;
    if let Some(e) = config_error {
        tracing::warn!("{e}; using defaults");
    }

    let route = Route::parse(&cli.open)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let theme = theme::Theme::from_name(&settings.theme);

    tui::install_panic_hook();
    let term_flag = tui::register_sigterm()?;
    let mut terminal = tui::init_tui()?;

    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    let mut rx = handler.rx;
    let mut state = app::AppState::new(settings.timings, settings.seed, handler.tx, route);

    // Exits only via `break` so `restore_tui()` below is always reached.
    let result = 'event_loop: loop {
        tokio::select! {
            // Heartbeat: a quiet terminal would otherwise block in recv() and
            // never look at the SIGTERM flag.
            _ = tokio::time::sleep(Duration::from_millis(50)) => {}
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(AppEvent::Render) => {
                        if let Err(e) = terminal.draw(|frame| ui::render(frame, &mut state, &theme)) {
                            break 'event_loop Err(e);
                        }
                    }
                    Some(AppEvent::Key(key)) => {
                        if keybindings::handle_key(key, &mut state) == KeyAction::Quit {
                            break 'event_loop Ok(());
                        }
                    }
                    Some(AppEvent::Mouse(mouse)) => {
                        keybindings::handle_mouse(mouse, &mut state);
                    }
                    // ratatui picks up the new size on the next draw.
                    Some(AppEvent::Resize(_, _)) => {}
                    Some(AppEvent::Quit) | None => break 'event_loop Ok(()),
                    Some(other) => state.apply(other),
                }
            }
        }
        if term_flag.load(Ordering::Relaxed) {
            tracing::info!("SIGTERM received");
            break 'event_loop Ok(());
        }
    };

    tui::restore_tui()?;
    tracing::info!("exiting");
    result
}
