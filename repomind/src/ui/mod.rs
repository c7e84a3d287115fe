//! UI rendering module for repomind.
//!
//! `render()` is the single entry point called by the event loop's
//! `terminal.draw()` closure. It draws the active screen, the status bar and
//! then any overlay on top.

mod chat;
mod command_palette;
mod file_tree;
mod help;
pub mod keybindings;
mod landing;
mod layout;
mod processing;

use ratatui::{style::Style, widgets::Block, Frame};

use crate::app::{AppState, Mode, Screen};
use crate::theme::Theme;
use layout::{compute_layout, render_status_bar};

/// Renders one complete frame.
///
/// Takes `state` mutably because the chat screen caches its viewport height
/// and clamps its scroll offset here.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background).fg(theme.text)),
        frame.area(),
    );
    let [main, status_bar] = compute_layout(frame);
    let spinner = state.spinner();

    match &mut state.screen {
        Screen::Landing(screen) => landing::render_landing(frame, main, screen, spinner, theme),
        Screen::Processing(screen) => processing::render_processing(frame, main, screen, theme),
        Screen::Chat(screen) => chat::render_chat(frame, main, screen, spinner, theme),
    }

    render_status_bar(frame, status_bar, state, theme);

    match state.mode {
        Mode::CommandPalette => command_palette::render_command_palette(frame, &state.palette, theme),
        Mode::HelpOverlay => help::render_help_overlay(frame, theme, state.help_scroll),
        Mode::Normal => {}
    }
}
