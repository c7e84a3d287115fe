//! Shared layout helpers: panel blocks and the status bar.
//!
//! Pure layout arithmetic; no application state is mutated here.

use ratatui::{
    layout::{Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
    Frame,
};

use crate::app::{AppState, Mode, Screen};
use crate::theme::Theme;

/// Returns `[main, status_bar]` for the current frame.
pub fn compute_layout(frame: &Frame) -> [Rect; 2] {
    frame
        .area()
        .layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]))
}

/// The inner `Rect` of a bordered panel.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin {
        vertical: 1,
        horizontal: 1,
    })
}

/// Builds a bordered `Block` for a panel.
///
/// Focused panels get a thick border in the active color. `MergeStrategy::Fuzzy`
/// keeps junctions correct when thick and plain borders touch.
pub fn panel_block<'a>(title: &'a str, is_focused: bool, theme: &'a Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused {
        BorderType::Thick
    } else {
        BorderType::Plain
    };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

fn key_hints(state: &AppState) -> &'static str {
    match (state.mode, &state.screen) {
        (Mode::HelpOverlay, _) => "j/k scroll · Esc close",
        (Mode::CommandPalette, _) => "↑/↓ select · Enter run · Esc close",
        (Mode::Normal, Screen::Landing(_)) => "Enter analyze · Esc quit · F1 help",
        (Mode::Normal, Screen::Processing(_)) => "q quit · F1 help",
        (Mode::Normal, Screen::Chat(_)) => {
            "Enter send · Ctrl-K commands · Ctrl-B sidebar · Tab focus · F1 help"
        }
    }
}

/// Renders the 1-row status bar: screen badge, location, then a notice or
/// the key hints for the active mode.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let badge = Span::styled(
        format!(" {} ", state.screen.name()),
        Style::default()
            .fg(theme.status_mode)
            .add_modifier(Modifier::BOLD),
    );
    let location = Span::raw(format!(" {} ", state.screen.route().to_location()));
    let tail = match &state.notice {
        Some(notice) => Span::styled(
            format!(" {notice}"),
            Style::default().fg(theme.accent_soft),
        ),
        None => Span::styled(
            format!(" {}", key_hints(state)),
            Style::default().fg(theme.text_muted),
        ),
    };

    frame.render_widget(
        Paragraph::new(Line::from(vec![badge, location, tail]))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
