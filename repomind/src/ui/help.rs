//! Help overlay renderer.
//!
//! Draws a centred modal over the current screen. `Clear` erases the area
//! first so the overlay is drawn inside the same `terminal.draw()` call as
//! everything else.

use ratatui::{
    layout::Constraint,
    style::{Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme::Theme;

/// Renders the help overlay, scrolled by `help_scroll` rows.
///
/// Skipped on terminals narrower than 40 columns.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 40 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(70), Constraint::Percentage(80));
    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help · j/k scroll, F1 or Esc to dismiss ")
        .border_style(Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text(theme))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

fn build_help_text(theme: &Theme) -> Text<'static> {
    let heading = |s: &'static str| {
        Line::styled(
            s,
            Style::default()
                .fg(theme.accent_soft)
                .add_modifier(Modifier::BOLD),
        )
    };
    Text::from(vec![
        heading("Landing"),
        Line::from("  type          Enter a repository, e.g. octocat/Hello-World"),
        Line::from("  Enter         Analyze the repository"),
        Line::from("  Esc           Quit"),
        Line::from(""),
        heading("Processing"),
        Line::from("  q / Esc       Quit"),
        Line::from(""),
        heading("Chat"),
        Line::from("  Enter         Send the message"),
        Line::from("  Tab           Switch focus between input and file tree"),
        Line::from("  j/k, ↑/↓      Move in the file tree"),
        Line::from("  Enter/Space   Expand or collapse the selected folder"),
        Line::from("  PgUp / PgDn   Scroll the conversation"),
        Line::from("  Ctrl-B        Toggle the file tree"),
        Line::from("  Ctrl-K        Open the command palette"),
        Line::from(""),
        heading("Command palette"),
        Line::from("  type          Filter commands"),
        Line::from("  ↑ / ↓         Select"),
        Line::from("  Enter         Run the selected command"),
        Line::from("  Esc           Close"),
        Line::from(""),
        heading("General"),
        Line::from("  F1            Open / close this help"),
        Line::from("  Ctrl-C        Quit from anywhere"),
    ])
}
