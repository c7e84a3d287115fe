//! Command palette overlay: query line plus the grouped, filtered commands.

use ratatui::{
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};

use crate::palette::CommandPalette;
use crate::theme::Theme;

pub fn render_command_palette(frame: &mut Frame, palette: &CommandPalette, theme: &Theme) {
    let area = frame
        .area()
        .centered(Constraint::Max(60), Constraint::Percentage(60));
    frame.render_widget(Clear, area);

    let block = Block::bordered()
        .title(" Commands ")
        .border_style(Style::default().fg(theme.border_active))
        .style(Style::default().bg(theme.surface_alt));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [query_row, list_area] =
        inner.layout(&Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]));

    let query = if palette.query().is_empty() {
        Span::styled(
            "Type a command or search...",
            Style::default().fg(theme.text_muted),
        )
    } else {
        Span::styled(palette.query(), Style::default().fg(theme.text))
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("❯ ", Style::default().fg(theme.accent_soft)),
            query,
        ])),
        query_row,
    );

    let matches = palette.matches();
    let mut lines = Vec::new();
    if matches.is_empty() {
        lines.push(Line::styled(
            "No results found.",
            Style::default().fg(theme.text_muted),
        ));
    }
    let mut group = "";
    for (i, command) in matches.iter().enumerate() {
        if command.group != group {
            group = command.group;
            lines.push(Line::styled(
                group,
                Style::default()
                    .fg(theme.text_muted)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        let selected = i == palette.selected();
        let style = if selected {
            Style::default()
                .fg(theme.text)
                .bg(theme.accent_dim)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        let mut spans = vec![Span::styled(format!("  {}", command.label), style)];
        if let Some(shortcut) = command.shortcut {
            spans.push(Span::styled(
                format!("  {shortcut}"),
                Style::default().fg(theme.text_muted),
            ));
        }
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines), list_area);
}
