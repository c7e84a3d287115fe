//! Processing screen: stage cards, progress gauge and the fake terminal.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Gauge, Paragraph},
    Frame,
};

use repomind_core::stage::Stage;

use crate::app::ProcessingScreen;
use crate::theme::Theme;
use crate::ui::layout::panel_block;

pub fn render_processing(frame: &mut Frame, area: Rect, screen: &ProcessingScreen, theme: &Theme) {
    let snapshot = &screen.snapshot;
    let column = area.centered(Constraint::Max(110), Constraint::Length(19));
    let [heading, repo, _, cards, _, gauge, _, terminal] = column.layout(&Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(9),
    ]));

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Processing Repository",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .centered(),
        heading,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            snapshot.repo.as_str(),
            Style::default().fg(theme.text_muted),
        ))
        .centered(),
        repo,
    );

    render_stage_cards(frame, cards, snapshot.stage, theme);

    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(theme.accent).bg(theme.surface))
            .ratio((snapshot.progress / 100.0).clamp(0.0, 1.0))
            .label(format!("{:.0}%", snapshot.progress)),
        gauge,
    );

    render_terminal(frame, terminal, &snapshot.status_log, theme);
}

fn render_stage_cards(frame: &mut Frame, area: Rect, current: Stage, theme: &Theme) {
    let slots: [Rect; 5] = area.layout(&Layout::horizontal([Constraint::Fill(1); 5]).spacing(1));
    for (stage, slot) in Stage::ALL.into_iter().zip(slots) {
        let (border, icon_style, label_style, border_type) = if stage == current {
            (
                theme.accent,
                Style::default()
                    .fg(theme.text)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD),
                Style::default().fg(theme.text),
                BorderType::Thick,
            )
        } else if stage.index() < current.index() {
            (
                theme.accent_dim,
                Style::default().fg(theme.text).bg(theme.accent_dim),
                Style::default().fg(theme.text),
                BorderType::Plain,
            )
        } else {
            (
                theme.border_inactive,
                Style::default().fg(theme.text_muted).bg(theme.surface),
                Style::default().fg(theme.text_muted),
                BorderType::Plain,
            )
        };
        let card = Paragraph::new(vec![
            Line::from(Span::styled(format!(" {} ", stage.icon()), icon_style)),
            Line::from(Span::styled(stage.label(), label_style)),
        ])
        .centered()
        .block(
            Block::bordered()
                .border_type(border_type)
                .border_style(Style::default().fg(border))
                .style(Style::default().bg(theme.surface_alt)),
        );
        frame.render_widget(card, slot);
    }
}

/// The status log, newest entry last with a cursor after it.
fn render_terminal(frame: &mut Frame, area: Rect, log: &[String], theme: &Theme) {
    let mut lines = vec![Line::from(vec![
        Span::styled("● ", Style::default().fg(Color::Red)),
        Span::styled("● ", Style::default().fg(Color::Yellow)),
        Span::styled("● ", Style::default().fg(Color::Green)),
        Span::styled("Terminal", Style::default().fg(theme.text_muted)),
    ])];
    let last = log.len().saturating_sub(1);
    for (i, message) in log.iter().enumerate() {
        let mut spans = vec![
            Span::styled("$ ", Style::default().fg(theme.accent_soft)),
            Span::styled(message.as_str(), Style::default().fg(theme.text)),
        ];
        if i == last {
            spans.push(Span::styled(
                " _",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
        }
        lines.push(Line::from(spans));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .block(panel_block(" Log ", false, theme))
            .style(Style::default().bg(theme.surface)),
        area,
    );
}
