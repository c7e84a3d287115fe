//! Landing screen: title, tagline, repository input and the sample-question
//! carousel.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::LandingScreen;
use crate::theme::Theme;
use crate::ui::layout::panel_block;

const INPUT_PLACEHOLDER: &str = "github.com/username/repository";

pub fn render_landing(
    frame: &mut Frame,
    area: Rect,
    screen: &LandingScreen,
    spinner: char,
    theme: &Theme,
) {
    let column = area.centered(Constraint::Max(72), Constraint::Length(15));
    let [title, tagline, _, input, button, _, samples, footer] = column.layout(&Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Fill(1),
    ]));

    frame.render_widget(
        Paragraph::new(Span::styled(
            "RepoMind",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .centered(),
        title,
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Understand any codebase in ", Style::default().fg(theme.text_muted)),
            Span::styled(
                "minutes",
                Style::default()
                    .fg(theme.accent_soft)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(", not days.", Style::default().fg(theme.text_muted)),
        ]))
        .centered(),
        tagline,
    );

    let value = screen.input.value();
    let content = if value.is_empty() {
        Line::from(Span::styled(
            INPUT_PLACEHOLDER,
            Style::default().fg(theme.text_muted),
        ))
    } else {
        Line::from(vec![
            Span::styled(value, Style::default().fg(theme.text)),
            Span::styled("▏", Style::default().fg(theme.accent_soft)),
        ])
    };
    frame.render_widget(
        Paragraph::new(content)
            .block(panel_block(" Repository ", !screen.input.is_submitting(), theme))
            .style(Style::default().bg(theme.surface)),
        input,
    );

    let button_line = if screen.input.is_submitting() {
        Line::from(Span::styled(
            format!("[ {spinner} Analyzing ]"),
            Style::default().fg(theme.accent_dim),
        ))
    } else if value.is_empty() {
        Line::from(Span::styled(
            "[ Analyze → ]",
            Style::default().fg(theme.text_muted),
        ))
    } else {
        Line::from(Span::styled(
            "[ Analyze → ]",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ))
    };
    frame.render_widget(Paragraph::new(button_line).right_aligned(), button);

    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled("Try asking", Style::default().fg(theme.text_muted))),
            Line::from(vec![
                Span::styled("❯ ", Style::default().fg(theme.accent_soft)),
                Span::styled(screen.carousel.current(), Style::default().fg(theme.text)),
            ]),
        ])
        .centered(),
        samples,
    );

    frame.render_widget(
        Paragraph::new(Span::styled(
            "© 2025 RepoMind. All rights reserved.",
            Style::default().fg(theme.text_muted),
        ))
        .centered(),
        Rect {
            y: footer.bottom().saturating_sub(1),
            height: footer.height.min(1),
            ..footer
        },
    );
}
