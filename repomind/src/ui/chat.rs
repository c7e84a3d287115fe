//! Chat screen: header, message log, thinking indicator and input box.
//!
//! Messages are flattened into one `Vec<Line>` every frame. Prose is wrapped
//! here rather than by `Paragraph` so the total height is known and the log
//! can be pinned to its newest line.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use repomind_core::types::{Message, Role};

use crate::app::{ChatFocus, ChatScreen};
use crate::theme::Theme;
use crate::ui::file_tree::render_file_tree;
use crate::ui::layout::{inner_rect, panel_block};

const SIDEBAR_WIDTH: u16 = 32;
const INPUT_PLACEHOLDER: &str = "Ask about the codebase...";

pub fn render_chat(
    frame: &mut Frame,
    area: Rect,
    screen: &mut ChatScreen,
    spinner: char,
    theme: &Theme,
) {
    let main = if screen.sidebar_open && area.width > SIDEBAR_WIDTH * 2 {
        let [sidebar, main] = area.layout(&Layout::horizontal([
            Constraint::Length(SIDEBAR_WIDTH),
            Constraint::Fill(1),
        ]));
        render_file_tree(
            frame,
            sidebar,
            &screen.file_tree,
            screen.focus == ChatFocus::Files,
            theme,
        );
        main
    } else {
        area
    };

    let [header, messages, input] = main.layout(&Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(3),
    ]));

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                " RepoMind",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" • ", Style::default().fg(theme.text_muted)),
            Span::styled(screen.repo.as_str(), Style::default().fg(theme.text_muted)),
        ])),
        header,
    );

    render_messages(frame, messages, screen, spinner, theme);
    render_input(frame, input, screen, theme);
}

fn render_messages(
    frame: &mut Frame,
    area: Rect,
    screen: &mut ChatScreen,
    spinner: char,
    theme: &Theme,
) {
    let inner = inner_rect(area);
    let width = usize::from(inner.width.saturating_sub(2)).max(1);

    let mut lines = Vec::new();
    for message in screen.session.messages() {
        push_message(&mut lines, message, screen, width, theme);
    }
    if screen.session.is_loading() {
        lines.push(Line::from(Span::styled(
            format!(" {spinner} RepoMind is thinking..."),
            Style::default().fg(theme.text_muted),
        )));
    }

    screen.viewport_height = inner.height;
    let max_back = u16::try_from(lines.len().saturating_sub(usize::from(inner.height)))
        .unwrap_or(u16::MAX);
    screen.scroll_back = screen.scroll_back.min(max_back);
    let offset = max_back - screen.scroll_back;

    let title = if screen.scroll_back > 0 {
        format!(" Conversation (↑{}) ", screen.scroll_back)
    } else {
        " Conversation ".to_owned()
    };
    frame.render_widget(
        Paragraph::new(lines)
            .block(panel_block(&title, false, theme))
            .scroll((offset, 0)),
        area,
    );
}

fn push_message(
    lines: &mut Vec<Line<'static>>,
    message: &Message,
    screen: &ChatScreen,
    width: usize,
    theme: &Theme,
) {
    let (name, color) = match message.role {
        Role::User => ("You", theme.user_label),
        Role::System => ("RepoMind", theme.system_label),
    };
    lines.push(Line::from(Span::styled(
        format!(" {name}"),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )));

    for paragraph in message.content.split('\n') {
        for row in wrap(paragraph, width) {
            lines.push(Line::from(Span::styled(
                format!("  {row}"),
                Style::default().fg(theme.text),
            )));
        }
    }

    let highlighted = screen.highlighted(message.id);
    for (i, block) in message.code_blocks.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled("  ╭─ ", Style::default().fg(theme.accent_dim)),
            Span::styled(block.language.clone(), Style::default().fg(theme.code_header)),
        ]));
        let body = highlighted
            .and_then(|blocks| blocks.get(i))
            .cloned()
            .unwrap_or_else(|| block.code.lines().map(|l| Line::raw(l.to_owned())).collect());
        for code_line in body {
            let mut spans = vec![Span::styled("  │ ", Style::default().fg(theme.accent_dim))];
            spans.extend(code_line.spans);
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(Span::styled(
            "  ╰─",
            Style::default().fg(theme.accent_dim),
        )));
    }

    if !message.citations.is_empty() {
        lines.push(Line::from(Span::styled(
            "  Citations:",
            Style::default().fg(theme.text_muted),
        )));
        for citation in &message.citations {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("   ↗ {}", citation.file),
                    Style::default().fg(theme.citation),
                ),
                Span::styled(
                    format!(" ({})", citation.lines),
                    Style::default().fg(theme.text_muted),
                ),
            ]));
        }
    }
    lines.push(Line::default());
}

fn render_input(frame: &mut Frame, area: Rect, screen: &ChatScreen, theme: &Theme) {
    let focused = screen.focus == ChatFocus::Input;
    let content = if screen.input.is_empty() {
        Line::from(Span::styled(
            INPUT_PLACEHOLDER,
            Style::default().fg(theme.text_muted),
        ))
    } else {
        let mut spans = vec![Span::styled(
            screen.input.as_str(),
            Style::default().fg(theme.text),
        )];
        if focused {
            spans.push(Span::styled("▏", Style::default().fg(theme.accent_soft)));
        }
        Line::from(spans)
    };
    frame.render_widget(
        Paragraph::new(content)
            .block(panel_block(" Message ", focused, theme))
            .style(Style::default().bg(theme.surface)),
        area,
    );
}

/// Greedy word wrap on character counts. Words longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut row = String::new();
    let mut row_len = 0;
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if row_len > 0 {
                rows.push(std::mem::take(&mut row));
                row_len = 0;
            }
            let rest = word.split_off(width);
            rows.push(word.into_iter().collect());
            word = rest;
        }
        let needed = if row_len == 0 { word.len() } else { row_len + 1 + word.len() };
        if needed > width {
            rows.push(std::mem::take(&mut row));
            row_len = 0;
        }
        if row_len > 0 {
            row.push(' ');
            row_len += 1;
        }
        row_len += word.len();
        row.extend(word);
    }
    if row_len > 0 || rows.is_empty() {
        rows.push(row);
    }
    rows
}
