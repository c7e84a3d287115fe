//! Sidebar renderer for the mock repository tree.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
    Frame,
};

use crate::file_tree::{FileTree, TreeRow};
use crate::theme::Theme;
use crate::ui::layout::panel_block;

/// Renders the tree with the selected row highlighted while focused.
pub fn render_file_tree(
    frame: &mut Frame,
    area: Rect,
    tree: &FileTree,
    is_focused: bool,
    theme: &Theme,
) {
    let items: Vec<ListItem> = tree
        .visible_rows()
        .iter()
        .map(|row| tree_item(row, theme))
        .collect();

    let mut list_state = ListState::default();
    if is_focused {
        list_state.select(Some(tree.selected()));
    }

    let list = List::new(items)
        .block(panel_block(" Repository Files ", is_focused, theme))
        .highlight_style(
            Style::default()
                .fg(theme.border_active)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn tree_item(row: &TreeRow, theme: &Theme) -> ListItem<'static> {
    let indent = "  ".repeat(row.depth);
    let (marker, style) = if row.is_dir {
        let marker = if row.expanded { "▾ " } else { "▸ " };
        (marker, Style::default().fg(theme.accent_soft))
    } else {
        ("  ", Style::default().fg(theme.text))
    };
    ListItem::new(Line::from(vec![
        Span::raw(indent),
        Span::styled(marker, Style::default().fg(theme.text_muted)),
        Span::styled(row.name, style),
    ]))
}
