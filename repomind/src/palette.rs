//! Command palette state: the fixed command list, the filter query and the
//! selection cursor.

/// What a palette entry does when chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteAction {
    NewChat,
    ClearChat,
    ToggleSidebar,
    OpenFile,
    SearchCode,
    KeyboardShortcuts,
    Documentation,
}

impl PaletteAction {
    /// Identifier used in log lines.
    pub fn id(self) -> &'static str {
        match self {
            PaletteAction::NewChat => "new-chat",
            PaletteAction::ClearChat => "clear-chat",
            PaletteAction::ToggleSidebar => "toggle-sidebar",
            PaletteAction::OpenFile => "open-file",
            PaletteAction::SearchCode => "search-code",
            PaletteAction::KeyboardShortcuts => "keyboard-shortcuts",
            PaletteAction::Documentation => "documentation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteCommand {
    pub group: &'static str,
    pub label: &'static str,
    pub shortcut: Option<&'static str>,
    pub action: PaletteAction,
}

pub static COMMANDS: [PaletteCommand; 7] = [
    PaletteCommand {
        group: "Actions",
        label: "New Chat",
        shortcut: None,
        action: PaletteAction::NewChat,
    },
    PaletteCommand {
        group: "Actions",
        label: "Clear Chat",
        shortcut: None,
        action: PaletteAction::ClearChat,
    },
    PaletteCommand {
        group: "Actions",
        label: "Toggle Sidebar",
        shortcut: Some("Ctrl-B"),
        action: PaletteAction::ToggleSidebar,
    },
    PaletteCommand {
        group: "Files",
        label: "Open File",
        shortcut: None,
        action: PaletteAction::OpenFile,
    },
    PaletteCommand {
        group: "Files",
        label: "Search in Code",
        shortcut: None,
        action: PaletteAction::SearchCode,
    },
    PaletteCommand {
        group: "Help",
        label: "Keyboard Shortcuts",
        shortcut: Some("F1"),
        action: PaletteAction::KeyboardShortcuts,
    },
    PaletteCommand {
        group: "Help",
        label: "Documentation",
        shortcut: None,
        action: PaletteAction::Documentation,
    },
];

/// Palette overlay state. Reset every time the palette opens.
#[derive(Debug, Default)]
pub struct CommandPalette {
    query: String,
    selected: usize,
}

impl CommandPalette {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Commands whose label or group contains the query, case-insensitively.
    pub fn matches(&self) -> Vec<&'static PaletteCommand> {
        let needle = self.query.to_lowercase();
        COMMANDS
            .iter()
            .filter(|c| {
                needle.is_empty()
                    || c.label.to_lowercase().contains(&needle)
                    || c.group.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn push(&mut self, c: char) {
        self.query.push(c);
        self.selected = 0;
    }

    pub fn backspace(&mut self) {
        self.query.pop();
        self.selected = 0;
    }

    pub fn select_next(&mut self) {
        let last = self.matches().len().saturating_sub(1);
        self.selected = (self.selected + 1).min(last);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// The action under the cursor, if anything matches.
    pub fn chosen(&self) -> Option<PaletteAction> {
        self.matches().get(self.selected).map(|c| c.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_lists_everything() {
        let palette = CommandPalette::default();
        assert_eq!(palette.matches().len(), COMMANDS.len());
        assert_eq!(palette.chosen(), Some(PaletteAction::NewChat));
    }

    #[test]
    fn query_filters_case_insensitively() {
        let mut palette = CommandPalette::default();
        "SIDE".chars().for_each(|c| palette.push(c));
        let labels: Vec<_> = palette.matches().iter().map(|c| c.label).collect();
        assert_eq!(labels, vec!["Toggle Sidebar"]);
        assert_eq!(palette.chosen(), Some(PaletteAction::ToggleSidebar));
    }

    #[test]
    fn group_names_match_too() {
        let mut palette = CommandPalette::default();
        "help".chars().for_each(|c| palette.push(c));
        assert_eq!(palette.matches().len(), 2);
    }

    #[test]
    fn no_match_chooses_nothing() {
        let mut palette = CommandPalette::default();
        "zzz".chars().for_each(|c| palette.push(c));
        assert!(palette.matches().is_empty());
        assert_eq!(palette.chosen(), None);
    }

    #[test]
    fn cursor_is_clamped_and_reset_by_typing() {
        let mut palette = CommandPalette::default();
        for _ in 0..10 {
            palette.select_next();
        }
        assert_eq!(palette.selected(), COMMANDS.len() - 1);
        assert_eq!(palette.chosen(), Some(PaletteAction::Documentation));
        palette.push('c');
        assert_eq!(palette.selected(), 0);
    }
}
