//! Keybinding dispatcher for repomind.
//!
//! Translates crossterm key and mouse events into `AppState` mutations and
//! returns a `KeyAction` telling the event loop whether to continue or quit.
//! The dispatcher branches first on `state.mode`, then on the active screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{AppState, ChatFocus, Mode, Screen};

/// Control-flow signal returned from the key dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

/// Dispatches a key event to the handler matching the current mode.
///
/// Ctrl-C and F1 work in every mode.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => return KeyAction::Quit,
        KeyCode::F(1) => {
            if state.mode == Mode::HelpOverlay {
                state.close_overlay();
            } else {
                state.open_help();
            }
            return KeyAction::Continue;
        }
        _ => {}
    }

    match state.mode {
        Mode::HelpOverlay => handle_help(key, state),
        Mode::CommandPalette => handle_palette(key, state),
        Mode::Normal => match state.screen {
            Screen::Landing(_) => handle_landing(key, state),
            Screen::Processing(_) => handle_processing(key),
            Screen::Chat(_) => handle_chat(key, state),
        },
    }
}

/// Plain characters for text inputs; Ctrl/Alt chords are not text.
fn typed_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(c)
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Screens
// ---------------------------------------------------------------------------

fn handle_landing(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Esc => return KeyAction::Quit,
        KeyCode::Enter => state.submit(),
        KeyCode::Backspace => state.backspace(),
        _ => {
            if let Some(c) = typed_char(&key) {
                state.type_char(c);
            }
        }
    }
    KeyAction::Continue
}

/// The processing screen only runs its timers; the user can only leave.
fn handle_processing(key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        _ => KeyAction::Continue,
    }
}

fn handle_chat(key: KeyEvent, state: &mut AppState) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('k') if ctrl => state.open_palette(),
        KeyCode::Char('b') if ctrl => state.toggle_sidebar(),
        KeyCode::Tab | KeyCode::BackTab => state.cycle_focus(),
        KeyCode::PageUp => {
            let page = page_rows(state);
            state.scroll_messages_up(page);
        }
        KeyCode::PageDown => {
            let page = page_rows(state);
            state.scroll_messages_down(page);
        }
        _ => {
            let Screen::Chat(chat) = &mut state.screen else {
                return KeyAction::Continue;
            };
            match chat.focus {
                ChatFocus::Files => match key.code {
                    KeyCode::Char('j') | KeyCode::Down => chat.file_tree.select_next(),
                    KeyCode::Char('k') | KeyCode::Up => chat.file_tree.select_prev(),
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        if let Some(path) = chat.file_tree.toggle_selected() {
                            tracing::debug!(path = %path, "file tree row toggled");
                        }
                    }
                    KeyCode::Esc => chat.focus = ChatFocus::Input,
                    _ => {}
                },
                ChatFocus::Input => match key.code {
                    KeyCode::Enter => state.submit(),
                    KeyCode::Backspace => state.backspace(),
                    KeyCode::Up => state.scroll_messages_up(1),
                    KeyCode::Down => state.scroll_messages_down(1),
                    _ => {
                        if let Some(c) = typed_char(&key) {
                            state.type_char(c);
                        }
                    }
                },
            }
        }
    }
    KeyAction::Continue
}

/// Half the message viewport, at least one row.
fn page_rows(state: &AppState) -> u16 {
    match &state.screen {
        Screen::Chat(chat) => (chat.viewport_height / 2).max(1),
        _ => 1,
    }
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

fn handle_palette(key: KeyEvent, state: &mut AppState) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => state.close_overlay(),
        KeyCode::Char('k') if ctrl => state.close_overlay(),
        KeyCode::Enter => {
            if let Some(action) = state.palette.chosen() {
                state.run_palette_action(action);
            }
        }
        KeyCode::Up => state.palette.select_prev(),
        KeyCode::Down => state.palette.select_next(),
        KeyCode::Backspace => state.palette.backspace(),
        _ => {
            if let Some(c) = typed_char(&key) {
                state.palette.push(c);
            }
        }
    }
    KeyAction::Continue
}

fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.help_scroll = state.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('g') => state.help_scroll = 0,
        KeyCode::Esc | KeyCode::Char('q') => state.close_overlay(),
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Scroll wheel moves the help overlay when it is open, otherwise the
/// conversation, 3 rows per notch.
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    match (mouse.kind, state.mode) {
        (MouseEventKind::ScrollUp, Mode::HelpOverlay) => {
            state.help_scroll = state.help_scroll.saturating_sub(3);
        }
        (MouseEventKind::ScrollDown, Mode::HelpOverlay) => {
            state.help_scroll = state.help_scroll.saturating_add(3);
        }
        (MouseEventKind::ScrollUp, Mode::Normal) => state.scroll_messages_up(3),
        (MouseEventKind::ScrollDown, Mode::Normal) => state.scroll_messages_down(3),
        _ => {}
    }
    KeyAction::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use repomind_core::route::Route;
    use repomind_core::timing::Timings;
    use tokio::sync::mpsc;

    fn state(route: Route) -> AppState {
        let (tx, _rx) = mpsc::unbounded_channel();
        AppState::new(Timings::default(), Some(1), tx, route)
    }

    fn chat_route() -> Route {
        Route::Chat {
            repo: "octocat/Hello-World".to_owned(),
        }
    }

    fn press(state: &mut AppState, code: KeyCode) -> KeyAction {
        handle_key(KeyEvent::new(code, KeyModifiers::NONE), state)
    }

    fn ctrl(state: &mut AppState, c: char) -> KeyAction {
        handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL), state)
    }

    fn type_str(state: &mut AppState, s: &str) {
        for c in s.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ctrl_c_quits_from_every_screen() {
        for route in [Route::Landing, chat_route()] {
            let mut s = state(route);
            assert_eq!(ctrl(&mut s, 'c'), KeyAction::Quit);
        }
        let mut s = state(chat_route());
        ctrl(&mut s, 'k');
        assert_eq!(ctrl(&mut s, 'c'), KeyAction::Quit);
    }

    #[tokio::test(start_paused = true)]
    async fn landing_types_and_submits() {
        let mut s = state(Route::Landing);
        type_str(&mut s, "octocat/Hello-Worldx");
        press(&mut s, KeyCode::Backspace);
        press(&mut s, KeyCode::Enter);
        let Screen::Landing(landing) = &s.screen else {
            panic!("left the landing screen early");
        };
        assert_eq!(landing.input.value(), "octocat/Hello-World");
        assert!(landing.input.is_submitting());
        assert_eq!(press(&mut s, KeyCode::Esc), KeyAction::Quit);
    }

    #[tokio::test(start_paused = true)]
    async fn chat_input_and_tree_focus() {
        let mut s = state(chat_route());
        type_str(&mut s, "hi");
        press(&mut s, KeyCode::Tab);
        press(&mut s, KeyCode::Char('j'));
        press(&mut s, KeyCode::Enter);

        let Screen::Chat(chat) = &s.screen else {
            panic!("expected chat");
        };
        assert_eq!(chat.input, "hi");
        assert_eq!(chat.focus, ChatFocus::Files);
        assert_eq!(chat.file_tree.selected(), 1);
        assert!(chat.file_tree.visible_rows()[1].expanded);
    }

    #[tokio::test(start_paused = true)]
    async fn enter_sends_the_message() {
        let mut s = state(chat_route());
        type_str(&mut s, "How does auth work?");
        press(&mut s, KeyCode::Enter);
        let Screen::Chat(chat) = &s.screen else {
            panic!("expected chat");
        };
        assert!(chat.input.is_empty());
        assert_eq!(chat.session.messages().len(), 2);
        assert!(chat.session.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn palette_filters_and_runs() {
        let mut s = state(chat_route());
        ctrl(&mut s, 'k');
        assert_eq!(s.mode, Mode::CommandPalette);
        type_str(&mut s, "sidebar");
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.mode, Mode::Normal);
        let Screen::Chat(chat) = &s.screen else {
            panic!("expected chat");
        };
        assert!(!chat.sidebar_open);

        ctrl(&mut s, 'k');
        press(&mut s, KeyCode::Esc);
        assert_eq!(s.mode, Mode::Normal);
    }

    #[tokio::test(start_paused = true)]
    async fn f1_toggles_help_and_j_scrolls() {
        let mut s = state(Route::Landing);
        press(&mut s, KeyCode::F(1));
        assert_eq!(s.mode, Mode::HelpOverlay);
        press(&mut s, KeyCode::Char('j'));
        press(&mut s, KeyCode::Char('j'));
        assert_eq!(s.help_scroll, 2);
        press(&mut s, KeyCode::F(1));
        assert_eq!(s.mode, Mode::Normal);
    }

    #[tokio::test(start_paused = true)]
    async fn processing_only_quits() {
        let mut s = state(Route::Processing {
            repo: "r".to_owned(),
        });
        assert_eq!(press(&mut s, KeyCode::Enter), KeyAction::Continue);
        assert_eq!(press(&mut s, KeyCode::Char('q')), KeyAction::Quit);
    }
}
