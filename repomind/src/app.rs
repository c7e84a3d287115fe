//! Central application state for repomind.
//!
//! `AppState` owns the active screen and the overlay mode. Every screen owns
//! the timers it spawns: replacing the screen drops its cancellation guard,
//! so no timer of a screen that is gone can reach the state again. No ratatui
//! rendering lives here; `ui` reads this state and `ui::keybindings` mutates
//! it.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::text::Line;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::{CancellationToken, DropGuard};

use repomind_core::chat::{schedule_reply, ChatSession, ReplyReady};
use repomind_core::landing::{RepositoryInput, SampleCarousel};
use repomind_core::route::Route;
use repomind_core::sequencer::{ProcessingSnapshot, Sequencer, SequencerEvent, SequencerHandle};
use repomind_core::timing::{self, Timings};
use repomind_core::types::MessageId;

use crate::event::AppEvent;
use crate::file_tree::FileTree;
use crate::highlight;
use crate::palette::{CommandPalette, PaletteAction, COMMANDS};

/// Braille spinner, one frame per logic tick.
pub const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Overlay mode controlling which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// The command palette is open above the chat screen.
    CommandPalette,
    /// Full-screen help overlay is shown above everything.
    HelpOverlay,
}

/// Which chat panel receives navigation keys.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ChatFocus {
    #[default]
    Input,
    Files,
}

/// Cancels every timer spawned for a screen when the screen is dropped.
struct ScreenTimers {
    token: CancellationToken,
    _guard: DropGuard,
}

impl ScreenTimers {
    fn new() -> Self {
        let token = CancellationToken::new();
        Self {
            _guard: token.clone().drop_guard(),
            token,
        }
    }

    fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

pub struct LandingScreen {
    pub input: RepositoryInput,
    pub carousel: SampleCarousel,
    timers: ScreenTimers,
}

pub struct ProcessingScreen {
    /// Latest state published by the sequencer.
    pub snapshot: ProcessingSnapshot,
    _handle: SequencerHandle,
}

pub struct ChatScreen {
    pub repo: String,
    pub session: ChatSession,
    /// Text typed into the message box.
    pub input: String,
    pub focus: ChatFocus,
    pub sidebar_open: bool,
    pub file_tree: FileTree,
    /// Rows scrolled up from the newest message. 0 follows the conversation.
    pub scroll_back: u16,
    /// Inner height of the message panel, cached after each render.
    pub viewport_height: u16,
    /// Highlighted code blocks per message, filled when a reply arrives.
    code_cache: HashMap<MessageId, Vec<Vec<Line<'static>>>>,
    timers: ScreenTimers,
}

impl ChatScreen {
    fn new(repo: String) -> Self {
        Self {
            repo,
            session: ChatSession::new(),
            input: String::new(),
            focus: ChatFocus::default(),
            sidebar_open: true,
            file_tree: FileTree::default(),
            scroll_back: 0,
            viewport_height: 0,
            code_cache: HashMap::new(),
            timers: ScreenTimers::new(),
        }
    }

    /// Highlighted lines for each code block of message `id`.
    pub fn highlighted(&self, id: MessageId) -> Option<&[Vec<Line<'static>>]> {
        self.code_cache.get(&id).map(Vec::as_slice)
    }

    fn clear(&mut self) {
        self.session.clear();
        self.code_cache.clear();
        self.scroll_back = 0;
    }
}

/// The screen currently shown.
pub enum Screen {
    Landing(LandingScreen),
    Processing(ProcessingScreen),
    Chat(ChatScreen),
}

impl Screen {
    /// The route that leads to this screen.
    pub fn route(&self) -> Route {
        match self {
            Screen::Landing(_) => Route::Landing,
            Screen::Processing(p) => Route::Processing {
                repo: p.snapshot.repo.clone(),
            },
            Screen::Chat(c) => Route::Chat {
                repo: c.repo.clone(),
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Screen::Landing(_) => "LANDING",
            Screen::Processing(_) => "PROCESSING",
            Screen::Chat(_) => "CHAT",
        }
    }
}

/// All mutable UI state passed through every render cycle.
pub struct AppState {
    pub screen: Screen,
    pub mode: Mode,
    pub palette: CommandPalette,
    /// Vertical scroll offset of the help overlay.
    pub help_scroll: u16,
    /// Logic tick counter driving spinners.
    pub frame: u64,
    /// One-line message for the status bar, cleared on navigation.
    pub notice: Option<String>,
    timings: Timings,
    rng: StdRng,
    tx: UnboundedSender<AppEvent>,
}

impl AppState {
    /// Builds the state and enters `route`, starting that screen's timers.
    ///
    /// `seed` makes every random choice reproducible; `None` seeds from the OS.
    pub fn new(
        timings: Timings,
        seed: Option<u64>,
        tx: UnboundedSender<AppEvent>,
        route: Route,
    ) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        tracing::info!(location = %route.to_location(), ?seed, "starting");
        let screen = enter(route, &timings, &mut rng, &tx);
        Self {
            screen,
            mode: Mode::default(),
            palette: CommandPalette::default(),
            help_scroll: 0,
            frame: 0,
            notice: None,
            timings,
            rng,
            tx,
        }
    }

    pub fn spinner(&self) -> char {
        SPINNER[(self.frame % SPINNER.len() as u64) as usize]
    }

    /// Replaces the current screen. Timers of the old screen stop.
    pub fn navigate(&mut self, route: Route) {
        tracing::info!(
            from = self.screen.name(),
            location = %route.to_location(),
            "navigating"
        );
        self.mode = Mode::Normal;
        self.notice = None;
        self.screen = enter(route, &self.timings, &mut self.rng, &self.tx);
    }

    /// Applies a simulation event from the bus.
    ///
    /// Terminal input, render ticks and quit requests are handled by the main
    /// loop and ignored here.
    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick => self.frame = self.frame.wrapping_add(1),
            AppEvent::Navigate(route) => self.navigate(route),
            AppEvent::Sequencer(event) => self.apply_sequencer(event),
            AppEvent::Reply(ready) => self.apply_reply(ready),
            AppEvent::CarouselTick => {
                if let Screen::Landing(landing) = &mut self.screen {
                    landing.carousel.advance();
                }
            }
            _ => {}
        }
    }

    fn apply_sequencer(&mut self, event: SequencerEvent) {
        let Screen::Processing(screen) = &mut self.screen else {
            tracing::debug!("dropping sequencer event outside the processing screen");
            return;
        };
        match event {
            SequencerEvent::Updated(snapshot) => {
                if snapshot.repo == screen.snapshot.repo {
                    screen.snapshot = snapshot;
                }
            }
            SequencerEvent::Completed { repo } => {
                if repo == screen.snapshot.repo {
                    self.navigate(Route::Chat { repo });
                }
            }
        }
    }

    fn apply_reply(&mut self, ReplyReady(ticket): ReplyReady) {
        let Screen::Chat(chat) = &mut self.screen else {
            return;
        };
        let Some(reply) = chat.session.resolve_reply(ticket, &mut self.rng) else {
            tracing::debug!(?ticket, "dropping reply for a cleared session");
            return;
        };
        if !reply.code_blocks.is_empty() {
            let blocks = reply
                .code_blocks
                .iter()
                .map(|block| highlight::highlight_code(&block.code, &block.language))
                .collect();
            chat.code_cache.insert(reply.id, blocks);
        }
        chat.scroll_back = 0;
    }

    /// Routes a typed character to the focused text input.
    pub fn type_char(&mut self, c: char) {
        match &mut self.screen {
            Screen::Landing(landing) => landing.input.push(c),
            Screen::Chat(chat) if chat.focus == ChatFocus::Input => chat.input.push(c),
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match &mut self.screen {
            Screen::Landing(landing) => landing.input.backspace(),
            Screen::Chat(chat) if chat.focus == ChatFocus::Input => {
                chat.input.pop();
            }
            _ => {}
        }
    }

    /// Submits the focused input.
    ///
    /// On the landing screen the processing screen follows after the
    /// navigation delay. On the chat screen the message is appended now and
    /// the reply is scheduled.
    pub fn submit(&mut self) {
        match &mut self.screen {
            Screen::Landing(landing) => {
                if let Some(route) = landing.input.submit() {
                    timing::after(
                        self.timings.navigate_delay,
                        landing.timers.token(),
                        self.tx.clone(),
                        AppEvent::Navigate(route),
                    );
                }
            }
            Screen::Chat(chat) => {
                if let Some(ticket) = chat.session.submit(&chat.input) {
                    chat.input.clear();
                    chat.scroll_back = 0;
                    schedule_reply(
                        ticket,
                        self.timings.reply_delay,
                        chat.timers.token(),
                        self.tx.clone(),
                    );
                }
            }
            Screen::Processing(_) => {}
        }
    }

    pub fn toggle_sidebar(&mut self) {
        if let Screen::Chat(chat) = &mut self.screen {
            chat.sidebar_open = !chat.sidebar_open;
            if !chat.sidebar_open {
                chat.focus = ChatFocus::Input;
            }
        }
    }

    /// Moves chat focus between the input and the file tree.
    pub fn cycle_focus(&mut self) {
        if let Screen::Chat(chat) = &mut self.screen {
            chat.focus = match chat.focus {
                ChatFocus::Input if chat.sidebar_open => ChatFocus::Files,
                _ => ChatFocus::Input,
            };
        }
    }

    pub fn scroll_messages_up(&mut self, rows: u16) {
        if let Screen::Chat(chat) = &mut self.screen {
            chat.scroll_back = chat.scroll_back.saturating_add(rows);
        }
    }

    pub fn scroll_messages_down(&mut self, rows: u16) {
        if let Screen::Chat(chat) = &mut self.screen {
            chat.scroll_back = chat.scroll_back.saturating_sub(rows);
        }
    }

    /// Opens the palette. Only the chat screen has one.
    pub fn open_palette(&mut self) {
        if matches!(self.screen, Screen::Chat(_)) {
            self.palette = CommandPalette::default();
            self.mode = Mode::CommandPalette;
        }
    }

    pub fn close_overlay(&mut self) {
        self.mode = Mode::Normal;
    }

    pub fn open_help(&mut self) {
        self.help_scroll = 0;
        self.mode = Mode::HelpOverlay;
    }

    /// Runs a palette command and closes the palette.
    pub fn run_palette_action(&mut self, action: PaletteAction) {
        tracing::info!(action = action.id(), "palette command");
        self.mode = Mode::Normal;
        match action {
            PaletteAction::NewChat => {
                if let Screen::Chat(chat) = &self.screen {
                    let repo = chat.repo.clone();
                    self.navigate(Route::Chat { repo });
                }
            }
            PaletteAction::ClearChat => {
                if let Screen::Chat(chat) = &mut self.screen {
                    chat.clear();
                }
            }
            PaletteAction::ToggleSidebar => self.toggle_sidebar(),
            PaletteAction::KeyboardShortcuts => self.open_help(),
            PaletteAction::OpenFile | PaletteAction::SearchCode | PaletteAction::Documentation => {
                let label = COMMANDS
                    .iter()
                    .find(|c| c.action == action)
                    .map_or(action.id(), |c| c.label);
                tracing::info!(action = action.id(), "palette action selected");
                self.notice = Some(format!("{label} is not available in the demo"));
            }
        }
    }
}

/// Builds the screen for `route` and starts its timers.
fn enter(
    route: Route,
    timings: &Timings,
    rng: &mut StdRng,
    tx: &UnboundedSender<AppEvent>,
) -> Screen {
    match route {
        Route::Landing => {
            let timers = ScreenTimers::new();
            timing::every(
                timings.carousel_interval,
                timers.token(),
                tx.clone(),
                || AppEvent::CarouselTick,
            );
            Screen::Landing(LandingScreen {
                input: RepositoryInput::default(),
                carousel: SampleCarousel::default(),
                timers,
            })
        }
        Route::Processing { repo } => {
            let sequencer = Sequencer::new(repo, *timings, StdRng::seed_from_u64(rng.gen()));
            let snapshot = sequencer.snapshot();
            Screen::Processing(ProcessingScreen {
                snapshot,
                _handle: sequencer.start(tx.clone()),
            })
        }
        Route::Chat { repo } => Screen::Chat(ChatScreen::new(repo)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repomind_core::canned::{GREETING, REPLIES};
    use repomind_core::types::Role;
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio::time::Instant;

    fn app(route: Route) -> (AppState, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (AppState::new(Timings::default(), Some(7), tx, route), rx)
    }

    fn chat(state: &AppState) -> &ChatScreen {
        match &state.screen {
            Screen::Chat(chat) => chat,
            _ => panic!("expected the chat screen, got {}", state.screen.name()),
        }
    }

    fn type_str(state: &mut AppState, s: &str) {
        s.chars().for_each(|c| state.type_char(c));
    }

    #[tokio::test(start_paused = true)]
    async fn landing_submit_opens_processing_after_the_delay() {
        let (mut state, mut rx) = app(Route::Landing);
        type_str(&mut state, "octocat/Hello-World");
        let start = Instant::now();
        state.submit();

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, AppEvent::Navigate(_)));
        assert!(start.elapsed() >= Duration::from_millis(500));
        state.apply(event);
        assert_eq!(
            state.screen.route().to_location(),
            "/processing?repo=octocat%2FHello-World"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn empty_landing_input_does_nothing() {
        let (mut state, _rx) = app(Route::Landing);
        state.submit();
        match &state.screen {
            Screen::Landing(landing) => assert!(!landing.input.is_submitting()),
            _ => panic!("left the landing screen"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn carousel_advances_on_its_timer() {
        let (mut state, mut rx) = app(Route::Landing);
        let first = match &state.screen {
            Screen::Landing(l) => l.carousel.current(),
            _ => unreachable!(),
        };
        let event = rx.recv().await.unwrap();
        assert!(matches!(event, AppEvent::CarouselTick));
        state.apply(event);
        match &state.screen {
            Screen::Landing(l) => assert_ne!(l.carousel.current(), first),
            _ => unreachable!(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn processing_hands_over_to_chat() {
        let (mut state, mut rx) = app(Route::Processing {
            repo: "octocat/Hello-World".to_owned(),
        });
        let start = Instant::now();
        while !matches!(state.screen, Screen::Chat(_)) {
            let event = rx.recv().await.unwrap();
            state.apply(event);
        }
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(13));
        assert!(elapsed < Duration::from_millis(13_050));
        assert_eq!(chat(&state).repo, "octocat/Hello-World");
    }

    #[tokio::test(start_paused = true)]
    async fn chat_reply_arrives_after_two_seconds() {
        let (mut state, mut rx) = app(Route::Chat {
            repo: "octocat/Hello-World".to_owned(),
        });
        type_str(&mut state, "How does auth work?");
        state.submit();
        assert!(chat(&state).input.is_empty());
        assert!(chat(&state).session.is_loading());
        assert_eq!(chat(&state).session.messages()[1].content, "How does auth work?");

        let start = Instant::now();
        let event = rx.recv().await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(2));
        state.apply(event);

        let screen = chat(&state);
        assert!(!screen.session.is_loading());
        let reply = screen.session.messages().last().unwrap();
        assert_eq!(reply.role, Role::System);
        assert!(REPLIES.iter().any(|r| r.content == reply.content));
        assert_eq!(
            screen.highlighted(reply.id).map(<[_]>::len).unwrap_or(0),
            reply.code_blocks.len()
        );
    }

    #[tokio::test(start_paused = true)]
    async fn new_chat_cancels_pending_replies() {
        let (mut state, mut rx) = app(Route::Chat {
            repo: "r".to_owned(),
        });
        type_str(&mut state, "question");
        state.submit();
        state.run_palette_action(PaletteAction::NewChat);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(chat(&state).session.messages().len(), 1);
        assert_eq!(chat(&state).session.messages()[0].content, GREETING);
    }

    #[tokio::test(start_paused = true)]
    async fn clear_chat_ignores_the_late_reply() {
        let (mut state, mut rx) = app(Route::Chat {
            repo: "r".to_owned(),
        });
        type_str(&mut state, "question");
        state.submit();
        state.run_palette_action(PaletteAction::ClearChat);

        let event = rx.recv().await.unwrap();
        state.apply(event);
        assert_eq!(chat(&state).session.messages().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn palette_only_opens_on_chat() {
        let (mut state, _rx) = app(Route::Landing);
        state.open_palette();
        assert_eq!(state.mode, Mode::Normal);

        state.navigate(Route::Chat {
            repo: "r".to_owned(),
        });
        state.open_palette();
        assert_eq!(state.mode, Mode::CommandPalette);
        state.run_palette_action(PaletteAction::KeyboardShortcuts);
        assert_eq!(state.mode, Mode::HelpOverlay);
    }

    #[tokio::test(start_paused = true)]
    async fn hiding_the_sidebar_returns_focus_to_input() {
        let (mut state, _rx) = app(Route::Chat {
            repo: "r".to_owned(),
        });
        state.cycle_focus();
        assert_eq!(chat(&state).focus, ChatFocus::Files);
        state.toggle_sidebar();
        assert!(!chat(&state).sidebar_open);
        assert_eq!(chat(&state).focus, ChatFocus::Input);
        state.cycle_focus();
        assert_eq!(chat(&state).focus, ChatFocus::Input);
    }

    #[tokio::test(start_paused = true)]
    async fn unavailable_commands_leave_a_notice() {
        let (mut state, _rx) = app(Route::Chat {
            repo: "r".to_owned(),
        });
        state.run_palette_action(PaletteAction::Documentation);
        assert_eq!(
            state.notice.as_deref(),
            Some("Documentation is not available in the demo")
        );
    }
}
