//! Event bus for repomind.
//!
//! Terminal input, render and logic ticks, and every simulation timer are
//! normalised into one `AppEvent` enum and sent over a tokio unbounded MPSC
//! channel. The main loop is the only consumer and the only place state is
//! mutated.
//!
//! Two independent intervals drive the render and logic cycles:
//! - **Render interval** (33 ms ≈ 30 FPS) triggers a `terminal.draw()` call.
//! - **Tick interval** (100 ms) advances spinners.

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

use repomind_core::chat::ReplyReady;
use repomind_core::route::Route;
use repomind_core::sequencer::SequencerEvent;

/// All events the application can receive from any source.
#[derive(Debug)]
#[non_exhaustive]
pub enum AppEvent {
    /// A key press (`KeyEventKind::Press` only).
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Terminal was resized to (columns, rows).
    Resize(u16, u16),
    /// Logic tick for animation state.
    Tick,
    /// Render tick.
    Render,
    /// Delayed navigation, e.g. the landing submit.
    Navigate(Route),
    /// Output of the processing sequencer.
    Sequencer(SequencerEvent),
    /// A scheduled chat reply is due.
    Reply(ReplyReady),
    /// The landing carousel should show the next question.
    CarouselTick,
    Quit,
}

impl From<SequencerEvent> for AppEvent {
    fn from(e: SequencerEvent) -> Self {
        AppEvent::Sequencer(e)
    }
}

impl From<ReplyReady> for AppEvent {
    fn from(r: ReplyReady) -> Self {
        AppEvent::Reply(r)
    }
}

/// Holds the sender and receiver ends of the unified event channel.
pub struct EventHandler {
    /// Clone this for each background task that produces events.
    pub tx: mpsc::UnboundedSender<AppEvent>,
    /// Owned by the main loop.
    pub rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns the task that feeds terminal input and the two ticks into `tx`.
///
/// `reader.next().fuse()` keeps `select!` from polling a finished stream.
/// Only `KeyEventKind::Press` is forwarded; Windows also reports releases.
/// The task exits once the receiver is dropped.
pub fn spawn_event_task(tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let mut tick_interval = interval(Duration::from_millis(100));
        let mut render_interval = interval(Duration::from_millis(33));
        let mut reader = EventStream::new();

        loop {
            let tick_tick = tick_interval.tick();
            let render_tick = render_interval.tick();
            let crossterm_event = reader.next().fuse();

            let sent = tokio::select! {
                _ = tick_tick => tx.send(AppEvent::Tick),
                _ = render_tick => tx.send(AppEvent::Render),
                maybe_event = crossterm_event => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        tx.send(AppEvent::Key(key))
                    }
                    Some(Ok(Event::Resize(w, h))) => tx.send(AppEvent::Resize(w, h)),
                    Some(Ok(Event::Mouse(mouse))) => tx.send(AppEvent::Mouse(mouse)),
                    Some(Err(e)) => {
                        tracing::warn!("terminal event stream error: {e}");
                        Ok(())
                    }
                    None => tx.send(AppEvent::Quit),
                    _ => Ok(()),
                },
            };
            if sent.is_err() {
                break;
            }
        }
    });
}
