//! Processing-stage simulation.
//!
//! [`Sequencer`] is the single owner of the processing screen's state: the
//! stage index, the progress value and the rolling status log. Its step
//! methods enforce every invariant and need no clock, so tests drive them
//! directly. [`Sequencer::start`] moves the sequencer into one tokio task that
//! drives three independent intervals plus the completion delay and publishes
//! a [`ProcessingSnapshot`] after each change.
//!
//! # Timeline (default timings)
//!
//! | t      | event                                  |
//! |--------|----------------------------------------|
//! | 0      | start at `fetching`, progress 0        |
//! | 3 s    | `processing`                           |
//! | 6 s    | `embedding`                            |
//! | 9 s    | `building`                             |
//! | 12 s   | `complete`, completion delay armed     |
//! | 13 s   | [`SequencerEvent::Completed`]          |
//!
//! Progress moves every 100 ms and status lines arrive every 1.5 s throughout.

use std::collections::VecDeque;

use rand::Rng;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::canned;
use crate::stage::Stage;
use crate::timing::Timings;

/// Maximum number of lines kept in the status log.
pub const STATUS_LOG_CAP: usize = 5;

/// Largest progress increase per tick.
pub const PROGRESS_STEP: f64 = 2.0;

/// Outcome of one stage tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStep {
    /// Moved to a non-final stage.
    Advanced(Stage),
    /// Moved onto the final stage. Happens exactly once per sequencer.
    ReachedFinal,
    /// Already on the final stage; nothing changed.
    AlreadyFinal,
}

/// Read-only copy of the sequencer state for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingSnapshot {
    pub repo: String,
    pub stage: Stage,
    pub progress: f64,
    /// Oldest first.
    pub status_log: Vec<String>,
}

/// Messages the running sequencer publishes.
#[derive(Debug, Clone, PartialEq)]
pub enum SequencerEvent {
    Updated(ProcessingSnapshot),
    /// Sent once, `completion_delay` after the final stage was reached.
    Completed { repo: String },
}

/// Controller for one processing-screen lifetime.
pub struct Sequencer<R> {
    repo: String,
    stage_index: usize,
    progress: f64,
    status_log: VecDeque<&'static str>,
    timings: Timings,
    rng: R,
}

impl<R: Rng> Sequencer<R> {
    pub fn new(repo: impl Into<String>, timings: Timings, rng: R) -> Self {
        Self {
            repo: repo.into(),
            stage_index: 0,
            progress: 0.0,
            status_log: VecDeque::with_capacity(STATUS_LOG_CAP + 1),
            timings,
            rng,
        }
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn stage(&self) -> Stage {
        Stage::from_index(self.stage_index).unwrap_or(Stage::Complete)
    }

    pub fn stage_index(&self) -> usize {
        self.stage_index
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_final(&self) -> bool {
        self.stage_index >= Stage::FINAL_INDEX
    }

    /// Progress the bar is currently moving toward.
    pub fn target_progress(&self) -> f64 {
        self.stage_index as f64 / Stage::FINAL_INDEX as f64 * 100.0
    }

    /// Moves to the next stage. Never skips and never goes past the final one.
    pub fn advance_stage(&mut self) -> StageStep {
        if self.is_final() {
            return StageStep::AlreadyFinal;
        }
        self.stage_index += 1;
        if self.is_final() {
            StageStep::ReachedFinal
        } else {
            StageStep::Advanced(self.stage())
        }
    }

    /// Moves progress toward the target by at most [`PROGRESS_STEP`].
    ///
    /// Returns `true` if the value changed.
    pub fn tick_progress(&mut self) -> bool {
        let step = (self.target_progress() - self.progress).clamp(0.0, PROGRESS_STEP);
        let next = (self.progress + step).min(100.0);
        let changed = next != self.progress;
        self.progress = next;
        changed
    }

    /// Appends one random status line, evicting the oldest past the cap.
    pub fn push_status(&mut self) -> &'static str {
        let line = canned::pick_status(&mut self.rng);
        self.status_log.push_back(line);
        while self.status_log.len() > STATUS_LOG_CAP {
            self.status_log.pop_front();
        }
        line
    }

    pub fn status_log(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.status_log.iter().copied()
    }

    pub fn snapshot(&self) -> ProcessingSnapshot {
        ProcessingSnapshot {
            repo: self.repo.clone(),
            stage: self.stage(),
            progress: self.progress,
            status_log: self.status_log.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

impl<R: Rng + Send + 'static> Sequencer<R> {
    /// Spawns the timer task and returns its handle.
    ///
    /// Events are converted into the caller's event type, so the UI can feed
    /// them straight into its own bus. Dropping the handle stops the task.
    pub fn start<E>(self, tx: UnboundedSender<E>) -> SequencerHandle
    where
        E: From<SequencerEvent> + Send + 'static,
    {
        let token = CancellationToken::new();
        tracing::info!(repo = %self.repo, "processing simulation started");
        let task = tokio::spawn(run(self, tx, token.clone()));
        SequencerHandle {
            guard: Some(token.clone().drop_guard()),
            token,
            task,
        }
    }
}

/// Owns the running sequencer task. Stops it when dropped.
pub struct SequencerHandle {
    token: CancellationToken,
    guard: Option<DropGuard>,
    task: JoinHandle<()>,
}

impl SequencerHandle {
    /// Cancels every timer of the sequencer.
    pub fn stop(&self) {
        self.token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the task to exit without cancelling it.
    pub async fn join(mut self) {
        if let Some(guard) = self.guard.take() {
            guard.disarm();
        }
        let _ = (&mut self.task).await;
    }
}

async fn run<R, E>(mut seq: Sequencer<R>, tx: UnboundedSender<E>, token: CancellationToken)
where
    R: Rng,
    E: From<SequencerEvent>,
{
    let t = seq.timings;
    let start = Instant::now();
    let mut stage_ticks = interval_at(start + t.stage_interval, t.stage_interval);
    let mut progress_ticks = interval_at(start + t.progress_tick, t.progress_tick);
    let mut status_ticks = interval_at(start + t.status_interval, t.status_interval);
    let completion = tokio::time::sleep(t.completion_delay);
    tokio::pin!(completion);
    let mut completion_armed = false;

    if !publish(&seq, &tx) {
        return;
    }

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                tracing::debug!(repo = %seq.repo, "processing simulation cancelled");
                return;
            }
            _ = &mut completion, if completion_armed => {
                tracing::info!(repo = %seq.repo, "processing simulation complete");
                let _ = tx.send(SequencerEvent::Completed { repo: seq.repo.clone() }.into());
                return;
            }
            _ = stage_ticks.tick(), if !seq.is_final() => {
                match seq.advance_stage() {
                    StageStep::Advanced(stage) => {
                        tracing::debug!(stage = stage.id(), "stage advanced");
                    }
                    StageStep::ReachedFinal => {
                        tracing::debug!("final stage reached");
                        completion.as_mut().reset(Instant::now() + t.completion_delay);
                        completion_armed = true;
                    }
                    StageStep::AlreadyFinal => {}
                }
                if !publish(&seq, &tx) {
                    return;
                }
            }
            _ = progress_ticks.tick(), if seq.progress() < 100.0 => {
                if seq.tick_progress() && !publish(&seq, &tx) {
                    return;
                }
            }
            _ = status_ticks.tick() => {
                seq.push_status();
                if !publish(&seq, &tx) {
                    return;
                }
            }
        }
    }
}

/// Sends a snapshot; `false` once the receiver is gone.
fn publish<R: Rng, E: From<SequencerEvent>>(seq: &Sequencer<R>, tx: &UnboundedSender<E>) -> bool {
    tx.send(SequencerEvent::Updated(seq.snapshot()).into()).is_ok()
}
