//! Simulated delays and the two timer helpers every screen uses.
//!
//! Timer tasks never touch screen state. They only send an event over the
//! screen's channel, and they stop as soon as the screen's
//! [`CancellationToken`] fires.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Every fixed delay in the simulated pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Landing submit to processing screen.
    pub navigate_delay: Duration,
    /// One stage advance.
    pub stage_interval: Duration,
    /// Progress nudge period.
    pub progress_tick: Duration,
    /// Status log append period.
    pub status_interval: Duration,
    /// Pause on the final stage before moving to chat.
    pub completion_delay: Duration,
    /// Submit to canned reply.
    pub reply_delay: Duration,
    /// Sample question rotation on the landing screen.
    pub carousel_interval: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            navigate_delay: Duration::from_millis(500),
            stage_interval: Duration::from_secs(3),
            progress_tick: Duration::from_millis(100),
            status_interval: Duration::from_millis(1500),
            completion_delay: Duration::from_secs(1),
            reply_delay: Duration::from_secs(2),
            carousel_interval: Duration::from_secs(3),
        }
    }
}

impl Timings {
    /// Time from entering the processing screen to the completion signal.
    pub fn processing_total(&self) -> Duration {
        self.stage_interval * crate::stage::Stage::FINAL_INDEX as u32 + self.completion_delay
    }
}

/// Sends `event` once after `delay`, unless `token` is cancelled first.
pub fn after<E>(
    delay: Duration,
    token: CancellationToken,
    tx: UnboundedSender<E>,
    event: E,
) -> JoinHandle<()>
where
    E: Send + 'static,
{
    tokio::spawn(async move {
        tokio::select! {
            biased;
            _ = token.cancelled() => {}
            _ = tokio::time::sleep(delay) => {
                let _ = tx.send(event);
            }
        }
    })
}

/// Sends `make()` every `period`, first after one full period, until `token`
/// is cancelled or the receiver goes away.
pub fn every<E, F>(
    period: Duration,
    token: CancellationToken,
    tx: UnboundedSender<E>,
    mut make: F,
) -> JoinHandle<()>
where
    E: Send + 'static,
    F: FnMut() -> E + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticks = interval_at(Instant::now() + period, period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                _ = ticks.tick() => {
                    if tx.send(make()).is_err() {
                        break;
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn assert_near(elapsed: Duration, expected: Duration) {
        assert!(
            elapsed >= expected && elapsed < expected + Duration::from_millis(5),
            "elapsed {elapsed:?}, expected {expected:?}"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn after_fires_once_at_the_deadline() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let start = Instant::now();
        after(Duration::from_millis(500), CancellationToken::new(), tx, "go");

        assert_eq!(rx.recv().await, Some("go"));
        assert_near(start.elapsed(), Duration::from_millis(500));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_after_never_fires() {
        let (tx, mut rx) = mpsc::unbounded_channel::<&str>();
        let token = CancellationToken::new();
        let task = after(Duration::from_secs(2), token.clone(), tx, "late");
        token.cancel();
        task.await.unwrap();
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn every_ticks_until_cancelled() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        let mut n = 0;
        every(Duration::from_secs(3), token.clone(), tx, move || {
            n += 1;
            n
        });

        let start = Instant::now();
        assert_eq!(rx.recv().await, Some(1));
        assert_near(start.elapsed(), Duration::from_secs(3));
        assert_eq!(rx.recv().await, Some(2));
        assert_near(start.elapsed(), Duration::from_secs(6));

        token.cancel();
        assert_eq!(rx.recv().await, None);
    }

    #[test]
    fn default_processing_takes_thirteen_seconds() {
        assert_eq!(Timings::default().processing_total(), Duration::from_secs(13));
    }
}
