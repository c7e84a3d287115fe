//! Integration tests for the simulated pipeline.
//!
//! Exercises: landing submit, route hand-off, the running sequencer, and the
//! delayed chat reply, all on tokio's paused clock.

use std::time::Duration;

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use repomind_core::canned::REPLIES;
use repomind_core::chat::{schedule_reply, ChatSession, ReplyReady};
use repomind_core::landing::RepositoryInput;
use repomind_core::route::Route;
use repomind_core::sequencer::{Sequencer, SequencerEvent, STATUS_LOG_CAP};
use repomind_core::stage::Stage;
use repomind_core::timing::{self, Timings};
use repomind_core::types::Role;

#[derive(Debug)]
enum Event {
    Navigate(Route),
    Sequencer(SequencerEvent),
    Reply(ReplyReady),
}

impl From<SequencerEvent> for Event {
    fn from(e: SequencerEvent) -> Self {
        Event::Sequencer(e)
    }
}

impl From<ReplyReady> for Event {
    fn from(r: ReplyReady) -> Self {
        Event::Reply(r)
    }
}

fn assert_near(elapsed: Duration, expected: Duration) {
    assert!(
        elapsed >= expected && elapsed < expected + Duration::from_millis(5),
        "elapsed {elapsed:?}, expected {expected:?}"
    );
}

#[tokio::test(start_paused = true)]
async fn repository_flows_from_landing_to_chat() {
    let timings = Timings::default();
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let token = CancellationToken::new();

    // Landing: type, submit, wait for the navigation delay.
    let mut input = RepositoryInput::default();
    "octocat/Hello-World".chars().for_each(|c| input.push(c));
    let route = input.submit().unwrap();
    let start = Instant::now();
    timing::after(timings.navigate_delay, token.clone(), tx.clone(), Event::Navigate(route));

    let Some(Event::Navigate(route)) = rx.recv().await else {
        panic!("expected navigation");
    };
    assert_near(start.elapsed(), Duration::from_millis(500));
    assert_eq!(route.to_location(), "/processing?repo=octocat%2FHello-World");

    // Processing: run the sequencer to completion.
    let repo = Route::parse(&route.to_location()).unwrap().repo().unwrap().to_owned();
    let entered = Instant::now();
    let handle = Sequencer::new(repo, timings, StdRng::seed_from_u64(42)).start(tx.clone());

    let mut last_index = 0;
    let mut last_progress = 0.0;
    let mut final_updates = 0;
    let completed_repo = loop {
        match rx.recv().await {
            Some(Event::Sequencer(SequencerEvent::Updated(snap))) => {
                assert!(snap.stage.index() >= last_index, "stage regressed");
                assert!(snap.stage.index() <= last_index + 1, "stage skipped");
                assert!(snap.progress >= last_progress, "progress regressed");
                assert!((0.0..=100.0).contains(&snap.progress));
                assert!(snap.status_log.len() <= STATUS_LOG_CAP);
                if snap.progress >= 100.0 {
                    assert_eq!(snap.stage, Stage::Complete);
                }
                if snap.stage == Stage::Complete && last_index < Stage::FINAL_INDEX {
                    final_updates += 1;
                    assert_near(entered.elapsed(), Duration::from_secs(12));
                }
                last_index = snap.stage.index();
                last_progress = snap.progress;
            }
            Some(Event::Sequencer(SequencerEvent::Completed { repo })) => break repo,
            other => panic!("unexpected event {other:?}"),
        }
    };
    assert_near(entered.elapsed(), timings.processing_total());
    assert_eq!(final_updates, 1);
    handle.join().await;

    let chat = Route::Chat { repo: completed_repo };
    assert_eq!(chat.to_location(), "/chat?repo=octocat%2FHello-World");
}

#[tokio::test(start_paused = true)]
async fn chat_reply_arrives_after_two_seconds() {
    let timings = Timings::default();
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let token = CancellationToken::new();
    let mut rng = StdRng::seed_from_u64(9);
    let mut chat = ChatSession::new();

    let ticket = chat.submit("How does auth work?").unwrap();
    let last = chat.messages().last().unwrap();
    assert_eq!(last.role, Role::User);
    assert_eq!(last.content, "How does auth work?");
    assert!(chat.is_loading());

    let start = Instant::now();
    schedule_reply(ticket, timings.reply_delay, token.clone(), tx.clone());
    let Some(Event::Reply(ReplyReady(ready))) = rx.recv().await else {
        panic!("expected reply");
    };
    assert_near(start.elapsed(), Duration::from_secs(2));

    let reply = chat.resolve_reply(ready, &mut rng).unwrap().clone();
    assert_eq!(reply.role, Role::System);
    assert!(REPLIES.iter().any(|r| r.content == reply.content));
    assert!(!chat.is_loading());
    assert_eq!(chat.messages().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn overlapping_replies_resolve_in_submission_order() {
    let timings = Timings::default();
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let token = CancellationToken::new();
    let mut chat = ChatSession::new();

    let first = chat.submit("first").unwrap();
    schedule_reply(first, timings.reply_delay, token.clone(), tx.clone());
    tokio::time::sleep(Duration::from_millis(700)).await;
    let second = chat.submit("second").unwrap();
    schedule_reply(second, timings.reply_delay, token.clone(), tx.clone());

    let mut order = Vec::new();
    for _ in 0..2 {
        if let Some(Event::Reply(ReplyReady(t))) = rx.recv().await {
            order.push(t);
        }
    }
    assert_eq!(order, vec![first, second]);
}

#[tokio::test(start_paused = true)]
async fn leaving_processing_cancels_every_timer() {
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let handle = Sequencer::new("a/b", Timings::default(), StdRng::seed_from_u64(1)).start(tx);

    tokio::time::sleep(Duration::from_secs(4)).await;
    drop(handle);

    let mut completed = false;
    while let Some(event) = rx.recv().await {
        if matches!(event, Event::Sequencer(SequencerEvent::Completed { .. })) {
            completed = true;
        }
    }
    assert!(!completed, "cancelled sequencer must not complete");
}
