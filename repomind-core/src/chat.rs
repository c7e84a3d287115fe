//! Canned-reply chat session.
//!
//! [`ChatSession`] owns the message log of one chat screen. Submitting text
//! appends the user message right away and hands back a [`ReplyTicket`]; the
//! screen schedules the ticket with [`schedule_reply`] and calls
//! [`ChatSession::resolve_reply`] when the timer fires.
//!
//! Submissions made while earlier replies are still pending are accepted.
//! Every ticket gets its own reply, and because all tickets share the same
//! delay the replies land in submission order. The loading flag stays up until
//! the last pending ticket resolves.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use rand::Rng;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::canned;
use crate::timing;
use crate::types::{Message, MessageIdGen};

/// Tickets are unique across sessions, so a late timer from a discarded
/// session can never resolve a reply in a new one.
static NEXT_TICKET: AtomicU64 = AtomicU64::new(0);

/// Handle for one pending reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReplyTicket(u64);

/// Timer result for a pending reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyReady(pub ReplyTicket);

/// Message log plus the bookkeeping for replies in flight.
#[derive(Debug)]
pub struct ChatSession {
    messages: Vec<Message>,
    pending: VecDeque<ReplyTicket>,
    ids: MessageIdGen,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// Creates a session holding only the greeting.
    pub fn new() -> Self {
        let mut ids = MessageIdGen::new();
        let greeting = Message::system(ids.next_id(), canned::GREETING);
        Self {
            messages: vec![greeting],
            pending: VecDeque::new(),
            ids,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// `true` while at least one reply is pending.
    pub fn is_loading(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_replies(&self) -> usize {
        self.pending.len()
    }

    /// Appends `input` as a user message and opens a pending reply.
    ///
    /// Empty or whitespace-only input is ignored and yields `None`. The stored
    /// content is the input exactly as typed.
    pub fn submit(&mut self, input: &str) -> Option<ReplyTicket> {
        if input.trim().is_empty() {
            return None;
        }
        let id = self.ids.next_id();
        self.messages.push(Message::user(id, input));

        let ticket = ReplyTicket(NEXT_TICKET.fetch_add(1, Ordering::Relaxed));
        self.pending.push_back(ticket);
        tracing::debug!(message = %id, pending = self.pending.len(), "user message submitted");
        Some(ticket)
    }

    /// Appends a randomly chosen canned reply for `ticket`.
    ///
    /// Returns `None` for tickets that are no longer pending, e.g. after
    /// [`ChatSession::clear`].
    pub fn resolve_reply<R: Rng + ?Sized>(
        &mut self,
        ticket: ReplyTicket,
        rng: &mut R,
    ) -> Option<&Message> {
        let pos = self.pending.iter().position(|t| *t == ticket)?;
        self.pending.remove(pos);

        let reply = canned::pick_reply(rng).to_message(self.ids.next_id());
        tracing::debug!(message = %reply.id, pending = self.pending.len(), "canned reply appended");
        self.messages.push(reply);
        self.messages.last()
    }

    /// Drops every message but a fresh greeting and forgets pending replies.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.messages.clear();
        self.messages
            .push(Message::system(self.ids.next_id(), canned::GREETING));
    }
}

/// Sends [`ReplyReady`] for `ticket` after `delay` unless `token` fires first.
pub fn schedule_reply<E>(
    ticket: ReplyTicket,
    delay: Duration,
    token: CancellationToken,
    tx: UnboundedSender<E>,
) -> JoinHandle<()>
where
    E: From<ReplyReady> + Send + 'static,
{
    timing::after(delay, token, tx, ReplyReady(ticket).into())
}
