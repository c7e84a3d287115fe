//! Chat message types.
//!
//! All types are fully owned so they can move from timer tasks to the UI loop
//! without borrowed lifetimes.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    System,
}

/// A fake source reference attached to a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub file: String,
    /// Line range as displayed, e.g. `"12-45"`.
    pub lines: String,
}

/// A code snippet attached to a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Language name used to pick a syntax, e.g. `"typescript"`.
    pub language: String,
    pub code: String,
}

/// Unique, strictly increasing message identifier.
///
/// Derived from the wall clock in milliseconds; see [`MessageIdGen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the chat log. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    /// Empty when the message carries no citations.
    pub citations: Vec<Citation>,
    /// Empty when the message carries no code.
    pub code_blocks: Vec<CodeBlock>,
}

impl Message {
    /// Creates a plain user message with no attachments.
    pub fn user(id: MessageId, content: impl Into<String>) -> Self {
        Self {
            id,
            role: Role::User,
            content: content.into(),
            citations: Vec::new(),
            code_blocks: Vec::new(),
        }
    }

    /// Creates a plain system message with no attachments.
    pub fn system(id: MessageId, content: impl Into<String>) -> Self {
        Self {
            id,
            role: Role::System,
            content: content.into(),
            citations: Vec::new(),
            code_blocks: Vec::new(),
        }
    }
}

/// Hands out timestamp-based ids that never repeat within one session.
///
/// Two messages created in the same millisecond get consecutive ids, so the
/// sequence stays strictly increasing even when the clock stalls or steps back.
#[derive(Debug, Default)]
pub struct MessageIdGen {
    last: u64,
}

impl MessageIdGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next id based on the current wall clock.
    pub fn next_id(&mut self) -> MessageId {
        self.next_at(now_millis())
    }

    /// Returns the next id given a timestamp in milliseconds.
    pub fn next_at(&mut self, millis: u64) -> MessageId {
        let id = millis.max(self.last + 1);
        self.last = id;
        MessageId(id)
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
