//! Simulation core for RepoMind.
//!
//! Everything the demo "does" lives here: the five-stage processing sequencer,
//! the canned-reply chat session, the landing input and the route parser that
//! carries the repository identifier between screens. Nothing in this crate
//! touches the terminal; the `repomind` binary renders the state and feeds the
//! timer events back in.

pub mod canned;
pub mod chat;
pub mod error;
pub mod landing;
pub mod route;
pub mod sequencer;
pub mod stage;
pub mod timing;
pub mod types;

pub use error::{Error, Result};
