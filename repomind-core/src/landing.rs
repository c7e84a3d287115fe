//! Landing screen state: the repository input box and the sample-question
//! carousel.

use crate::canned::SAMPLE_QUESTIONS;
use crate::route::Route;

/// The "Analyze" input. Accepts any non-empty string.
#[derive(Debug, Default, Clone)]
pub struct RepositoryInput {
    value: String,
    submitting: bool,
}

impl RepositoryInput {
    pub fn value(&self) -> &str {
        &self.value
    }

    /// `true` between a successful submit and the navigation it schedules.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn push(&mut self, c: char) {
        if !self.submitting {
            self.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if !self.submitting {
            self.value.pop();
        }
    }

    /// Locks the input and returns the processing route to navigate to.
    ///
    /// `None` when the input is empty or a submit is already in flight. The
    /// identifier is not validated in any other way.
    pub fn submit(&mut self) -> Option<Route> {
        if self.value.is_empty() || self.submitting {
            return None;
        }
        self.submitting = true;
        tracing::debug!(repo = %self.value, "repository submitted");
        Some(Route::Processing {
            repo: self.value.clone(),
        })
    }
}

/// Rotating sample questions.
#[derive(Debug, Default, Clone)]
pub struct SampleCarousel {
    index: usize,
}

impl SampleCarousel {
    pub fn current(&self) -> &'static str {
        SAMPLE_QUESTIONS[self.index]
    }

    pub fn advance(&mut self) {
        self.index = (self.index + 1) % SAMPLE_QUESTIONS.len();
    }
}
