//! View state for the generation workflow.
//!
//! A small re-entrant machine: `Idle -> Generating -> Success | Error`, with
//! either outcome accepting the next submission. The machine is owned state,
//! passed to the single web controller, not an ambient global. `submit` is
//! both the validation boundary (whitespace-only themes never leave it) and
//! the single-flight guard (a flag check, not a queue).

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::constants::{GENERATION_ERROR_MESSAGE, LOADING_MESSAGE_INTERVAL, LOADING_MESSAGES};

/// What the UI is currently showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppStatus {
    /// Nothing in flight, nothing to report.
    Idle,
    /// A generation request is outstanding.
    Generating,
    /// The last submission produced a stamp.
    Success,
    /// The last submission failed.
    Error,
}

/// Outcome of a submission attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    /// Theme accepted (trimmed); the machine is now `Generating`.
    Accepted(String),
    /// Empty or whitespace-only theme; nothing changed.
    Rejected,
    /// A generation is already in flight; nothing changed.
    Busy,
}

/// The view state machine.
#[derive(Debug)]
pub struct ViewState {
    status: AppStatus,
    generating_since: Option<Instant>,
}

impl ViewState {
    /// Starts out idle.
    pub fn new() -> Self {
        Self {
            status: AppStatus::Idle,
            generating_since: None,
        }
    }

    /// Current status.
    pub fn status(&self) -> AppStatus {
        self.status
    }

    /// Attempts to start a generation for `theme`.
    pub fn submit(&mut self, theme: &str) -> Submission {
        let theme = theme.trim();
        if theme.is_empty() {
            return Submission::Rejected;
        }
        if self.status == AppStatus::Generating {
            return Submission::Busy;
        }
        self.status = AppStatus::Generating;
        self.generating_since = Some(Instant::now());
        Submission::Accepted(theme.to_string())
    }

    /// Marks the outstanding generation as successful.
    pub fn resolve_success(&mut self) {
        if self.status == AppStatus::Generating {
            self.status = AppStatus::Success;
            self.generating_since = None;
        }
    }

    /// Marks the outstanding generation as failed.
    pub fn resolve_error(&mut self) {
        if self.status == AppStatus::Generating {
            self.status = AppStatus::Error;
            self.generating_since = None;
        }
    }

    /// The fixed user-facing error copy, only while in the error state.
    pub fn error_message(&self) -> Option<&'static str> {
        (self.status == AppStatus::Error).then_some(GENERATION_ERROR_MESSAGE)
    }

    /// The progress message to show right now, only while generating. The
    /// sequence wraps at a fixed interval measured from submission.
    pub fn loading_message(&self) -> Option<&'static str> {
        self.generating_since
            .map(|since| loading_message_at(since.elapsed()))
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

fn loading_message_at(elapsed: Duration) -> &'static str {
    let ticks = (elapsed.as_millis() / LOADING_MESSAGE_INTERVAL.as_millis()) as usize;
    LOADING_MESSAGES[ticks % LOADING_MESSAGES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_submission_is_rejected_without_state_change() {
        let mut state = ViewState::new();
        assert_eq!(state.submit("   \t"), Submission::Rejected);
        assert_eq!(state.status(), AppStatus::Idle);
        assert!(state.loading_message().is_none());
    }

    #[test]
    fn accepted_submission_trims_and_starts_generating() {
        let mut state = ViewState::new();
        assert_eq!(
            state.submit("  Golden Camel "),
            Submission::Accepted("Golden Camel".to_string())
        );
        assert_eq!(state.status(), AppStatus::Generating);
        assert_eq!(state.loading_message(), Some(LOADING_MESSAGES[0]));
    }

    #[test]
    fn second_submission_while_generating_is_busy() {
        let mut state = ViewState::new();
        state.submit("Golden Camel");
        assert_eq!(state.submit("Dhow Boat"), Submission::Busy);
        assert_eq!(state.status(), AppStatus::Generating);
    }

    #[test]
    fn success_and_error_are_reentrant() {
        let mut state = ViewState::new();
        state.submit("Golden Camel");
        state.resolve_success();
        assert_eq!(state.status(), AppStatus::Success);
        assert!(state.error_message().is_none());
        assert!(state.loading_message().is_none());

        state.submit("Dhow Boat");
        state.resolve_error();
        assert_eq!(state.status(), AppStatus::Error);
        assert_eq!(state.error_message(), Some(GENERATION_ERROR_MESSAGE));
        assert!(state.loading_message().is_none());

        // An error state still accepts the next submission.
        assert!(matches!(
            state.submit("Royal Falcon"),
            Submission::Accepted(_)
        ));
    }

    #[test]
    fn resolving_outside_generating_changes_nothing() {
        let mut state = ViewState::new();
        state.resolve_success();
        assert_eq!(state.status(), AppStatus::Idle);
        state.resolve_error();
        assert_eq!(state.status(), AppStatus::Idle);
    }

    #[test]
    fn loading_messages_wrap_in_order() {
        let interval = LOADING_MESSAGE_INTERVAL;
        assert_eq!(loading_message_at(Duration::ZERO), LOADING_MESSAGES[0]);
        assert_eq!(loading_message_at(interval), LOADING_MESSAGES[1]);
        assert_eq!(
            loading_message_at(interval * (LOADING_MESSAGES.len() as u32)),
            LOADING_MESSAGES[0]
        );
    }
}
