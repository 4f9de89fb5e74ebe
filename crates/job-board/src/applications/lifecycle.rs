//! Status state machine of a job application.
//!
//! `pending` is initial; `accepted` and `rejected` are terminal for the
//! review workflow. Status changes are nonetheless permitted from any state,
//! including re-setting the current one, so a reviewer can correct a decision.
//! [`TransitionKind`] records which kind of move happened so callers can log
//! or audit reversals.

use serde::Serialize;

use super::domain::ApplicationStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Requested status equals the current one.
    Unchanged,
    /// `pending` to a terminal status.
    Decided,
    /// Terminal status back to `pending`.
    Reopened,
    /// One terminal status to the other.
    Reversed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: ApplicationStatus,
    pub to: ApplicationStatus,
    pub kind: TransitionKind,
}

impl Transition {
    /// True when the move leaves a terminal status.
    pub const fn leaves_terminal(&self) -> bool {
        matches!(self.kind, TransitionKind::Reopened | TransitionKind::Reversed)
    }
}

/// Classify a status change. Every pair is permitted.
pub fn transition(from: ApplicationStatus, to: ApplicationStatus) -> Transition {
    let kind = if from == to {
        TransitionKind::Unchanged
    } else if !from.is_terminal() {
        TransitionKind::Decided
    } else if to.is_terminal() {
        TransitionKind::Reversed
    } else {
        TransitionKind::Reopened
    };

    Transition { from, to, kind }
}
