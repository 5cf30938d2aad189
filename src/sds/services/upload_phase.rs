use serde::Serialize;
use std::fmt;

/// Lifecycle of one upload as observed by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UploadPhase {
    Idle,
    Submitting,
    Polling,
    /// A terminal step or full progress was observed. Covers both success and
    /// failure steps.
    Succeeded,
    /// The upload call itself failed; polling never started
    TerminalFailure,
    /// The user stopped watching. The server-side job is unaffected.
    Cancelled,
}

impl UploadPhase {
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            UploadPhase::Succeeded | UploadPhase::TerminalFailure | UploadPhase::Cancelled
        )
    }

    /// Moves to `next`, rejecting transitions the controller never makes
    pub fn transition(self, next: UploadPhase) -> crate::shared::Result<UploadPhase> {
        use UploadPhase::*;
        let allowed = matches!(
            (self, next),
            (Idle, Submitting)
                | (Submitting, Polling)
                | (Submitting, TerminalFailure)
                | (Polling, Succeeded)
                | (Polling, Cancelled)
        );
        if !allowed {
            anyhow::bail!("Invalid upload phase transition: {} -> {}", self, next);
        }
        tracing::debug!(from = %self, to = %next, "upload phase");
        Ok(next)
    }
}

impl fmt::Display for UploadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UploadPhase::Idle => "IDLE",
            UploadPhase::Submitting => "SUBMITTING",
            UploadPhase::Polling => "POLLING",
            UploadPhase::Succeeded => "SUCCEEDED",
            UploadPhase::TerminalFailure => "TERMINAL_FAILURE",
            UploadPhase::Cancelled => "CANCELLED",
        };
        f.write_str(name)
    }
}
