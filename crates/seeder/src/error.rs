//! Error taxonomy for a seeding run.
//!
//! Each variant identifies the step that terminated the run; the
//! orchestrator maps it to a [`FailureReason`] for the error
//! broadcast. Notification failures never appear here — they are
//! swallowed at the broadcast boundary.

use std::fmt;

use asraya_content::ContentError;

/// The remote step a failure or timeout is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Quest registry upsert.
    Registry,
    /// Participant/progress seeding writes.
    StateWrite,
    /// Day-content fetch and validation.
    Content,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Registry => "quest registry",
            Step::StateWrite => "participant state write",
            Step::Content => "content validation",
        };
        f.write_str(name)
    }
}

/// Terminal failure of one seeding run.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// The quest upsert was rejected by the store.
    #[error("Quest registry write failed: {0}")]
    Registry(#[source] sqlx::Error),

    /// A participant or progress write was rejected by the store.
    #[error("Participant state write failed: {0}")]
    StateWrite(#[source] sqlx::Error),

    /// The day content is missing, malformed, or unreachable.
    #[error(transparent)]
    Content(#[from] ContentError),

    /// A step exceeded the per-step time budget.
    #[error("Step '{step}' timed out after {timeout_secs}s")]
    Timeout { step: Step, timeout_secs: u64 },
}

/// Classified failure reason, as carried in the error broadcast and
/// consumed by the external caller's retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    Registry,
    StateWrite,
    Content,
}

impl FailureReason {
    /// Stable wire name used as the error event's detail.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registry => "registry",
            Self::StateWrite => "state_write",
            Self::Content => "content",
        }
    }
}

impl From<&SeedError> for FailureReason {
    fn from(err: &SeedError) -> Self {
        match err {
            SeedError::Registry(_) => Self::Registry,
            SeedError::StateWrite(_) => Self::StateWrite,
            SeedError::Content(_) => Self::Content,
            SeedError::Timeout { step, .. } => match step {
                Step::Registry => Self::Registry,
                Step::StateWrite => Self::StateWrite,
                Step::Content => Self::Content,
            },
        }
    }
}
