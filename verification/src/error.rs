use atk_types::VerificationKind;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// The user never enrolled the requested credential kind.
    #[error("verification id not found for {kind}")]
    VerificationIdNotFound { kind: VerificationKind },

    /// The authentication service rejected the code or could not be reached.
    #[error("{kind} challenge failed: {message}")]
    ChallengeFailed {
        kind: VerificationKind,
        message: String,
    },
}

impl VerificationError {
    /// The credential kind the failing request asked for.
    pub fn kind(&self) -> VerificationKind {
        match self {
            Self::VerificationIdNotFound { kind } | Self::ChallengeFailed { kind, .. } => *kind,
        }
    }
}
