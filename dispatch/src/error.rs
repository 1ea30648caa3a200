use atk_capabilities::CapabilityError;
use atk_types::EvmAddress;
use atk_verification::VerificationError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error(transparent)]
    Capability(#[from] CapabilityError),

    /// The execution service rejected or could not process the transaction.
    #[error("{action} on {target} failed: {message}")]
    SubmissionFailed {
        action: &'static str,
        target: EvmAddress,
        message: String,
    },

    /// A batch pre-check could not decide whether the item should run.
    #[error("pre-check for {action} failed: {message}")]
    Precheck {
        action: &'static str,
        message: String,
    },
}
