use atk_types::EvmAddress;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    /// The target contract does not implement the interface the action needs.
    #[error("{action} not supported by {address}: missing {interface}")]
    NotSupported {
        address: EvmAddress,
        action: String,
        interface: String,
    },

    /// The capability probe itself failed; nothing was cached.
    #[error("failed to probe {address} for {interface}: {message}")]
    ProbeFailed {
        address: EvmAddress,
        interface: String,
        message: String,
    },
}
