//! Parse errors for the shared types.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid transaction hash: {0}")]
    InvalidHash(String),

    #[error("invalid interface id: {0}")]
    InvalidInterfaceId(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}
