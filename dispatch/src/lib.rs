//! Challenge-gated dispatch of privileged blockchain mutations.
//!
//! A [`MutationDispatcher`] composes the challenge exchange, an optional
//! capability guard, and the [`TransactionService`] that executes the
//! authorized transaction. Batches run sequentially with per-item results
//! and progress callbacks.

pub mod batch;
pub mod dispatcher;
pub mod error;
pub mod metrics;
pub mod mutation;
pub mod service;

pub use batch::{
    BatchItem, BatchPrecheck, BatchProgress, BatchReport, BatchResult, BatchSummary, ItemOutcome,
    NoPrecheck, PrecheckDecision, ProgressPhase,
};
pub use dispatcher::MutationDispatcher;
pub use error::DispatchError;
pub use metrics::DispatchMetrics;
pub use mutation::{
    Approve, Burn, CreateTokenFactory, ForcedTransfer, GrantRole, Mint, Mutation, Pause,
    RegisterComplianceModule, SetAddressFrozen, Transfer, Unpause, XvpApprove, XvpExecute,
};
pub use service::TransactionService;
