//! The external service that executes challenge-authorized transactions.

use async_trait::async_trait;
use atk_types::{ChallengeResponse, EvmAddress, ServiceError, TxHash};

use crate::mutation::Mutation;

#[async_trait]
pub trait TransactionService: Send + Sync {
    /// Submit `mutation` from `from`, authorized by `challenge`.
    ///
    /// The challenge is moved in: one challenge, one transaction.
    async fn submit(
        &self,
        from: &EvmAddress,
        mutation: &Mutation,
        challenge: ChallengeResponse,
    ) -> Result<TxHash, ServiceError>;
}
