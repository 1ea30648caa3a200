//! Nullable transaction service: records submissions instead of sending them.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use atk_dispatch::{Mutation, TransactionService};
use atk_types::{ChallengeResponse, EvmAddress, ServiceError, TxHash};

use crate::lock;

/// One submission as the service saw it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedSubmission {
    pub from: EvmAddress,
    pub mutation: Mutation,
    pub challenge_id: String,
    pub challenge_response: String,
}

/// Accepts every submission unless told otherwise. Submission `n`
/// (1-based) gets the hash [`NullTransactionService::hash_for`]`(n)`.
#[derive(Default)]
pub struct NullTransactionService {
    submissions: Mutex<Vec<RecordedSubmission>>,
    failing_calls: Mutex<HashMap<usize, String>>,
}

impl NullTransactionService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the `n`th submission (1-based) with `message`.
    pub fn fail_call(&self, n: usize, message: impl Into<String>) {
        lock(&self.failing_calls).insert(n, message.into());
    }

    /// The hash returned for the `n`th submission.
    pub fn hash_for(n: usize) -> TxHash {
        let mut bytes = [0xabu8; 32];
        bytes[24..].copy_from_slice(&(n as u64).to_be_bytes());
        TxHash::new(bytes)
    }

    pub fn call_count(&self) -> usize {
        lock(&self.submissions).len()
    }

    pub fn submissions(&self) -> Vec<RecordedSubmission> {
        lock(&self.submissions).clone()
    }
}

#[async_trait]
impl TransactionService for NullTransactionService {
    async fn submit(
        &self,
        from: &EvmAddress,
        mutation: &Mutation,
        challenge: ChallengeResponse,
    ) -> Result<TxHash, ServiceError> {
        let (challenge_id, challenge_response) = challenge.into_parts();
        let n = {
            let mut submissions = lock(&self.submissions);
            submissions.push(RecordedSubmission {
                from: from.clone(),
                mutation: mutation.clone(),
                challenge_id,
                challenge_response,
            });
            submissions.len()
        };

        match lock(&self.failing_calls).get(&n) {
            Some(message) => Err(message.clone().into()),
            None => Ok(Self::hash_for(n)),
        }
    }
}
