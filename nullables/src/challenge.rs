//! Nullable authentication service: issues numbered challenges.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use atk_types::{ChallengeResponse, EvmAddress, ServiceError};
use atk_verification::{ChallengeParams, ChallengeService};

use crate::lock;

/// One call as the service saw it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedChallenge {
    pub verification_id: String,
    pub wallet: EvmAddress,
    pub code: String,
    pub verification_type: &'static str,
}

/// Accepts every code except those registered with [`reject_code`], and
/// answers call `n` with `challenge-n` / `response-n`.
///
/// [`reject_code`]: NullChallengeService::reject_code
#[derive(Default)]
pub struct NullChallengeService {
    calls: Mutex<Vec<RecordedChallenge>>,
    rejected_codes: Mutex<HashSet<String>>,
    outage: Mutex<Option<String>>,
}

impl NullChallengeService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any exchange that submits `code`.
    pub fn reject_code(&self, code: impl Into<String>) {
        lock(&self.rejected_codes).insert(code.into());
    }

    /// Fail every exchange with `message`, as if the service were down.
    pub fn fail_all(&self, message: impl Into<String>) {
        *lock(&self.outage) = Some(message.into());
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn calls(&self) -> Vec<RecordedChallenge> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl ChallengeService for NullChallengeService {
    async fn create_challenge_response(
        &self,
        params: ChallengeParams<'_>,
    ) -> Result<ChallengeResponse, ServiceError> {
        let n = {
            let mut calls = lock(&self.calls);
            calls.push(RecordedChallenge {
                verification_id: params.verification_id.to_string(),
                wallet: params.wallet.clone(),
                code: params.code.to_string(),
                verification_type: params.verification_type,
            });
            calls.len()
        };

        if let Some(message) = lock(&self.outage).clone() {
            return Err(message.into());
        }
        if lock(&self.rejected_codes).contains(params.code) {
            return Err(format!("invalid {}", params.verification_type).into());
        }
        Ok(ChallengeResponse::new(
            format!("challenge-{n}"),
            format!("response-{n}"),
        ))
    }
}
