//! Challenge exchange: trade a submitted code for a one-time challenge.

use std::sync::Arc;

use async_trait::async_trait;
use atk_types::{
    ChallengeResponse, EvmAddress, ServiceError, UserSession, VerificationRequest,
};

use crate::error::VerificationError;
use crate::kind::portal_verification_type;
use crate::resolver::resolve_verification_id;

/// Arguments for one call to the authentication service.
#[derive(Clone, Copy)]
pub struct ChallengeParams<'a> {
    pub verification_id: &'a str,
    pub wallet: &'a EvmAddress,
    pub code: &'a str,
    /// Already translated via [`portal_verification_type`].
    pub verification_type: &'static str,
}

/// The external service that proves control of an enrolled credential.
#[async_trait]
pub trait ChallengeService: Send + Sync {
    async fn create_challenge_response(
        &self,
        params: ChallengeParams<'_>,
    ) -> Result<ChallengeResponse, ServiceError>;
}

/// Performs exactly one challenge exchange per call. Never retries.
#[derive(Clone)]
pub struct ChallengeExchange {
    service: Arc<dyn ChallengeService>,
}

impl ChallengeExchange {
    pub fn new(service: Arc<dyn ChallengeService>) -> Self {
        Self { service }
    }

    /// Exchange the user's code for a challenge authorizing one transaction.
    ///
    /// Fails with [`VerificationError::VerificationIdNotFound`] without any
    /// network call when the session has not enrolled `request.kind`.
    pub async fn exchange(
        &self,
        session: &UserSession,
        request: &VerificationRequest,
    ) -> Result<ChallengeResponse, VerificationError> {
        let kind = request.kind;
        let verification_id = resolve_verification_id(session, kind)
            .ok_or(VerificationError::VerificationIdNotFound { kind })?;

        tracing::debug!(wallet = %session.wallet, %kind, "requesting verification challenge");

        let params = ChallengeParams {
            verification_id,
            wallet: &session.wallet,
            code: &request.code,
            verification_type: portal_verification_type(kind),
        };

        self.service
            .create_challenge_response(params)
            .await
            .map_err(|e| {
                tracing::warn!(wallet = %session.wallet, %kind, "challenge exchange failed: {e}");
                VerificationError::ChallengeFailed {
                    kind,
                    message: e.to_string(),
                }
            })
    }
}
