//! The mutation dispatcher: challenge first, then submit.

use std::sync::Arc;

use atk_capabilities::CapabilityGuard;
use atk_types::{TxHash, UserSession, VerificationRequest};
use atk_verification::{ChallengeExchange, VerificationError};
use tracing::Instrument;

use crate::error::DispatchError;
use crate::metrics::DispatchMetrics;
use crate::mutation::Mutation;
use crate::service::TransactionService;

/// Wraps every privileged mutation so it cannot execute without a fresh
/// challenge.
///
/// Per call: optional capability check, one challenge exchange, one
/// submission. Nothing is retried; a submission failure never triggers a
/// second exchange.
#[derive(Clone)]
pub struct MutationDispatcher {
    exchange: ChallengeExchange,
    transactions: Arc<dyn TransactionService>,
    guard: Option<CapabilityGuard>,
    pub(crate) metrics: Option<Arc<DispatchMetrics>>,
}

impl MutationDispatcher {
    pub fn new(exchange: ChallengeExchange, transactions: Arc<dyn TransactionService>) -> Self {
        Self {
            exchange,
            transactions,
            guard: None,
            metrics: None,
        }
    }

    /// Check the target's interfaces before each mutation.
    pub fn with_guard(mut self, guard: CapabilityGuard) -> Self {
        self.guard = Some(guard);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<DispatchMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn guard(&self) -> Option<&CapabilityGuard> {
        self.guard.as_ref()
    }

    /// Typed entry point: `dispatcher.execute(&session, Pause { token }, &code)`.
    pub async fn execute(
        &self,
        session: &UserSession,
        action: impl Into<Mutation>,
        verification: &VerificationRequest,
    ) -> Result<TxHash, DispatchError> {
        self.dispatch(session, &action.into(), verification).await
    }

    /// Authorize and submit one mutation, returning its transaction hash.
    pub async fn dispatch(
        &self,
        session: &UserSession,
        mutation: &Mutation,
        verification: &VerificationRequest,
    ) -> Result<TxHash, DispatchError> {
        let span = tracing::info_span!(
            "dispatch",
            action = mutation.action(),
            target = %mutation.target(),
            from = %session.wallet,
        );
        self.dispatch_inner(session, mutation, verification)
            .instrument(span)
            .await
    }

    async fn dispatch_inner(
        &self,
        session: &UserSession,
        mutation: &Mutation,
        verification: &VerificationRequest,
    ) -> Result<TxHash, DispatchError> {
        let action = mutation.action();
        let target = mutation.target();

        if let (Some(guard), Some(interface)) = (&self.guard, mutation.required_interface()) {
            if let Err(e) = guard.ensure(target, action, interface).await {
                if let Some(m) = &self.metrics {
                    m.capability_rejections.inc();
                }
                return Err(e.into());
            }
        }

        if let Some(m) = &self.metrics {
            m.challenges_requested.inc();
        }
        let challenge = match self.exchange.exchange(session, verification).await {
            Ok(challenge) => challenge,
            Err(e) => {
                if let Some(m) = &self.metrics {
                    let reason = match e {
                        VerificationError::VerificationIdNotFound { .. } => "not_enrolled",
                        VerificationError::ChallengeFailed { .. } => "rejected",
                    };
                    m.challenge_failures.with_label_values(&[reason]).inc();
                }
                return Err(e.into());
            }
        };

        match self
            .transactions
            .submit(&session.wallet, mutation, challenge)
            .await
        {
            Ok(hash) => {
                if let Some(m) = &self.metrics {
                    m.submissions.with_label_values(&[action]).inc();
                }
                tracing::info!(tx = %hash, "transaction submitted");
                Ok(hash)
            }
            Err(e) => {
                if let Some(m) = &self.metrics {
                    m.submission_failures.with_label_values(&[action]).inc();
                }
                tracing::warn!("transaction submission failed: {e}");
                Err(DispatchError::SubmissionFailed {
                    action,
                    target: target.clone(),
                    message: e.to_string(),
                })
            }
        }
    }
}
