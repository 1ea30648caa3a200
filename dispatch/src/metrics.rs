//! Prometheus counters for dispatch activity.

use prometheus::{IntCounter, IntCounterVec, Opts, Registry};

pub struct DispatchMetrics {
    /// Challenge exchanges attempted.
    pub challenges_requested: IntCounter,
    /// Challenge exchanges that failed, by reason (`not_enrolled`, `rejected`).
    pub challenge_failures: IntCounterVec,
    /// Transactions accepted by the execution service, by action.
    pub submissions: IntCounterVec,
    /// Transactions rejected by the execution service, by action.
    pub submission_failures: IntCounterVec,
    /// Mutations refused because the target lacks an interface.
    pub capability_rejections: IntCounter,
    /// Batches dispatched.
    pub batches: IntCounter,
}

impl DispatchMetrics {
    /// Create the counters and register them with `registry`.
    pub fn register(registry: &Registry) -> Result<Self, prometheus::Error> {
        let challenges_requested = IntCounter::with_opts(Opts::new(
            "atk_challenges_requested_total",
            "Verification challenge exchanges attempted",
        ))?;
        let challenge_failures = IntCounterVec::new(
            Opts::new(
                "atk_challenge_failures_total",
                "Verification challenge exchanges that failed",
            ),
            &["reason"],
        )?;
        let submissions = IntCounterVec::new(
            Opts::new(
                "atk_transactions_submitted_total",
                "Transactions accepted by the execution service",
            ),
            &["action"],
        )?;
        let submission_failures = IntCounterVec::new(
            Opts::new(
                "atk_transaction_failures_total",
                "Transactions rejected by the execution service",
            ),
            &["action"],
        )?;
        let capability_rejections = IntCounter::with_opts(Opts::new(
            "atk_capability_rejections_total",
            "Mutations refused because the target lacks a required interface",
        ))?;
        let batches = IntCounter::with_opts(Opts::new(
            "atk_batches_total",
            "Batch dispatches started",
        ))?;

        registry.register(Box::new(challenges_requested.clone()))?;
        registry.register(Box::new(challenge_failures.clone()))?;
        registry.register(Box::new(submissions.clone()))?;
        registry.register(Box::new(submission_failures.clone()))?;
        registry.register(Box::new(capability_rejections.clone()))?;
        registry.register(Box::new(batches.clone()))?;

        Ok(Self {
            challenges_requested,
            challenge_failures,
            submissions,
            submission_failures,
            capability_rejections,
            batches,
        })
    }
}
