//! Sequential batch dispatch with per-item results.
//!
//! Items run one after another because an item's on-chain effect may depend
//! on the previous one being confirmed. Every item performs its own
//! challenge exchange. A failed item is recorded and the batch moves on.

use std::fmt;

use async_trait::async_trait;
use atk_types::{ServiceError, TxHash, UserSession, VerificationRequest};

use crate::dispatcher::MutationDispatcher;
use crate::error::DispatchError;
use crate::mutation::Mutation;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchItem {
    /// Display name for progress and results (e.g. the module name).
    pub label: String,
    pub mutation: Mutation,
}

impl BatchItem {
    pub fn new(label: impl Into<String>, mutation: impl Into<Mutation>) -> Self {
        Self {
            label: label.into(),
            mutation: mutation.into(),
        }
    }
}

/// Decides, before any challenge is spent, whether an item still needs to run.
#[async_trait]
pub trait BatchPrecheck: Send + Sync {
    async fn check(&self, mutation: &Mutation) -> Result<PrecheckDecision, ServiceError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PrecheckDecision {
    Proceed,
    /// Nothing to do; the reason is reported on the item.
    Skip(String),
}

/// Runs every item.
pub struct NoPrecheck;

#[async_trait]
impl BatchPrecheck for NoPrecheck {
    async fn check(&self, _mutation: &Mutation) -> Result<PrecheckDecision, ServiceError> {
        Ok(PrecheckDecision::Proceed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Submitted(TxHash),
    Skipped { reason: String },
    Failed(DispatchError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    pub label: String,
    pub outcome: ItemOutcome,
}

impl BatchResult {
    /// The transaction hash, or `None` for skipped and failed items.
    pub fn tx_hash(&self) -> Option<TxHash> {
        match self.outcome {
            ItemOutcome::Submitted(hash) => Some(hash),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&DispatchError> {
        match &self.outcome {
            ItemOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, ItemOutcome::Failed(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchSummary {
    /// No failures. Skipped items count as completed.
    AllSucceeded { skipped: usize },
    /// Some but not all items failed.
    Partial { failed: usize },
    AllFailed,
}

impl BatchSummary {
    pub fn from_results(results: &[BatchResult]) -> Self {
        let failed = results.iter().filter(|r| r.is_failure()).count();
        let skipped = results
            .iter()
            .filter(|r| matches!(r.outcome, ItemOutcome::Skipped { .. }))
            .count();
        match failed {
            0 => Self::AllSucceeded { skipped },
            n if n == results.len() => Self::AllFailed,
            n => Self::Partial { failed: n },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// One entry per input item, in input order.
    pub results: Vec<BatchResult>,
    pub summary: BatchSummary,
}

impl BatchReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &BatchResult> {
        self.results.iter().filter(|r| !r.is_failure())
    }

    pub fn failed(&self) -> impl Iterator<Item = &BatchResult> {
        self.results.iter().filter(|r| r.is_failure())
    }

    pub fn tx_hashes(&self) -> Vec<TxHash> {
        self.results.iter().filter_map(BatchResult::tx_hash).collect()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.results.len();
        match self.summary {
            BatchSummary::AllSucceeded { skipped: 0 } => {
                write!(f, "{total} of {total} completed")
            }
            BatchSummary::AllSucceeded { skipped } => {
                let mut reasons: Vec<&str> = self
                    .results
                    .iter()
                    .filter_map(|r| match &r.outcome {
                        ItemOutcome::Skipped { reason } => Some(reason.as_str()),
                        _ => None,
                    })
                    .collect();
                reasons.sort_unstable();
                reasons.dedup();
                write!(
                    f,
                    "{total} of {total} completed ({skipped} skipped: {})",
                    reasons.join(", ")
                )
            }
            BatchSummary::Partial { failed } => {
                write!(f, "{} of {total} completed, {failed} failed", total - failed)
            }
            BatchSummary::AllFailed => write!(f, "all {total} failed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressPhase {
    Started,
    Finished,
}

/// Emitted before and after each item. `current` counts finished items, so
/// it runs from `0` (first item started) to `total` (last item finished).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress<'a> {
    pub current: usize,
    pub total: usize,
    pub label: &'a str,
    pub phase: ProgressPhase,
}

impl MutationDispatcher {
    /// Dispatch `items` in order, each with its own challenge exchange.
    pub async fn dispatch_batch(
        &self,
        session: &UserSession,
        items: &[BatchItem],
        verification: &VerificationRequest,
        precheck: &dyn BatchPrecheck,
        mut on_progress: impl FnMut(BatchProgress<'_>) + Send,
    ) -> BatchReport {
        let total = items.len();
        if let Some(m) = &self.metrics {
            m.batches.inc();
        }
        tracing::info!(total, wallet = %session.wallet, "starting batch dispatch");

        let mut results = Vec::with_capacity(total);
        for (index, item) in items.iter().enumerate() {
            on_progress(BatchProgress {
                current: index,
                total,
                label: &item.label,
                phase: ProgressPhase::Started,
            });

            let outcome = self.run_item(session, item, verification, precheck).await;
            match &outcome {
                ItemOutcome::Submitted(hash) => {
                    tracing::debug!(item = %item.label, tx = %hash, "batch item submitted")
                }
                ItemOutcome::Skipped { reason } => {
                    tracing::info!(item = %item.label, reason = %reason, "batch item skipped")
                }
                ItemOutcome::Failed(e) => {
                    tracing::warn!(item = %item.label, "batch item failed: {e}")
                }
            }
            results.push(BatchResult {
                label: item.label.clone(),
                outcome,
            });

            on_progress(BatchProgress {
                current: index + 1,
                total,
                label: &item.label,
                phase: ProgressPhase::Finished,
            });
        }

        let summary = BatchSummary::from_results(&results);
        tracing::info!(total, ?summary, "batch dispatch finished");
        BatchReport { results, summary }
    }

    async fn run_item(
        &self,
        session: &UserSession,
        item: &BatchItem,
        verification: &VerificationRequest,
        precheck: &dyn BatchPrecheck,
    ) -> ItemOutcome {
        match precheck.check(&item.mutation).await {
            Ok(PrecheckDecision::Proceed) => {}
            Ok(PrecheckDecision::Skip(reason)) => return ItemOutcome::Skipped { reason },
            Err(e) => {
                return ItemOutcome::Failed(DispatchError::Precheck {
                    action: item.mutation.action(),
                    message: e.to_string(),
                })
            }
        }
        match self.dispatch(session, &item.mutation, verification).await {
            Ok(hash) => ItemOutcome::Submitted(hash),
            Err(e) => ItemOutcome::Failed(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atk_types::EvmAddress;

    fn result(outcome: ItemOutcome) -> BatchResult {
        BatchResult {
            label: "m".into(),
            outcome,
        }
    }

    fn failure() -> ItemOutcome {
        ItemOutcome::Failed(DispatchError::SubmissionFailed {
            action: "register-compliance-module",
            target: EvmAddress::ZERO,
            message: "reverted".into(),
        })
    }

    #[test]
    fn summary_classification() {
        let ok = || ItemOutcome::Submitted(TxHash::new([1; 32]));
        assert_eq!(
            BatchSummary::from_results(&[result(ok()), result(ok())]),
            BatchSummary::AllSucceeded { skipped: 0 }
        );
        assert_eq!(
            BatchSummary::from_results(&[result(ok()), result(failure())]),
            BatchSummary::Partial { failed: 1 }
        );
        assert_eq!(
            BatchSummary::from_results(&[result(failure()), result(failure())]),
            BatchSummary::AllFailed
        );
    }

    #[test]
    fn empty_batch_counts_as_success() {
        assert_eq!(
            BatchSummary::from_results(&[]),
            BatchSummary::AllSucceeded { skipped: 0 }
        );
    }

    #[test]
    fn skip_message_names_reason() {
        let results = vec![
            result(ItemOutcome::Submitted(TxHash::new([1; 32]))),
            result(ItemOutcome::Skipped {
                reason: "already exists".into(),
            }),
            result(ItemOutcome::Submitted(TxHash::new([2; 32]))),
        ];
        let report = BatchReport {
            summary: BatchSummary::from_results(&results),
            results,
        };
        assert_eq!(
            report.to_string(),
            "3 of 3 completed (1 skipped: already exists)"
        );
        assert_eq!(report.tx_hashes().len(), 2);
    }

    #[test]
    fn partial_message_counts_failures() {
        let results = vec![
            result(failure()),
            result(ItemOutcome::Submitted(TxHash::new([1; 32]))),
        ];
        let report = BatchReport {
            summary: BatchSummary::from_results(&results),
            results,
        };
        assert_eq!(report.to_string(), "1 of 2 completed, 1 failed");
        assert_eq!(report.failed().count(), 1);
    }
}
