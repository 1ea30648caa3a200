//! Nullable batch pre-check: skips mutations it was told about.

use std::sync::Mutex;

use async_trait::async_trait;
use atk_dispatch::{BatchPrecheck, Mutation, PrecheckDecision};
use atk_types::ServiceError;

use crate::lock;

#[derive(Default)]
pub struct NullPrecheck {
    skips: Mutex<Vec<(Mutation, String)>>,
    failures: Mutex<Vec<(Mutation, String)>>,
}

impl NullPrecheck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `mutation` as skippable with `reason`.
    pub fn skip(&self, mutation: impl Into<Mutation>, reason: impl Into<String>) {
        lock(&self.skips).push((mutation.into(), reason.into()));
    }

    /// Fail the pre-check for `mutation` with `message`.
    pub fn fail(&self, mutation: impl Into<Mutation>, message: impl Into<String>) {
        lock(&self.failures).push((mutation.into(), message.into()));
    }
}

#[async_trait]
impl BatchPrecheck for NullPrecheck {
    async fn check(&self, mutation: &Mutation) -> Result<PrecheckDecision, ServiceError> {
        if let Some((_, message)) = lock(&self.failures).iter().find(|(m, _)| m == mutation) {
            return Err(message.clone().into());
        }
        Ok(lock(&self.skips)
            .iter()
            .find(|(m, _)| m == mutation)
            .map(|(_, reason)| PrecheckDecision::Skip(reason.clone()))
            .unwrap_or(PrecheckDecision::Proceed))
    }
}
